use glfw_handle::{Error, Glfw, GlfwLoader, Handle, HandleKind, RawContext};

pub trait FailToCompileIfNotSendSync
where
    Self: Send + Sync,
{
}

impl<K: HandleKind> FailToCompileIfNotSendSync for Handle<K> {}
impl FailToCompileIfNotSendSync for RawContext {}
impl FailToCompileIfNotSendSync for Glfw {}
impl FailToCompileIfNotSendSync for GlfwLoader {}
impl FailToCompileIfNotSendSync for Error {}

pub trait FailToCompileIfNotCopy
where
    Self: Copy,
{
}

impl<K: HandleKind> FailToCompileIfNotCopy for Handle<K> {}
impl FailToCompileIfNotCopy for RawContext {}

pub trait FailToCompileIfNotClone
where
    Self: Clone,
{
}

impl FailToCompileIfNotClone for Glfw {}
impl FailToCompileIfNotClone for Error {}
