//! Typed opaque handles for the native objects exposed by GLFW.
//!
//! Every object GLFW hands out, or lets you reach on the underlying platform,
//! is an opaque pointer sized value owned by native code. This crate wraps
//! them into a single value type, [`Handle`], tagged by the [`kind`] of
//! resource it names, so an [`EglContext`] can't be passed where an
//! [`EglSurface`] is expected.
//!
//! Handles never own the resource they name. They are plain `Copy` values:
//! compare them, hash them, use them as map keys and pass them back to native
//! code with [`Handle::as_raw`] or [`Handle::as_ptr`]. The only state a handle
//! knows about is [`Handle::NONE`]; whether any other handle still names a
//! live object is up to the native library.
//!
//! The [`Glfw`] type resolves GLFW's native access entry points from a
//! dynamically loaded GLFW and returns their results as handles, reporting
//! failures with [`Error`].
//!
//! ```no_run
//! use glfw_handle::{Glfw, Window};
//!
//! # fn window_from_glfw() -> *const std::ffi::c_void { std::ptr::null() }
//! let window = Window::from_ptr(window_from_glfw());
//! let context = Glfw::global()?.raw_context(window)?;
//! println!("{context:?}");
//! # Ok::<(), glfw_handle::error::Error>(())
//! ```

#![deny(rust_2018_idioms)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::all)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![cfg_attr(clippy, deny(warnings))]

pub mod error;
pub mod handle;
mod kinds;
mod lib_loading;
pub mod native;
mod raw_window;

pub use crate::error::{Error, ErrorKind};
pub use crate::handle::{Handle, HandleKind};
pub use crate::kinds::*;
pub use crate::native::{Glfw, GlfwLoader, NativeApis, RawContext};

mod private {
    /// Prevent traits from being implemented downstream.
    pub trait Sealed {}
}
