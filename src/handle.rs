//! The opaque native handle value type.
//!
//! A [`Handle`] identifies a resource owned by native code, most commonly an
//! object created by GLFW or by the context API it drives. The handle never
//! owns the resource: copying it, comparing it or dropping it has no effect on
//! the object it names.

use std::ffi::c_void;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::private::Sealed;

/// The kind of native resource a [`Handle`] names.
///
/// This trait is sealed, all the kinds live in [`crate::kind`].
pub trait HandleKind: Sealed + 'static {
    /// The native name of the resource, used when formatting handles.
    const NAME: &'static str;
}

/// An opaque, non-owning token for a native resource of kind `K`.
///
/// The wrapped value is pointer sized and has no meaning besides being an
/// identity issued by the native library. The value `0` is reserved for
/// [`Handle::NONE`].
#[repr(transparent)]
pub struct Handle<K: HandleKind> {
    raw: usize,
    _kind: PhantomData<fn() -> K>,
}

impl<K: HandleKind> Handle<K> {
    /// The handle which doesn't name any resource.
    pub const NONE: Self = Self::from_raw(0);

    /// Get the [`Handle::NONE`] sentinel.
    #[inline]
    pub const fn none() -> Self {
        Self::NONE
    }

    /// Wrap the raw value obtained from the native library.
    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self { raw, _kind: PhantomData }
    }

    /// Wrap the raw pointer obtained from the native library.
    #[inline]
    pub fn from_ptr(ptr: *const c_void) -> Self {
        Self::from_raw(ptr as usize)
    }

    /// The raw value to pass to the native library.
    #[inline]
    pub const fn as_raw(self) -> usize {
        self.raw
    }

    /// The raw value as a pointer, for the native calls taking pointers.
    #[inline]
    pub fn as_ptr(self) -> *mut c_void {
        self.raw as *mut c_void
    }

    /// Whether this handle is [`Handle::NONE`].
    ///
    /// This is the only validity check a handle can do on its own, whether a
    /// non-none handle still names a live resource is only known to the
    /// native library.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.raw == 0
    }

    /// `None` for [`Handle::NONE`], `Some(self)` otherwise.
    #[inline]
    pub fn non_none(self) -> Option<Self> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }
}

impl<K: HandleKind> Clone for Handle<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: HandleKind> Copy for Handle<K> {}

impl<K: HandleKind> Default for Handle<K> {
    #[inline]
    fn default() -> Self {
        Self::NONE
    }
}

impl<K: HandleKind> PartialEq for Handle<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K: HandleKind> Eq for Handle<K> {}

impl<K: HandleKind> Hash for Handle<K> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: HandleKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:#x})", K::NAME, self.raw)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashMap;

    use super::*;
    use crate::kind;

    fn hash_of<K: HandleKind>(handle: Handle<K>) -> u64 {
        let mut hasher = DefaultHasher::new();
        handle.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn none_is_zero() {
        let none = Handle::<kind::EglContext>::none();
        assert_eq!(none.as_raw(), 0);
        assert!(none.is_none());
        assert!(none.as_ptr().is_null());
        assert_eq!(none, Handle::NONE);
        assert_eq!(none, Handle::default());
        assert_eq!(none.non_none(), None);
    }

    #[test]
    fn none_differs_from_issued_handles() {
        let issued = Handle::<kind::EglContext>::from_raw(0x5555_0010);
        assert_ne!(issued, Handle::NONE);
        assert!(!issued.is_none());
        assert_eq!(issued.non_none(), Some(issued));
    }

    #[test]
    fn raw_values_round_trip() {
        for raw in [0, 1, 0xdead_beef, usize::MAX / 2, usize::MAX] {
            assert_eq!(Handle::<kind::Window>::from_raw(raw).as_raw(), raw);
        }
    }

    #[test]
    fn pointers_round_trip() {
        let value = 7u32;
        let ptr = &value as *const u32 as *const c_void;
        let handle = Handle::<kind::Window>::from_ptr(ptr);
        assert_eq!(handle.as_ptr() as *const c_void, ptr);
        assert_eq!(handle.as_raw(), ptr as usize);
    }

    #[test]
    fn equal_handles_hash_equally() {
        let a = Handle::<kind::GlxContext>::from_raw(0x1000);
        let b = Handle::<kind::GlxContext>::from_raw(0x1000);
        assert_eq!(a, b);
        assert_eq!(hash_of(a), hash_of(b));
        let none = Handle::<kind::GlxContext>::NONE;
        assert_eq!(hash_of(none), hash_of(Handle::<kind::GlxContext>::default()));
    }

    #[test]
    fn usable_as_map_keys() {
        let mut names = HashMap::new();
        names.insert(Handle::<kind::Monitor>::from_raw(0x20), "primary");
        names.insert(Handle::<kind::Monitor>::from_raw(0x40), "secondary");

        assert_eq!(names.get(&Handle::from_raw(0x20)), Some(&"primary"));
        assert_eq!(names.get(&Handle::from_raw(0x40)), Some(&"secondary"));
        assert_eq!(names.get(&Handle::NONE), None);

        names.insert(Handle::from_raw(0x20), "replaced");
        assert_eq!(names.len(), 2);
        assert_eq!(names[&Handle::from_raw(0x20)], "replaced");
    }

    #[test]
    fn debug_shows_kind_and_raw_value() {
        let handle = Handle::<kind::EglContext>::from_raw(0x7f3a10);
        assert_eq!(format!("{handle:?}"), "EGLContext(0x7f3a10)");
        assert_eq!(format!("{:?}", Handle::<kind::Cursor>::NONE), "GLFWcursor(0x0)");
    }

    #[test]
    fn layout_matches_usize() {
        assert_eq!(std::mem::size_of::<Handle<kind::X11Window>>(), std::mem::size_of::<usize>());
        assert_eq!(std::mem::align_of::<Handle<kind::X11Window>>(), std::mem::align_of::<usize>());
    }
}
