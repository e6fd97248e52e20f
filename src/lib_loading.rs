//! Library loading routines.

use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use libloading::Library;
#[cfg(windows)]
use libloading::os::windows::{Library as WinLibrary, LOAD_LIBRARY_SEARCH_DEFAULT_DIRS};
use log::debug;

use crate::error::{Error, ErrorKind, Result};

pub(crate) trait SymLoading {
    /// # Safety
    /// The values produced from the library must not outlive it.
    unsafe fn load_with(lib: &Library) -> Self;
}

/// Symbols resolved from a library, together with the library keeping them
/// valid.
#[derive(Clone)]
pub(crate) struct SymWrapper<T> {
    sym: T,
    _lib: Option<Arc<Library>>,
}

impl<T: SymLoading> SymWrapper<T> {
    /// Load the first library from `lib_paths` which could be opened.
    ///
    /// # Safety
    /// Loading a library runs its initialization routines.
    pub(crate) unsafe fn new<P: AsRef<Path>>(lib_paths: &[P]) -> Result<Self> {
        let mut last_error = None;
        for path in lib_paths {
            let path = path.as_ref();

            #[cfg(windows)]
            let lib = WinLibrary::load_with_flags(path, LOAD_LIBRARY_SEARCH_DEFAULT_DIRS)
                .map(From::from);

            #[cfg(not(windows))]
            let lib = Library::new(path);

            match lib {
                Ok(lib) => {
                    debug!("loaded {}", path.display());
                    let sym = T::load_with(&lib);
                    return Ok(SymWrapper { sym, _lib: Some(Arc::new(lib)) });
                },
                Err(err) => {
                    debug!("failed to load {}: {err}", path.display());
                    last_error = Some(err.to_string());
                },
            }
        }

        Err(Error::new(None, last_error, ErrorKind::NotFound))
    }
}

impl<T> SymWrapper<T> {
    /// Wrap symbols which don't come from a loaded library.
    #[cfg(test)]
    pub(crate) fn from_static(sym: T) -> Self {
        SymWrapper { sym, _lib: None }
    }
}

impl<T> Deref for SymWrapper<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.sym
    }
}

/// Copy the function pointer named `name` out of `lib`.
///
/// # Safety
/// `F` must match the signature of the symbol and the pointer must not be
/// called after `lib` is unloaded.
pub(crate) unsafe fn load_fn<F: Copy>(lib: &Library, name: &str) -> Option<F> {
    match lib.get::<F>(name.as_bytes()) {
        Ok(sym) => Some(*sym),
        Err(_) => {
            debug!("{name} is not exported");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSyms;

    impl SymLoading for NoSyms {
        unsafe fn load_with(_: &Library) -> Self {
            NoSyms
        }
    }

    #[test]
    fn missing_library_is_not_found() {
        let paths = ["/nonexistent/libglfw-handle-test.so", "libglfw-handle-test-missing.so"];
        let err = match unsafe { SymWrapper::<NoSyms>::new(&paths) } {
            Ok(_) => panic!("a missing library was loaded"),
            Err(err) => err,
        };
        assert_eq!(err.error_kind(), ErrorKind::NotFound);
        assert!(err.raw_message().is_some());
    }

    #[test]
    fn no_paths_is_not_found() {
        let paths: [&str; 0] = [];
        let err = unsafe { SymWrapper::<NoSyms>::new(&paths) }.err().map(|err| err.error_kind());
        assert_eq!(err, Some(ErrorKind::NotFound));
    }
}
