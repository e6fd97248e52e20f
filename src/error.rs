//! Errors reported at the native boundary.
//!
//! Handles themselves never fail. Errors come from the layer which obtains
//! handles from GLFW, either because the library or an entry point is missing
//! or because GLFW refused to hand out the requested object.

use std::fmt;

/// A specialized [`Result`] type for native access operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all the native access operations.
#[derive(Debug, Clone)]
pub struct Error {
    /// The raw GLFW error code.
    raw_code: Option<i64>,

    /// The description GLFW attached to the error, if any.
    raw_message: Option<String>,

    /// The simplified error kind to handle matching.
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(raw_code: Option<i64>, raw_message: Option<String>, kind: ErrorKind) -> Self {
        Self { raw_code, raw_message, kind }
    }

    /// Build an error from a GLFW error code and its description.
    ///
    /// Returns `None` for `GLFW_NO_ERROR`.
    pub(crate) fn from_glfw(code: i32, message: Option<String>) -> Option<Self> {
        let kind = ErrorKind::from_glfw_code(code)?;
        Some(Self::new(Some(code as i64), message, kind))
    }

    /// Helper to check that error is [`ErrorKind::NotSupported`].
    #[inline]
    pub fn not_supported(&self) -> bool {
        matches!(&self.kind, ErrorKind::NotSupported(_))
    }

    /// Helper to check that error is [`ErrorKind::InvalidHandle`].
    #[inline]
    pub fn invalid_handle(&self) -> bool {
        self.kind == ErrorKind::InvalidHandle
    }

    /// The underlying error kind.
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        self.kind
    }

    /// The underlying raw code in case it's present.
    #[inline]
    pub fn raw_code(&self) -> Option<i64> {
        self.raw_code
    }

    /// The description reported by GLFW in case it's present.
    #[inline]
    pub fn raw_message(&self) -> Option<&str> {
        self.raw_message.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(raw_code) = self.raw_code {
            write!(f, "[{raw_code:x}] ")?;
        }

        let msg = if let Some(raw_message) = self.raw_message.as_ref() {
            raw_message
        } else {
            self.kind.as_str()
        };

        write!(f, "{msg}")
    }
}

impl std::error::Error for Error {}

/// Build an error with just a kind.
impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { raw_code: None, raw_message: None, kind }
    }
}

/// A list specifying general categories of native access errors.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// The GLFW library or a required entry point in it wasn't found.
    NotFound,

    /// GLFW has not been initialized.
    NotInitialized,

    /// No context is current on the calling thread.
    NoCurrentContext,

    /// An invalid enum value was passed to GLFW.
    InvalidEnum,

    /// An invalid argument value was passed to GLFW.
    InvalidValue,

    /// GLFW failed to allocate memory.
    OutOfMemory,

    /// The requested API is unavailable on the system.
    ApiUnavailable,

    /// The requested API version is unavailable.
    VersionUnavailable,

    /// A platform error that GLFW couldn't classify further.
    PlatformError,

    /// The requested format is unavailable.
    FormatUnavailable,

    /// The window doesn't have a context, or not one of the requested API.
    NoWindowContext,

    /// The requested standard cursor shape is unavailable.
    CursorUnavailable,

    /// The requested feature is not provided by the platform.
    FeatureUnavailable,

    /// The requested feature is not implemented for the platform.
    FeatureUnimplemented,

    /// The platform GLFW runs on doesn't match the requested native object.
    PlatformUnavailable,

    /// The handle is none or was rejected by the native library.
    InvalidHandle,

    /// The operation is not supported by the loaded library.
    NotSupported(&'static str),

    /// The misc error that can't be classified occurred.
    Misc,
}

impl ErrorKind {
    /// Map a GLFW error code to the error kind.
    ///
    /// `GLFW_NO_ERROR` maps to `None`, unknown codes map to
    /// [`ErrorKind::Misc`].
    pub fn from_glfw_code(code: i32) -> Option<Self> {
        use ErrorKind::*;
        let kind = match code {
            0 => return None,
            0x0001_0001 => NotInitialized,
            0x0001_0002 => NoCurrentContext,
            0x0001_0003 => InvalidEnum,
            0x0001_0004 => InvalidValue,
            0x0001_0005 => OutOfMemory,
            0x0001_0006 => ApiUnavailable,
            0x0001_0007 => VersionUnavailable,
            0x0001_0008 => PlatformError,
            0x0001_0009 => FormatUnavailable,
            0x0001_000A => NoWindowContext,
            0x0001_000B => CursorUnavailable,
            0x0001_000C => FeatureUnavailable,
            0x0001_000D => FeatureUnimplemented,
            0x0001_000E => PlatformUnavailable,
            _ => Misc,
        };

        Some(kind)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match *self {
            NotFound => "not found",
            NotInitialized => "GLFW is not initialized",
            NoCurrentContext => "no context is current on this thread",
            InvalidEnum => "an invalid enum value was passed",
            InvalidValue => "an invalid argument value was passed",
            OutOfMemory => "out of memory",
            ApiUnavailable => "the requested API is unavailable",
            VersionUnavailable => "the requested API version is unavailable",
            PlatformError => "platform error",
            FormatUnavailable => "the requested format is unavailable",
            NoWindowContext => "the window has no context of the requested API",
            CursorUnavailable => "the requested cursor is unavailable",
            FeatureUnavailable => "the requested feature is unavailable",
            FeatureUnimplemented => "the requested feature is not implemented",
            PlatformUnavailable => "the requested platform is unavailable",
            InvalidHandle => "argument does not name a valid native object",
            NotSupported(reason) => reason,
            Misc => "misc platform error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glfw_codes() {
        assert_eq!(ErrorKind::from_glfw_code(0), None);
        assert_eq!(ErrorKind::from_glfw_code(0x0001_0001), Some(ErrorKind::NotInitialized));
        assert_eq!(ErrorKind::from_glfw_code(0x0001_000A), Some(ErrorKind::NoWindowContext));
        assert_eq!(ErrorKind::from_glfw_code(0x0001_000E), Some(ErrorKind::PlatformUnavailable));
        assert_eq!(ErrorKind::from_glfw_code(0x0002_0000), Some(ErrorKind::Misc));
    }

    #[test]
    fn display_prefers_native_message() {
        let error =
            Error::from_glfw(0x0001_000A, Some("Window has no EGL context".into())).unwrap();
        assert_eq!(error.to_string(), "[1000a] Window has no EGL context");
        assert_eq!(error.raw_message(), Some("Window has no EGL context"));

        let error = Error::from(ErrorKind::InvalidHandle);
        assert!(error.invalid_handle());
        assert_eq!(error.raw_code(), None);
        assert_eq!(error.to_string(), "argument does not name a valid native object");
    }

    #[test]
    fn not_supported_carries_reason() {
        let error = Error::from(ErrorKind::NotSupported("glfwGetEGLContext is missing"));
        assert!(error.not_supported());
        assert_eq!(error.to_string(), "glfwGetEGLContext is missing");
    }
}
