//! Access to the native objects behind GLFW windows and monitors.
//!
//! GLFW exposes the objects it creates on the underlying platform through the
//! entry points of `glfw3native.h`. [`Glfw`] resolves those entry points from
//! a dynamically loaded GLFW and hands the results out as typed [`Handle`]s.
//!
//! When the application links GLFW dynamically, loading the same shared
//! object gives access to the same GLFW instance. A GLFW linked statically
//! into the application is a different instance and its windows can't be
//! queried through this module.

#[cfg(x11_platform)]
use std::ffi::c_ulong;
use std::ffi::{c_char, c_int, c_void, CStr};
use std::fmt;
use std::path::PathBuf;

use bitflags::bitflags;
use libloading::Library;
use log::{debug, warn};
use once_cell::sync::Lazy;

use crate::error::{Error, ErrorKind, Result};
use crate::handle::{Handle, HandleKind};
use crate::kinds::*;
use crate::lib_loading::{load_fn, SymLoading, SymWrapper};

#[cfg(windows)]
const DEFAULT_LIBRARY_PATHS: &[&str] = &["glfw3.dll", "glfw.dll"];
#[cfg(apple)]
const DEFAULT_LIBRARY_PATHS: &[&str] = &["libglfw.3.dylib", "libglfw.dylib"];
#[cfg(not(any(windows, apple)))]
const DEFAULT_LIBRARY_PATHS: &[&str] = &["libglfw.so.3", "libglfw.so"];

static GLFW: Lazy<Result<Glfw>> = Lazy::new(Glfw::open);

type GetErrorFn = unsafe extern "C" fn(*mut *const c_char) -> c_int;
#[cfg(any(egl_backend, x11_platform, wayland_platform))]
type GlobalPtrFn = unsafe extern "C" fn() -> *mut c_void;
type ObjectPtrFn = unsafe extern "C" fn(*mut c_void) -> *mut c_void;
#[cfg(win32_platform)]
type ObjectStrFn = unsafe extern "C" fn(*mut c_void) -> *const c_char;
#[cfg(x11_platform)]
type ObjectXidFn = unsafe extern "C" fn(*mut c_void) -> c_ulong;
#[cfg(cocoa_platform)]
type ObjectU32Fn = unsafe extern "C" fn(*mut c_void) -> u32;

bitflags! {
    /// The families of native access entry points exported by the loaded
    /// GLFW.
    ///
    /// GLFW only exports the entry points of the platforms and context APIs
    /// it was built with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NativeApis: u16 {
        /// `glfwGetEGL*`.
        const EGL     = 0b0000_0000_0001;
        /// `glfwGetGLX*`.
        const GLX     = 0b0000_0000_0010;
        /// `glfwGetWGL*`.
        const WGL     = 0b0000_0000_0100;
        /// `glfwGetNSGL*`.
        const NSGL    = 0b0000_0000_1000;
        /// `glfwGetOSMesa*`.
        const OSMESA  = 0b0000_0001_0000;
        /// `glfwGetWin32*`.
        const WIN32   = 0b0000_0010_0000;
        /// `glfwGetCocoa*`.
        const COCOA   = 0b0000_0100_0000;
        /// `glfwGetX11*`.
        const X11     = 0b0000_1000_0000;
        /// `glfwGetWayland*`.
        const WAYLAND = 0b0001_0000_0000;
        /// `glfwGetError`, GLFW 3.3 and newer.
        const ERROR   = 0b0010_0000_0000;
    }
}

/// The context handle of a window, for whichever API created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawContext {
    /// EGL context.
    #[cfg(egl_backend)]
    Egl(EglContext),

    /// GLX context.
    #[cfg(glx_backend)]
    Glx(GlxContext),

    /// WGL context.
    #[cfg(wgl_backend)]
    Wgl(WglContext),

    /// NSOpenGLContext.
    #[cfg(cgl_backend)]
    Nsgl(NsglContext),

    /// OSMesa context.
    OsMesa(OsMesaContext),
}

/// The resolved native access entry points.
#[derive(Clone, Default)]
pub(crate) struct GlfwSyms {
    pub(crate) get_error: Option<GetErrorFn>,

    #[cfg(egl_backend)]
    pub(crate) get_egl_display: Option<GlobalPtrFn>,
    #[cfg(egl_backend)]
    pub(crate) get_egl_context: Option<ObjectPtrFn>,
    #[cfg(egl_backend)]
    pub(crate) get_egl_surface: Option<ObjectPtrFn>,

    #[cfg(glx_backend)]
    pub(crate) get_glx_context: Option<ObjectPtrFn>,
    #[cfg(glx_backend)]
    pub(crate) get_glx_window: Option<ObjectXidFn>,

    #[cfg(wgl_backend)]
    pub(crate) get_wgl_context: Option<ObjectPtrFn>,

    #[cfg(cgl_backend)]
    pub(crate) get_nsgl_context: Option<ObjectPtrFn>,

    pub(crate) get_osmesa_context: Option<ObjectPtrFn>,

    #[cfg(win32_platform)]
    pub(crate) get_win32_window: Option<ObjectPtrFn>,
    #[cfg(win32_platform)]
    pub(crate) get_win32_adapter: Option<ObjectStrFn>,
    #[cfg(win32_platform)]
    pub(crate) get_win32_monitor: Option<ObjectStrFn>,

    #[cfg(cocoa_platform)]
    pub(crate) get_cocoa_window: Option<ObjectPtrFn>,
    #[cfg(cocoa_platform)]
    pub(crate) get_cocoa_monitor: Option<ObjectU32Fn>,

    #[cfg(x11_platform)]
    pub(crate) get_x11_display: Option<GlobalPtrFn>,
    #[cfg(x11_platform)]
    pub(crate) get_x11_window: Option<ObjectXidFn>,
    #[cfg(x11_platform)]
    pub(crate) get_x11_adapter: Option<ObjectXidFn>,
    #[cfg(x11_platform)]
    pub(crate) get_x11_monitor: Option<ObjectXidFn>,

    #[cfg(wayland_platform)]
    pub(crate) get_wayland_display: Option<GlobalPtrFn>,
    #[cfg(wayland_platform)]
    pub(crate) get_wayland_monitor: Option<ObjectPtrFn>,
    #[cfg(wayland_platform)]
    pub(crate) get_wayland_window: Option<ObjectPtrFn>,
}

impl SymLoading for GlfwSyms {
    unsafe fn load_with(lib: &Library) -> Self {
        let syms = GlfwSyms {
            get_error: load_fn(lib, "glfwGetError"),

            #[cfg(egl_backend)]
            get_egl_display: load_fn(lib, "glfwGetEGLDisplay"),
            #[cfg(egl_backend)]
            get_egl_context: load_fn(lib, "glfwGetEGLContext"),
            #[cfg(egl_backend)]
            get_egl_surface: load_fn(lib, "glfwGetEGLSurface"),

            #[cfg(glx_backend)]
            get_glx_context: load_fn(lib, "glfwGetGLXContext"),
            #[cfg(glx_backend)]
            get_glx_window: load_fn(lib, "glfwGetGLXWindow"),

            #[cfg(wgl_backend)]
            get_wgl_context: load_fn(lib, "glfwGetWGLContext"),

            #[cfg(cgl_backend)]
            get_nsgl_context: load_fn(lib, "glfwGetNSGLContext"),

            get_osmesa_context: load_fn(lib, "glfwGetOSMesaContext"),

            #[cfg(win32_platform)]
            get_win32_window: load_fn(lib, "glfwGetWin32Window"),
            #[cfg(win32_platform)]
            get_win32_adapter: load_fn(lib, "glfwGetWin32Adapter"),
            #[cfg(win32_platform)]
            get_win32_monitor: load_fn(lib, "glfwGetWin32Monitor"),

            #[cfg(cocoa_platform)]
            get_cocoa_window: load_fn(lib, "glfwGetCocoaWindow"),
            #[cfg(cocoa_platform)]
            get_cocoa_monitor: load_fn(lib, "glfwGetCocoaMonitor"),

            #[cfg(x11_platform)]
            get_x11_display: load_fn(lib, "glfwGetX11Display"),
            #[cfg(x11_platform)]
            get_x11_window: load_fn(lib, "glfwGetX11Window"),
            #[cfg(x11_platform)]
            get_x11_adapter: load_fn(lib, "glfwGetX11Adapter"),
            #[cfg(x11_platform)]
            get_x11_monitor: load_fn(lib, "glfwGetX11Monitor"),

            #[cfg(wayland_platform)]
            get_wayland_display: load_fn(lib, "glfwGetWaylandDisplay"),
            #[cfg(wayland_platform)]
            get_wayland_monitor: load_fn(lib, "glfwGetWaylandMonitor"),
            #[cfg(wayland_platform)]
            get_wayland_window: load_fn(lib, "glfwGetWaylandWindow"),
        };

        if syms.get_error.is_none() {
            warn!("glfwGetError is missing, native access failures won't carry GLFW's reason");
        }

        syms
    }
}

impl GlfwSyms {
    fn apis(&self) -> NativeApis {
        let mut apis = NativeApis::empty();
        apis.set(NativeApis::ERROR, self.get_error.is_some());
        apis.set(NativeApis::OSMESA, self.get_osmesa_context.is_some());

        #[cfg(egl_backend)]
        apis.set(
            NativeApis::EGL,
            self.get_egl_display.is_some()
                || self.get_egl_context.is_some()
                || self.get_egl_surface.is_some(),
        );
        #[cfg(glx_backend)]
        apis.set(NativeApis::GLX, self.get_glx_context.is_some() || self.get_glx_window.is_some());
        #[cfg(wgl_backend)]
        apis.set(NativeApis::WGL, self.get_wgl_context.is_some());
        #[cfg(cgl_backend)]
        apis.set(NativeApis::NSGL, self.get_nsgl_context.is_some());
        #[cfg(win32_platform)]
        apis.set(NativeApis::WIN32, self.get_win32_window.is_some());
        #[cfg(cocoa_platform)]
        apis.set(NativeApis::COCOA, self.get_cocoa_window.is_some());
        #[cfg(x11_platform)]
        apis.set(NativeApis::X11, self.get_x11_display.is_some() || self.get_x11_window.is_some());
        #[cfg(wayland_platform)]
        apis.set(
            NativeApis::WAYLAND,
            self.get_wayland_display.is_some() || self.get_wayland_window.is_some(),
        );

        apis
    }
}

/// Builder for a [`Glfw`] loaded from custom locations.
#[derive(Debug, Clone)]
pub struct GlfwLoader {
    paths: Vec<PathBuf>,
    default_paths: bool,
}

impl Default for GlfwLoader {
    fn default() -> Self {
        Self { paths: Vec::new(), default_paths: true }
    }
}

impl GlfwLoader {
    /// Create a new loader searching the platform's default library names.
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Try the library at `path` before the default names.
    ///
    /// Paths are tried in the order they were added.
    #[inline]
    pub fn with_library_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Whether to fall back to the platform's default library names.
    ///
    /// By default `true`.
    #[inline]
    pub fn with_default_paths(mut self, default_paths: bool) -> Self {
        self.default_paths = default_paths;
        self
    }

    /// The library paths in the order they will be tried.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.paths.clone();
        if self.default_paths {
            paths.extend(DEFAULT_LIBRARY_PATHS.iter().map(PathBuf::from));
        }

        paths
    }

    /// Load GLFW and resolve its native access entry points.
    ///
    /// Fails with [`ErrorKind::NotFound`] when none of the paths could be
    /// loaded. Missing entry points are not an error, the corresponding
    /// queries report [`ErrorKind::NotSupported`] instead.
    pub fn load(&self) -> Result<Glfw> {
        let paths = self.search_paths();
        // GLFW does no work at load time besides its static initializers.
        let syms = unsafe { SymWrapper::<GlfwSyms>::new(&paths)? };
        let glfw = Glfw { syms };
        debug!("GLFW native access available for {:?}", glfw.apis());
        Ok(glfw)
    }
}

/// The native access entry points of a loaded GLFW.
#[derive(Clone)]
pub struct Glfw {
    syms: SymWrapper<GlfwSyms>,
}

impl Glfw {
    /// Load GLFW from the platform's default library names.
    pub fn open() -> Result<Self> {
        GlfwLoader::new().load()
    }

    /// The process wide GLFW, loaded on first use.
    pub fn global() -> Result<&'static Glfw> {
        GLFW.as_ref().map_err(Clone::clone)
    }

    #[cfg(test)]
    pub(crate) fn from_syms(syms: GlfwSyms) -> Self {
        Self { syms: SymWrapper::from_static(syms) }
    }

    /// The families of native access entry points the library exports.
    pub fn apis(&self) -> NativeApis {
        self.syms.apis()
    }

    /// The context handle of `window`, for whichever API created it.
    ///
    /// Fails with [`ErrorKind::NoWindowContext`] when the window has no
    /// context of any API known to the loaded library, keeping the last
    /// reason GLFW gave.
    pub fn raw_context(&self, window: Window) -> Result<RawContext> {
        check_input(window)?;
        let mut mismatch = None;

        #[cfg(egl_backend)]
        {
            if let Some(context) = skip_mismatch(&mut mismatch, self.egl_context(window))? {
                return Ok(RawContext::Egl(context));
            }
        }

        #[cfg(glx_backend)]
        {
            if let Some(context) = skip_mismatch(&mut mismatch, self.glx_context(window))? {
                return Ok(RawContext::Glx(context));
            }
        }

        #[cfg(wgl_backend)]
        {
            if let Some(context) = skip_mismatch(&mut mismatch, self.wgl_context(window))? {
                return Ok(RawContext::Wgl(context));
            }
        }

        #[cfg(cgl_backend)]
        {
            if let Some(context) = skip_mismatch(&mut mismatch, self.nsgl_context(window))? {
                return Ok(RawContext::Nsgl(context));
            }
        }

        if let Some(context) = skip_mismatch(&mut mismatch, self.osmesa_context(window))? {
            return Ok(RawContext::OsMesa(context));
        }

        Err(mismatch.unwrap_or_else(|| ErrorKind::NoWindowContext.into()))
    }

    /// The `EGLDisplay` used by GLFW.
    #[cfg(egl_backend)]
    pub fn egl_display(&self) -> Result<EglDisplay> {
        let f = entry_point(self.syms.get_egl_display, "glfwGetEGLDisplay is not exported")?;
        self.check_output(unsafe { f() } as usize)
    }

    /// The `EGLContext` of `window`.
    #[cfg(egl_backend)]
    pub fn egl_context(&self, window: Window) -> Result<EglContext> {
        self.object_ptr(self.syms.get_egl_context, "glfwGetEGLContext is not exported", window)
    }

    /// The `EGLSurface` of `window`.
    #[cfg(egl_backend)]
    pub fn egl_surface(&self, window: Window) -> Result<EglSurface> {
        self.object_ptr(self.syms.get_egl_surface, "glfwGetEGLSurface is not exported", window)
    }

    /// The `GLXContext` of `window`.
    #[cfg(glx_backend)]
    pub fn glx_context(&self, window: Window) -> Result<GlxContext> {
        self.object_ptr(self.syms.get_glx_context, "glfwGetGLXContext is not exported", window)
    }

    /// The `GLXWindow` of `window`.
    #[cfg(glx_backend)]
    pub fn glx_window(&self, window: Window) -> Result<GlxWindow> {
        self.object_xid(self.syms.get_glx_window, "glfwGetGLXWindow is not exported", window)
    }

    /// The `HGLRC` of `window`.
    #[cfg(wgl_backend)]
    pub fn wgl_context(&self, window: Window) -> Result<WglContext> {
        self.object_ptr(self.syms.get_wgl_context, "glfwGetWGLContext is not exported", window)
    }

    /// The `NSOpenGLContext` of `window`.
    #[cfg(cgl_backend)]
    pub fn nsgl_context(&self, window: Window) -> Result<NsglContext> {
        self.object_ptr(self.syms.get_nsgl_context, "glfwGetNSGLContext is not exported", window)
    }

    /// The `OSMesaContext` of `window`.
    pub fn osmesa_context(&self, window: Window) -> Result<OsMesaContext> {
        self.object_ptr(
            self.syms.get_osmesa_context,
            "glfwGetOSMesaContext is not exported",
            window,
        )
    }

    /// The `HWND` of `window`.
    #[cfg(win32_platform)]
    pub fn win32_window(&self, window: Window) -> Result<Win32Window> {
        self.object_ptr(self.syms.get_win32_window, "glfwGetWin32Window is not exported", window)
    }

    /// The adapter device name of `monitor`, e.g. `\\.\DISPLAY1`.
    #[cfg(win32_platform)]
    pub fn win32_adapter(&self, monitor: Monitor) -> Result<String> {
        self.object_str(self.syms.get_win32_adapter, "glfwGetWin32Adapter is not exported", monitor)
    }

    /// The display device name of `monitor`, e.g. `\\.\DISPLAY1\Monitor0`.
    #[cfg(win32_platform)]
    pub fn win32_monitor(&self, monitor: Monitor) -> Result<String> {
        self.object_str(self.syms.get_win32_monitor, "glfwGetWin32Monitor is not exported", monitor)
    }

    /// The `NSWindow` of `window`.
    #[cfg(cocoa_platform)]
    pub fn cocoa_window(&self, window: Window) -> Result<CocoaWindow> {
        self.object_ptr(self.syms.get_cocoa_window, "glfwGetCocoaWindow is not exported", window)
    }

    /// The `CGDirectDisplayID` of `monitor`.
    #[cfg(cocoa_platform)]
    pub fn cocoa_monitor(&self, monitor: Monitor) -> Result<CocoaMonitor> {
        self.object_u32(self.syms.get_cocoa_monitor, "glfwGetCocoaMonitor is not exported", monitor)
    }

    /// The Xlib `Display` used by GLFW.
    #[cfg(x11_platform)]
    pub fn x11_display(&self) -> Result<X11Display> {
        let f = entry_point(self.syms.get_x11_display, "glfwGetX11Display is not exported")?;
        self.check_output(unsafe { f() } as usize)
    }

    /// The Xlib `Window` of `window`.
    #[cfg(x11_platform)]
    pub fn x11_window(&self, window: Window) -> Result<X11Window> {
        self.object_xid(self.syms.get_x11_window, "glfwGetX11Window is not exported", window)
    }

    /// The `RRCrtc` of `monitor`.
    #[cfg(x11_platform)]
    pub fn x11_adapter(&self, monitor: Monitor) -> Result<X11Adapter> {
        self.object_xid(self.syms.get_x11_adapter, "glfwGetX11Adapter is not exported", monitor)
    }

    /// The `RROutput` of `monitor`.
    #[cfg(x11_platform)]
    pub fn x11_monitor(&self, monitor: Monitor) -> Result<X11Monitor> {
        self.object_xid(self.syms.get_x11_monitor, "glfwGetX11Monitor is not exported", monitor)
    }

    /// The `wl_display` used by GLFW.
    #[cfg(wayland_platform)]
    pub fn wayland_display(&self) -> Result<WaylandDisplay> {
        let f =
            entry_point(self.syms.get_wayland_display, "glfwGetWaylandDisplay is not exported")?;
        self.check_output(unsafe { f() } as usize)
    }

    /// The `wl_output` of `monitor`.
    #[cfg(wayland_platform)]
    pub fn wayland_monitor(&self, monitor: Monitor) -> Result<WaylandMonitor> {
        self.object_ptr(
            self.syms.get_wayland_monitor,
            "glfwGetWaylandMonitor is not exported",
            monitor,
        )
    }

    /// The `wl_surface` of `window`.
    #[cfg(wayland_platform)]
    pub fn wayland_window(&self, window: Window) -> Result<WaylandSurface> {
        self.object_ptr(
            self.syms.get_wayland_window,
            "glfwGetWaylandWindow is not exported",
            window,
        )
    }

    fn object_ptr<I: HandleKind, O: HandleKind>(
        &self,
        f: Option<ObjectPtrFn>,
        missing: &'static str,
        object: Handle<I>,
    ) -> Result<Handle<O>> {
        check_input(object)?;
        let f = entry_point(f, missing)?;
        self.check_output(unsafe { f(object.as_ptr()) } as usize)
    }

    #[cfg(x11_platform)]
    fn object_xid<I: HandleKind, O: HandleKind>(
        &self,
        f: Option<ObjectXidFn>,
        missing: &'static str,
        object: Handle<I>,
    ) -> Result<Handle<O>> {
        check_input(object)?;
        let f = entry_point(f, missing)?;
        self.check_output(unsafe { f(object.as_ptr()) } as usize)
    }

    #[cfg(cocoa_platform)]
    fn object_u32<I: HandleKind, O: HandleKind>(
        &self,
        f: Option<ObjectU32Fn>,
        missing: &'static str,
        object: Handle<I>,
    ) -> Result<Handle<O>> {
        check_input(object)?;
        let f = entry_point(f, missing)?;
        self.check_output(unsafe { f(object.as_ptr()) } as usize)
    }

    #[cfg(win32_platform)]
    fn object_str<I: HandleKind>(
        &self,
        f: Option<ObjectStrFn>,
        missing: &'static str,
        object: Handle<I>,
    ) -> Result<String> {
        check_input(object)?;
        let f = entry_point(f, missing)?;
        let name = unsafe { f(object.as_ptr()) };
        if name.is_null() {
            return Err(self.take_error());
        }

        // The string is owned by GLFW and only valid until the monitor goes
        // away, so copy it out right away.
        Ok(unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned())
    }

    fn check_output<K: HandleKind>(&self, raw: usize) -> Result<Handle<K>> {
        match Handle::from_raw(raw).non_none() {
            Some(handle) => Ok(handle),
            None => Err(self.take_error()),
        }
    }

    /// Fetch and clear the last GLFW error of the calling thread.
    fn take_error(&self) -> Error {
        let get_error = match self.syms.get_error {
            Some(get_error) => get_error,
            None => return ErrorKind::InvalidHandle.into(),
        };

        let mut description: *const c_char = std::ptr::null();
        let code = unsafe { get_error(&mut description) };
        let message = if description.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(description) }.to_string_lossy().into_owned())
        };

        Error::from_glfw(code, message).unwrap_or_else(|| ErrorKind::InvalidHandle.into())
    }
}

impl fmt::Debug for Glfw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glfw").field("apis", &self.apis()).finish()
    }
}

fn entry_point<F>(f: Option<F>, reason: &'static str) -> Result<F> {
    f.ok_or_else(|| ErrorKind::NotSupported(reason).into())
}

fn check_input<K: HandleKind>(handle: Handle<K>) -> Result<()> {
    if handle.is_none() {
        Err(ErrorKind::InvalidHandle.into())
    } else {
        Ok(())
    }
}

/// Turn the errors of a context query for the wrong API into `None`.
///
/// The last `NoWindowContext` error is kept in `mismatch`.
fn skip_mismatch<T>(mismatch: &mut Option<Error>, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.error_kind() == ErrorKind::NoWindowContext => {
            *mismatch = Some(err);
            Ok(None)
        },
        Err(err)
            if err.not_supported()
                || matches!(
                    err.error_kind(),
                    ErrorKind::PlatformUnavailable | ErrorKind::InvalidHandle
                ) =>
        {
            Ok(None)
        },
        Err(err) => Err(err),
    }
}
