//! The catalogue of native resource kinds.

macro_rules! handle_kinds {
    ($($(#[$attr:meta])* $kind:ident => $name:literal,)*) => {
        /// Marker types naming the native resource a [`Handle`](crate::Handle) refers to.
        ///
        /// The markers are uninhabited, they only exist at the type level.
        pub mod kind {
            $(
                $(#[$attr])*
                #[derive(Debug)]
                pub enum $kind {}

                impl crate::private::Sealed for $kind {}

                impl crate::handle::HandleKind for $kind {
                    const NAME: &'static str = $name;
                }
            )*
        }

        $(
            $(#[$attr])*
            pub type $kind = Handle<kind::$kind>;
        )*
    };
}

use crate::handle::Handle;

handle_kinds! {
    /// A GLFW window, `GLFWwindow*`.
    Window => "GLFWwindow",
    /// A GLFW monitor, `GLFWmonitor*`.
    Monitor => "GLFWmonitor",
    /// A GLFW cursor, `GLFWcursor*`.
    Cursor => "GLFWcursor",

    /// An EGL display, `EGLDisplay`.
    EglDisplay => "EGLDisplay",
    /// An EGL context, `EGLContext`.
    EglContext => "EGLContext",
    /// An EGL surface, `EGLSurface`.
    EglSurface => "EGLSurface",

    /// A GLX context, `GLXContext`.
    GlxContext => "GLXContext",
    /// A GLX window, `GLXWindow`.
    GlxWindow => "GLXWindow",

    /// A WGL context, `HGLRC`.
    WglContext => "HGLRC",

    /// An NSGL context, `NSOpenGLContext*`.
    NsglContext => "NSOpenGLContext",

    /// An OSMesa context, `OSMesaContext`.
    OsMesaContext => "OSMesaContext",

    /// A Win32 window, `HWND`.
    Win32Window => "HWND",

    /// A Cocoa window, `NSWindow*`.
    CocoaWindow => "NSWindow",
    /// A Cocoa display, `CGDirectDisplayID`.
    CocoaMonitor => "CGDirectDisplayID",

    /// An Xlib display connection, `Display*`.
    X11Display => "Display",
    /// An X11 window, `Window`.
    X11Window => "Window",
    /// An XRandR CRTC of a monitor, `RRCrtc`.
    X11Adapter => "RRCrtc",
    /// An XRandR output of a monitor, `RROutput`.
    X11Monitor => "RROutput",

    /// A Wayland display connection, `wl_display*`.
    WaylandDisplay => "wl_display",
    /// A Wayland output, `wl_output*`.
    WaylandMonitor => "wl_output",
    /// A Wayland surface, `wl_surface*`.
    WaylandSurface => "wl_surface",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HandleKind;

    #[test]
    fn aliases_name_their_kind() {
        assert_eq!(<kind::EglContext as HandleKind>::NAME, "EGLContext");
        assert_eq!(format!("{:?}", Win32Window::from_raw(0x10)), "HWND(0x10)");
        assert_eq!(format!("{:?}", WaylandSurface::NONE), "wl_surface(0x0)");
    }
}
