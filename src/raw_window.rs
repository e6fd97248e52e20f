//! Conversions into the [`raw_window_handle`] types.
//!
//! This lets windows created by GLFW be handed to libraries consuming
//! `raw-window-handle`, like surface creation in graphics APIs. The sentinel
//! handle is rejected with [`ErrorKind::InvalidHandle`].

use std::ffi::{c_ulong, c_void};
use std::num::NonZeroIsize;
use std::ptr::NonNull;

use raw_window_handle::{
    RawDisplayHandle, RawWindowHandle, WaylandDisplayHandle, WaylandWindowHandle,
    Win32WindowHandle, XlibDisplayHandle, XlibWindowHandle,
};

use crate::error::{Error, ErrorKind, Result};
use crate::handle::{Handle, HandleKind};
use crate::kinds::*;
#[cfg(any(x11_platform, wayland_platform, win32_platform))]
use crate::native::Glfw;

fn non_null<K: HandleKind>(handle: Handle<K>) -> Result<NonNull<c_void>> {
    NonNull::new(handle.as_ptr()).ok_or_else(|| ErrorKind::InvalidHandle.into())
}

impl TryFrom<Win32Window> for Win32WindowHandle {
    type Error = Error;

    fn try_from(window: Win32Window) -> Result<Self> {
        let hwnd = NonZeroIsize::new(window.as_raw() as isize).ok_or(ErrorKind::InvalidHandle)?;
        Ok(Win32WindowHandle::new(hwnd))
    }
}

impl TryFrom<X11Window> for XlibWindowHandle {
    type Error = Error;

    fn try_from(window: X11Window) -> Result<Self> {
        match window.non_none() {
            Some(window) => Ok(XlibWindowHandle::new(window.as_raw() as c_ulong)),
            None => Err(ErrorKind::InvalidHandle.into()),
        }
    }
}

impl TryFrom<WaylandSurface> for WaylandWindowHandle {
    type Error = Error;

    fn try_from(surface: WaylandSurface) -> Result<Self> {
        Ok(WaylandWindowHandle::new(non_null(surface)?))
    }
}

impl TryFrom<X11Display> for XlibDisplayHandle {
    type Error = Error;

    /// The handle refers to the default screen of the display.
    fn try_from(display: X11Display) -> Result<Self> {
        Ok(XlibDisplayHandle::new(Some(non_null(display)?), 0))
    }
}

impl TryFrom<WaylandDisplay> for WaylandDisplayHandle {
    type Error = Error;

    fn try_from(display: WaylandDisplay) -> Result<Self> {
        Ok(WaylandDisplayHandle::new(non_null(display)?))
    }
}

macro_rules! raw_handle_conversions {
    ($($handle:ty => $raw:ty => $target:ty,)*) => {
        $(
            impl TryFrom<$handle> for $target {
                type Error = Error;

                fn try_from(handle: $handle) -> Result<Self> {
                    <$raw>::try_from(handle).map(From::from)
                }
            }
        )*
    };
}

raw_handle_conversions! {
    Win32Window => Win32WindowHandle => RawWindowHandle,
    X11Window => XlibWindowHandle => RawWindowHandle,
    WaylandSurface => WaylandWindowHandle => RawWindowHandle,
    X11Display => XlibDisplayHandle => RawDisplayHandle,
    WaylandDisplay => WaylandDisplayHandle => RawDisplayHandle,
}

#[cfg(any(x11_platform, wayland_platform, win32_platform))]
impl Glfw {
    /// The [`RawWindowHandle`] of `window`.
    #[cfg(win32_platform)]
    pub fn raw_window_handle(&self, window: Window) -> Result<RawWindowHandle> {
        self.win32_window(window).and_then(RawWindowHandle::try_from)
    }

    /// The [`RawWindowHandle`] of `window` on the window system GLFW runs on.
    #[cfg(not(win32_platform))]
    #[allow(clippy::let_and_return)]
    pub fn raw_window_handle(&self, window: Window) -> Result<RawWindowHandle> {
        let handle = Err(ErrorKind::PlatformUnavailable.into());

        #[cfg(wayland_platform)]
        let handle = or_other_platform(handle, || {
            RawWindowHandle::try_from(self.wayland_window(window)?)
        });

        #[cfg(x11_platform)]
        let handle =
            or_other_platform(handle, || RawWindowHandle::try_from(self.x11_window(window)?));

        handle
    }

    /// The [`RawDisplayHandle`] of the display connection GLFW uses.
    #[cfg(any(x11_platform, wayland_platform))]
    #[allow(clippy::let_and_return)]
    pub fn raw_display_handle(&self) -> Result<RawDisplayHandle> {
        let handle = Err(ErrorKind::PlatformUnavailable.into());

        #[cfg(wayland_platform)]
        let handle =
            or_other_platform(handle, || RawDisplayHandle::try_from(self.wayland_display()?));

        #[cfg(x11_platform)]
        let handle = or_other_platform(handle, || RawDisplayHandle::try_from(self.x11_display()?));

        handle
    }
}

/// Run `next` when `previous` failed because GLFW runs on another window
/// system.
#[cfg(any(x11_platform, wayland_platform))]
fn or_other_platform<T>(previous: Result<T>, next: impl FnOnce() -> Result<T>) -> Result<T> {
    match previous {
        Err(err) if is_other_platform(&err) => next(),
        previous => previous,
    }
}

/// Whether the error means GLFW runs on a different window system.
///
/// GLFW 3.4 reports `GLFW_PLATFORM_UNAVAILABLE`, older versions only export
/// one window system and the entry point is simply missing.
#[cfg(any(x11_platform, wayland_platform))]
fn is_other_platform(err: &Error) -> bool {
    err.not_supported() || err.error_kind() == ErrorKind::PlatformUnavailable
}
