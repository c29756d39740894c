//! Native platform abstraction
//!
//! Every operating-system call the backend makes goes through the
//! [`Platform`] trait. The Win32 implementation lives in [`win32`] and is only
//! compiled on Windows; everything above this seam (translation, routing,
//! lifecycle) is plain Rust and runs against any implementation.
//!
//! # Handles
//!
//! OS handles cross the seam as integer newtypes. The backend never
//! dereferences them; it only stores them and hands them back to the platform
//! or to the GPU layer through [`SurfaceDescriptor`](crate::window::SurfaceDescriptor).

pub mod message;
#[cfg(windows)]
pub mod win32;

pub use message::{KeyAction, KeyMessage, Message, RawMessage};

use std::collections::VecDeque;

use thiserror::Error;

use crate::window::{Rect, Size};

/// OS window handle (`HWND` on Win32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub isize);

/// Device context bound to one window (`HDC` on Win32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceContext(pub isize);

/// Handle of the module that owns the window class (`HINSTANCE` on Win32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleHandle(pub isize);

/// Frame style requested for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowStyle {
    /// Title bar, border and system menu
    Bordered,
    /// Client area only
    Borderless,
}

impl WindowStyle {
    /// Style matching a record's `decorated` flag
    pub const fn from_decorated(decorated: bool) -> Self {
        if decorated {
            Self::Bordered
        } else {
            Self::Borderless
        }
    }
}

/// Parameters for creating one OS window
#[derive(Debug, Clone)]
pub struct CreateWindowDesc<'a> {
    /// Registered window class to instantiate
    pub class_name: &'a str,
    /// Title bar text
    pub title: &'a str,
    /// Outer size, decorations included
    pub outer_size: Size,
    /// Frame style
    pub style: WindowStyle,
}

/// Platform-layer errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The window class could not be registered
    #[error("Window class registration failed: {0}")]
    ClassRegistration(String),

    /// The OS refused to create the window
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    /// No device context could be obtained for the window
    #[error("Device context creation failed")]
    DeviceContext,

    /// Any other OS call failure
    #[error("{call} failed: {message}")]
    Os {
        /// Name of the failing OS call
        call: &'static str,
        /// OS-provided description
        message: String,
    },
}

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Operating-system services needed by the window backend
///
/// Implementations own no engine state; per-window bookkeeping stays in the
/// backend's routing table. All methods are called from the tick thread.
pub trait Platform {
    /// Register the backend's window class
    ///
    /// Must succeed when the class already exists.
    fn register_class(&mut self, class_name: &str) -> PlatformResult<()>;

    /// Handle of the module windows are created for
    fn module_handle(&self) -> ModuleHandle;

    /// Outer window size needed for the given client size and style
    fn outer_size(&self, client: Size, style: WindowStyle) -> PlatformResult<Size>;

    /// Create a hidden OS window
    fn create_window(&mut self, desc: &CreateWindowDesc<'_>) -> PlatformResult<NativeHandle>;

    /// Destroy an OS window created by [`Platform::create_window`]
    fn destroy_window(&mut self, handle: NativeHandle);

    /// Obtain the device context bound to a window
    fn create_device_context(&mut self, handle: NativeHandle) -> PlatformResult<DeviceContext>;

    /// Release a device context obtained from [`Platform::create_device_context`]
    fn release_device_context(&mut self, handle: NativeHandle, context: DeviceContext);

    /// Move and resize the outer window rectangle
    fn set_window_rect(&mut self, handle: NativeHandle, rect: Rect) -> PlatformResult<()>;

    /// Current outer window rectangle in screen coordinates
    fn window_rect(&self, handle: NativeHandle) -> PlatformResult<Rect>;

    /// Current client-area size
    fn client_size(&self, handle: NativeHandle) -> PlatformResult<Size>;

    /// Make the window visible
    fn show(&mut self, handle: NativeHandle);

    /// Replace the title bar text
    fn set_title(&mut self, handle: NativeHandle, title: &str) -> PlatformResult<()>;

    /// Resize so the client area matches `size` under `style`
    fn set_client_size(&mut self, handle: NativeHandle, size: Size, style: WindowStyle) -> PlatformResult<()>;

    /// Switch the frame style, keeping the client size
    fn set_style(&mut self, handle: NativeHandle, style: WindowStyle) -> PlatformResult<()>;

    /// Move every message currently queued for `handle` into `out`
    ///
    /// Never blocks waiting for new messages. Messages are appended in OS
    /// delivery order, each stamped with the modifier state at the time the
    /// OS handed it over ([`RawMessage::mods`]).
    fn drain_messages(&mut self, handle: NativeHandle, out: &mut VecDeque<RawMessage>);

    /// Run the OS default handling for a message the backend did not consume
    fn default_window_proc(&mut self, message: &RawMessage) -> isize;
}
