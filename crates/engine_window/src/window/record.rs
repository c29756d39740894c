//! Mirrored per-window state

use raw_window_handle::{RawDisplayHandle, RawWindowHandle, Win32WindowHandle, WindowsDisplayHandle};

use super::geometry::{Rect, Size};
use crate::gpu::{SurfaceHandle, SwapChainDescriptor, SwapChainHandle};
use crate::platform::{DeviceContext, ModuleHandle, NativeHandle, WindowStyle};

/// What the GPU layer needs to create a surface for a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceDescriptor {
    window: NativeHandle,
    module: ModuleHandle,
}

impl SurfaceDescriptor {
    /// Describe a surface for `window` created by `module`
    pub const fn new(window: NativeHandle, module: ModuleHandle) -> Self {
        Self { window, module }
    }

    /// Target window
    pub const fn window(&self) -> NativeHandle {
        self.window
    }

    /// Owning module
    pub const fn module(&self) -> ModuleHandle {
        self.module
    }

    /// The window as a `raw-window-handle` value for graphics crates
    pub fn raw_window_handle(&self) -> RawWindowHandle {
        let mut handle = Win32WindowHandle::empty();
        handle.hwnd = self.window.0 as *mut std::ffi::c_void;
        handle.hinstance = self.module.0 as *mut std::ffi::c_void;
        RawWindowHandle::Win32(handle)
    }

    /// The matching display handle
    pub fn raw_display_handle(&self) -> RawDisplayHandle {
        RawDisplayHandle::Windows(WindowsDisplayHandle::empty())
    }
}

/// OS resources owned by one created window
///
/// Only the backend constructs this; once a record holds one it keeps it for
/// the rest of the window's life.
#[derive(Debug, PartialEq, Eq)]
pub struct NativeWindow {
    handle: NativeHandle,
    device_context: DeviceContext,
    saved_geometry: Option<Rect>,
    surface_descriptor: SurfaceDescriptor,
}

impl NativeWindow {
    pub(crate) const fn new(
        handle: NativeHandle,
        device_context: DeviceContext,
        saved_geometry: Option<Rect>,
        surface_descriptor: SurfaceDescriptor,
    ) -> Self {
        Self {
            handle,
            device_context,
            saved_geometry,
            surface_descriptor,
        }
    }

    /// OS window handle
    pub const fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// Device context bound to the window
    pub const fn device_context(&self) -> DeviceContext {
        self.device_context
    }

    /// Last known restored outer rectangle
    pub const fn saved_geometry(&self) -> Option<Rect> {
        self.saved_geometry
    }

    pub(crate) fn set_saved_geometry(&mut self, rect: Rect) {
        self.saved_geometry = Some(rect);
    }

    /// Descriptor the GPU surface was (or will be) created from
    pub const fn surface_descriptor(&self) -> &SurfaceDescriptor {
        &self.surface_descriptor
    }
}

/// Engine-visible state of one window
///
/// Size fields hold the last size the OS reported, except between a
/// [`WindowTable::set_size`](super::WindowTable::set_size) request and the
/// next backend tick, which replaces the request with the granted size.
#[derive(Debug)]
pub struct WindowRecord {
    /// Title bar text
    pub title: String,
    /// Client-area width
    pub width: u32,
    /// Client-area height
    pub height: u32,
    /// Presentable width
    pub framebuffer_width: u32,
    /// Presentable height
    pub framebuffer_height: u32,
    /// Title bar and border shown
    pub decorated: bool,
    /// OS resources, present once the window has been created
    pub native: Option<NativeWindow>,
    /// GPU surface, set by the engine in its window init hook
    pub surface: Option<SurfaceHandle>,
    /// Swap chain presenting to `surface`
    pub swap_chain: Option<SwapChainHandle>,
    /// Descriptor `swap_chain` was created from
    pub swap_chain_descriptor: SwapChainDescriptor,
    /// Outer rectangle to restore when the window is first shown
    pub saved_geometry: Option<Rect>,
}

impl WindowRecord {
    /// A decorated window wanting the given client size
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            framebuffer_width: width,
            framebuffer_height: height,
            decorated: true,
            native: None,
            surface: None,
            swap_chain: None,
            swap_chain_descriptor: SwapChainDescriptor::new(width, height),
            saved_geometry: None,
        }
    }

    /// Set whether the window has a frame
    #[must_use]
    pub fn with_decorated(mut self, decorated: bool) -> Self {
        self.decorated = decorated;
        self
    }

    /// Restore this outer rectangle when the window is created
    #[must_use]
    pub fn with_saved_geometry(mut self, rect: Rect) -> Self {
        self.saved_geometry = Some(rect);
        self
    }

    /// Client-area size
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Frame style for the current `decorated` flag
    pub const fn style(&self) -> WindowStyle {
        WindowStyle::from_decorated(self.decorated)
    }

    /// Native handle, if the window exists
    pub fn native_handle(&self) -> Option<NativeHandle> {
        self.native.as_ref().map(NativeWindow::handle)
    }

    /// Store an OS-reported client size in every size field
    pub(crate) fn apply_client_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
        self.framebuffer_width = size.width;
        self.framebuffer_height = size.height;
        self.swap_chain_descriptor = self.swap_chain_descriptor.with_size(size);
    }
}
