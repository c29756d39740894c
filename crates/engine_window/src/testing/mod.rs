//! Scripted doubles for the platform, GPU and host seams

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use crate::backend::{Host, HostError};
use crate::gpu::{Gpu, GpuError, SurfaceHandle, SwapChainDescriptor, SwapChainHandle};
use crate::input::Modifiers;
use crate::platform::message::codes::*;
use crate::platform::{
    CreateWindowDesc, DeviceContext, ModuleHandle, NativeHandle, Platform, PlatformError, PlatformResult,
    RawMessage, WindowStyle,
};
use crate::window::{Rect, Size, WindowId, WindowRecord};

/// Frame added around the client area of a bordered mock window
pub const BORDER: Size = Size::new(16, 39);

/// Value the mock default handler returns
pub const DEFAULT_PROC_RESULT: isize = 0x5A;

/// OS calls with side effects, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RegisterClass(String),
    CreateWindow(NativeHandle),
    DestroyWindow(NativeHandle),
    ReleaseDeviceContext(NativeHandle),
    SetWindowRect(NativeHandle, Rect),
    Show(NativeHandle),
    SetTitle(NativeHandle, String),
    SetClientSize(NativeHandle, Size),
    SetStyle(NativeHandle, WindowStyle),
    DefaultProc(u32),
}

/// Calls that can be scripted to fail
#[derive(Debug, Default, Clone, Copy)]
pub struct Failures {
    pub register_class: bool,
    pub outer_size: bool,
    pub create_window: bool,
    pub device_context: bool,
    pub client_size: bool,
    pub window_rect: bool,
    pub set_title: bool,
}

#[derive(Debug, Clone)]
pub struct MockWindow {
    pub title: String,
    pub style: WindowStyle,
    pub client: Size,
    pub rect: Rect,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct MockState {
    next_handle: isize,
    pub windows: HashMap<NativeHandle, MockWindow>,
    pub queued: HashMap<NativeHandle, VecDeque<RawMessage>>,
    pub calls: Vec<Call>,
    pub fail: Failures,
    /// Key state stamped onto messages as they are posted
    pub modifiers: Modifiers,
    /// Largest client size the mock OS grants
    pub max_client: Option<Size>,
}

impl MockState {
    pub fn created_windows(&self) -> usize {
        self.calls.iter().filter(|call| matches!(call, Call::CreateWindow(_))).count()
    }
}

fn border(style: WindowStyle) -> Size {
    match style {
        WindowStyle::Bordered => BORDER,
        WindowStyle::Borderless => Size::new(0, 0),
    }
}

fn add(a: Size, b: Size) -> Size {
    Size::new(a.width + b.width, a.height + b.height)
}

fn sub(a: Size, b: Size) -> Size {
    Size::new(a.width.saturating_sub(b.width), a.height.saturating_sub(b.height))
}

/// Platform double; clones share one [`MockState`]
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    state: Rc<RefCell<MockState>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> std::cell::RefMut<'_, MockState> {
        self.state.borrow_mut()
    }

    /// Queue a message as if the OS had posted it under the current key state
    pub fn post(&self, message: RawMessage) {
        let mut state = self.state();
        let message = message.with_mods(state.modifiers);
        state.queued.entry(message.window).or_default().push_back(message);
    }

    pub fn window(&self, handle: NativeHandle) -> Option<MockWindow> {
        self.state().windows.get(&handle).cloned()
    }

    fn fail(call: &'static str) -> PlatformError {
        PlatformError::Os {
            call,
            message: "scripted failure".to_string(),
        }
    }
}

impl Platform for MockPlatform {
    fn register_class(&mut self, class_name: &str) -> PlatformResult<()> {
        let mut state = self.state();
        if state.fail.register_class {
            return Err(PlatformError::ClassRegistration("scripted failure".to_string()));
        }
        state.calls.push(Call::RegisterClass(class_name.to_string()));
        Ok(())
    }

    fn module_handle(&self) -> ModuleHandle {
        ModuleHandle(0x40_0000)
    }

    fn outer_size(&self, client: Size, style: WindowStyle) -> PlatformResult<Size> {
        if self.state.borrow().fail.outer_size {
            return Err(Self::fail("AdjustWindowRectEx"));
        }
        Ok(add(client, border(style)))
    }

    fn create_window(&mut self, desc: &CreateWindowDesc<'_>) -> PlatformResult<NativeHandle> {
        let mut state = self.state();
        if state.fail.create_window {
            return Err(PlatformError::WindowCreation("scripted failure".to_string()));
        }
        state.next_handle += 0x10;
        let handle = NativeHandle(state.next_handle);
        let outer = desc.outer_size;
        state.windows.insert(
            handle,
            MockWindow {
                title: desc.title.to_string(),
                style: desc.style,
                client: sub(outer, border(desc.style)),
                rect: Rect::new(100, 100, outer.width, outer.height),
                visible: false,
            },
        );
        state.calls.push(Call::CreateWindow(handle));
        Ok(handle)
    }

    fn destroy_window(&mut self, handle: NativeHandle) {
        let mut state = self.state();
        state.windows.remove(&handle);
        state.queued.remove(&handle);
        state.calls.push(Call::DestroyWindow(handle));
    }

    fn create_device_context(&mut self, handle: NativeHandle) -> PlatformResult<DeviceContext> {
        if self.state().fail.device_context {
            return Err(PlatformError::DeviceContext);
        }
        Ok(DeviceContext(handle.0 + 0x1000))
    }

    fn release_device_context(&mut self, handle: NativeHandle, _context: DeviceContext) {
        self.state().calls.push(Call::ReleaseDeviceContext(handle));
    }

    fn set_window_rect(&mut self, handle: NativeHandle, rect: Rect) -> PlatformResult<()> {
        let mut state = self.state();
        state.calls.push(Call::SetWindowRect(handle, rect));
        let window = state.windows.get_mut(&handle).ok_or_else(|| Self::fail("SetWindowPos"))?;
        window.rect = rect;
        window.client = sub(rect.size(), border(window.style));
        Ok(())
    }

    fn window_rect(&self, handle: NativeHandle) -> PlatformResult<Rect> {
        let state = self.state.borrow();
        if state.fail.window_rect {
            return Err(Self::fail("GetWindowRect"));
        }
        state.windows.get(&handle).map(|window| window.rect).ok_or_else(|| Self::fail("GetWindowRect"))
    }

    fn client_size(&self, handle: NativeHandle) -> PlatformResult<Size> {
        let state = self.state.borrow();
        if state.fail.client_size {
            return Err(Self::fail("GetClientRect"));
        }
        state.windows.get(&handle).map(|window| window.client).ok_or_else(|| Self::fail("GetClientRect"))
    }

    fn show(&mut self, handle: NativeHandle) {
        let mut state = self.state();
        state.calls.push(Call::Show(handle));
        if let Some(window) = state.windows.get_mut(&handle) {
            window.visible = true;
        }
    }

    fn set_title(&mut self, handle: NativeHandle, title: &str) -> PlatformResult<()> {
        let mut state = self.state();
        if state.fail.set_title {
            return Err(Self::fail("SetWindowTextW"));
        }
        state.calls.push(Call::SetTitle(handle, title.to_string()));
        if let Some(window) = state.windows.get_mut(&handle) {
            window.title = title.to_string();
        }
        Ok(())
    }

    fn set_client_size(&mut self, handle: NativeHandle, size: Size, style: WindowStyle) -> PlatformResult<()> {
        let mut state = self.state();
        state.calls.push(Call::SetClientSize(handle, size));
        let granted = state.max_client.map_or(size, |max| {
            Size::new(size.width.min(max.width), size.height.min(max.height))
        });
        let window = state.windows.get_mut(&handle).ok_or_else(|| Self::fail("SetWindowPos"))?;
        let outer = add(granted, border(style));
        window.client = granted;
        window.rect = Rect::new(window.rect.x, window.rect.y, outer.width, outer.height);
        // SetWindowPos sends WM_SIZE synchronously
        state.queued.entry(handle).or_default().push_back(size_message(handle, granted));
        Ok(())
    }

    fn set_style(&mut self, handle: NativeHandle, style: WindowStyle) -> PlatformResult<()> {
        let mut state = self.state();
        state.calls.push(Call::SetStyle(handle, style));
        if let Some(window) = state.windows.get_mut(&handle) {
            window.style = style;
        }
        Ok(())
    }

    fn drain_messages(&mut self, handle: NativeHandle, out: &mut VecDeque<RawMessage>) {
        if let Some(queued) = self.state().queued.get_mut(&handle) {
            out.extend(queued.drain(..));
        }
    }

    fn default_window_proc(&mut self, message: &RawMessage) -> isize {
        self.state().calls.push(Call::DefaultProc(message.id));
        DEFAULT_PROC_RESULT
    }
}

/// GPU double tracking live swap chains
#[derive(Debug, Default)]
pub struct MockGpu {
    next: u64,
    pub created: Vec<(SurfaceHandle, SwapChainDescriptor)>,
    pub released: Vec<SwapChainHandle>,
    pub live: HashSet<SwapChainHandle>,
    pub fail_create: bool,
}

impl Gpu for MockGpu {
    fn create_swap_chain(
        &mut self,
        surface: SurfaceHandle,
        descriptor: &SwapChainDescriptor,
    ) -> Result<SwapChainHandle, GpuError> {
        if self.fail_create {
            return Err(GpuError::SwapChainCreation("scripted failure".to_string()));
        }
        self.next += 1;
        let handle = SwapChainHandle(self.next);
        self.created.push((surface, *descriptor));
        self.live.insert(handle);
        Ok(handle)
    }

    fn release_swap_chain(&mut self, swap_chain: SwapChainHandle) -> Result<(), GpuError> {
        if !self.live.remove(&swap_chain) {
            return Err(GpuError::SwapChainRelease(format!("{swap_chain:?} is not live")));
        }
        self.released.push(swap_chain);
        Ok(())
    }
}

/// Host double that creates a surface and swap chain per window
#[derive(Debug, Default)]
pub struct MockHost {
    pub gpu: MockGpu,
    pub initialized: Vec<WindowId>,
    pub fail_init: bool,
}

impl Host for MockHost {
    fn gpu(&mut self) -> &mut dyn Gpu {
        &mut self.gpu
    }

    fn init_window(&mut self, id: WindowId, record: &mut WindowRecord) -> Result<(), HostError> {
        if self.fail_init {
            return Err(HostError::InitFailed("scripted failure".to_string()));
        }
        let surface = SurfaceHandle(0x100 + self.initialized.len() as u64);
        record.surface = Some(surface);
        record.swap_chain = Some(self.gpu.create_swap_chain(surface, &record.swap_chain_descriptor)?);
        self.initialized.push(id);
        Ok(())
    }
}

fn key_lparam(scancode: u16, previous_down: bool, up: bool) -> isize {
    let mut value = 1usize | (usize::from(scancode & 0x1FF) << 16);
    if previous_down {
        value |= 1 << 30;
    }
    if up {
        value |= 1 << 31;
    }
    value as isize
}

pub fn key_down(window: NativeHandle, virtual_key: u16, scancode: u16, time: u32) -> RawMessage {
    RawMessage::new(window, WM_KEYDOWN, usize::from(virtual_key), key_lparam(scancode, false, false)).with_time(time)
}

pub fn key_repeat(window: NativeHandle, virtual_key: u16, scancode: u16, time: u32) -> RawMessage {
    RawMessage::new(window, WM_KEYDOWN, usize::from(virtual_key), key_lparam(scancode, true, false)).with_time(time)
}

pub fn key_up(window: NativeHandle, virtual_key: u16, scancode: u16, time: u32) -> RawMessage {
    RawMessage::new(window, WM_KEYUP, usize::from(virtual_key), key_lparam(scancode, true, true)).with_time(time)
}

pub fn char_message(window: NativeHandle, unit: u16) -> RawMessage {
    RawMessage::new(window, WM_CHAR, usize::from(unit), 1)
}

pub fn size_message(window: NativeHandle, size: Size) -> RawMessage {
    RawMessage::new(window, WM_SIZE, 0, ((size.height << 16) | (size.width & 0xFFFF)) as isize)
}

pub fn wheel_message(window: NativeHandle, delta: i16) -> RawMessage {
    RawMessage::new(window, WM_MOUSEWHEEL, usize::from(delta as u16) << 16, 0)
}

pub fn close_message(window: NativeHandle) -> RawMessage {
    RawMessage::new(window, WM_CLOSE, 0, 0)
}
