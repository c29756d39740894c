//! Win32 implementation of [`Platform`]
//!
//! The window procedure does not translate anything. Messages the translator
//! understands are parked in a thread-local inbox keyed by window handle and
//! the procedure returns immediately; everything else goes straight to
//! `DefWindowProcW`. [`Platform::drain_messages`] dispatches whatever is posted
//! to the window's queue and then hands over the inbox, so posted and sent
//! messages reach the backend in the order the procedure saw them.
//!
//! Sent messages that arrive outside a drain (the `WM_SIZE` produced by
//! `SetWindowPos`, focus changes during `ShowWindow`, a modal resize loop)
//! wait in the inbox until the window's next drain.

#![allow(unsafe_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::ffi::c_void;

use windows::core::{HSTRING, PCWSTR};
use windows::Win32::Foundation::{GetLastError, ERROR_CLASS_ALREADY_EXISTS, FALSE, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{GetDC, ReleaseDC, HDC};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, VIRTUAL_KEY, VK_CAPITAL, VK_CONTROL, VK_LWIN, VK_MENU, VK_NUMLOCK, VK_RWIN, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect,
    GetMessageTime, GetWindowRect, LoadCursorW, PeekMessageW, RegisterClassExW, SetWindowLongPtrW, SetWindowPos,
    SetWindowTextW, ShowWindow, TranslateMessage, CS_HREDRAW, CS_OWNDC, CS_VREDRAW, CW_USEDEFAULT, GWL_STYLE,
    HMENU, IDC_ARROW, MSG, PM_REMOVE, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOZORDER, SW_SHOW,
    WINDOW_EX_STYLE, WINDOW_STYLE, WNDCLASSEXW, WS_EX_APPWINDOW, WS_OVERLAPPEDWINDOW, WS_POPUP, WS_VISIBLE,
};

use super::{
    CreateWindowDesc, DeviceContext, ModuleHandle, NativeHandle, Platform, PlatformError, PlatformResult,
    RawMessage, WindowStyle,
};
use crate::input::Modifiers;
use crate::window::{Rect, Size};

thread_local! {
    static INBOX: RefCell<HashMap<isize, VecDeque<RawMessage>>> = RefCell::new(HashMap::new());
}

fn hwnd(handle: NativeHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

fn native(hwnd: HWND) -> NativeHandle {
    NativeHandle(hwnd.0 as isize)
}

const fn window_style(style: WindowStyle) -> WINDOW_STYLE {
    match style {
        WindowStyle::Bordered => WS_OVERLAPPEDWINDOW,
        WindowStyle::Borderless => WS_POPUP,
    }
}

const EX_STYLE: WINDOW_EX_STYLE = WS_EX_APPWINDOW;

fn os_error(call: &'static str) -> impl FnOnce(windows::core::Error) -> PlatformError {
    move |err| PlatformError::Os {
        call,
        message: err.to_string(),
    }
}

fn rect_size(rect: &RECT) -> Size {
    Size::new((rect.right - rect.left).max(0) as u32, (rect.bottom - rect.top).max(0) as u32)
}

/// Modifier state as of the message currently being processed
///
/// `GetKeyState` tracks the thread's input queue, so this must run inside the
/// window procedure rather than when the parked message is translated.
fn key_state_modifiers() -> Modifiers {
    fn down(key: VIRTUAL_KEY) -> bool {
        unsafe { GetKeyState(i32::from(key.0)) } < 0
    }
    fn toggled(key: VIRTUAL_KEY) -> bool {
        unsafe { GetKeyState(i32::from(key.0)) } & 1 != 0
    }

    let mut mods = Modifiers::empty();
    mods.set(Modifiers::SHIFT, down(VK_SHIFT));
    mods.set(Modifiers::CONTROL, down(VK_CONTROL));
    mods.set(Modifiers::ALT, down(VK_MENU));
    mods.set(Modifiers::SUPER, down(VK_LWIN) || down(VK_RWIN));
    mods.set(Modifiers::CAPS_LOCK, toggled(VK_CAPITAL));
    mods.set(Modifiers::NUM_LOCK, toggled(VK_NUMLOCK));
    mods
}

unsafe extern "system" fn window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let time = unsafe { GetMessageTime() } as u32;
    let raw = RawMessage::new(native(hwnd), msg, wparam.0, lparam.0).with_time(time);
    if !raw.decode().is_translated() {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }
    INBOX.with(|inbox| {
        inbox
            .borrow_mut()
            .entry(raw.window.0)
            .or_default()
            .push_back(raw.with_mods(key_state_modifiers()));
    });
    LRESULT(0)
}

/// Win32 platform services for the tick thread
#[derive(Debug)]
pub struct Win32Platform {
    module: HINSTANCE,
}

impl Win32Platform {
    /// Bind to the module of the running executable
    pub fn new() -> PlatformResult<Self> {
        let module = unsafe { GetModuleHandleW(PCWSTR::null()) }.map_err(os_error("GetModuleHandleW"))?;
        Ok(Self { module: module.into() })
    }
}

impl Platform for Win32Platform {
    fn register_class(&mut self, class_name: &str) -> PlatformResult<()> {
        let class_name = HSTRING::from(class_name);
        let class = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW | CS_OWNDC,
            lpfnWndProc: Some(window_proc),
            hInstance: self.module,
            hCursor: unsafe { LoadCursorW(HINSTANCE::default(), IDC_ARROW) }.unwrap_or_default(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };

        if unsafe { RegisterClassExW(&class) } != 0 {
            log::debug!("Registered window class {class_name}");
            return Ok(());
        }
        let error = unsafe { GetLastError() };
        if error == ERROR_CLASS_ALREADY_EXISTS {
            return Ok(());
        }
        Err(PlatformError::ClassRegistration(format!("{class_name}: {error:?}")))
    }

    fn module_handle(&self) -> ModuleHandle {
        ModuleHandle(self.module.0 as isize)
    }

    fn outer_size(&self, client: Size, style: WindowStyle) -> PlatformResult<Size> {
        let mut rect = RECT {
            left: 0,
            top: 0,
            right: client.width as i32,
            bottom: client.height as i32,
        };
        unsafe { AdjustWindowRectEx(&mut rect, window_style(style), FALSE, EX_STYLE) }
            .map_err(os_error("AdjustWindowRectEx"))?;
        Ok(rect_size(&rect))
    }

    fn create_window(&mut self, desc: &CreateWindowDesc<'_>) -> PlatformResult<NativeHandle> {
        let hwnd = unsafe {
            CreateWindowExW(
                EX_STYLE,
                &HSTRING::from(desc.class_name),
                &HSTRING::from(desc.title),
                window_style(desc.style),
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                desc.outer_size.width as i32,
                desc.outer_size.height as i32,
                HWND::default(),
                HMENU::default(),
                self.module,
                None,
            )
        }
        .map_err(|err| PlatformError::WindowCreation(err.to_string()))?;
        Ok(native(hwnd))
    }

    fn destroy_window(&mut self, handle: NativeHandle) {
        if let Err(err) = unsafe { DestroyWindow(hwnd(handle)) } {
            log::warn!("DestroyWindow failed for {handle:?}: {err}");
        }
        INBOX.with(|inbox| inbox.borrow_mut().remove(&handle.0));
    }

    fn create_device_context(&mut self, handle: NativeHandle) -> PlatformResult<DeviceContext> {
        let context = unsafe { GetDC(hwnd(handle)) };
        if context.is_invalid() {
            return Err(PlatformError::DeviceContext);
        }
        Ok(DeviceContext(context.0 as isize))
    }

    fn release_device_context(&mut self, handle: NativeHandle, context: DeviceContext) {
        let _ = unsafe { ReleaseDC(hwnd(handle), HDC(context.0 as *mut c_void)) };
    }

    fn set_window_rect(&mut self, handle: NativeHandle, rect: Rect) -> PlatformResult<()> {
        unsafe {
            SetWindowPos(
                hwnd(handle),
                HWND::default(),
                rect.x,
                rect.y,
                rect.width as i32,
                rect.height as i32,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(os_error("SetWindowPos"))
    }

    fn window_rect(&self, handle: NativeHandle) -> PlatformResult<Rect> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd(handle), &mut rect) }.map_err(os_error("GetWindowRect"))?;
        let size = rect_size(&rect);
        Ok(Rect::new(rect.left, rect.top, size.width, size.height))
    }

    fn client_size(&self, handle: NativeHandle) -> PlatformResult<Size> {
        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd(handle), &mut rect) }.map_err(os_error("GetClientRect"))?;
        Ok(rect_size(&rect))
    }

    fn show(&mut self, handle: NativeHandle) {
        // Returns the previous visibility, not an error
        let _ = unsafe { ShowWindow(hwnd(handle), SW_SHOW) };
    }

    fn set_title(&mut self, handle: NativeHandle, title: &str) -> PlatformResult<()> {
        unsafe { SetWindowTextW(hwnd(handle), &HSTRING::from(title)) }.map_err(os_error("SetWindowTextW"))
    }

    fn set_client_size(&mut self, handle: NativeHandle, size: Size, style: WindowStyle) -> PlatformResult<()> {
        let outer = self.outer_size(size, style)?;
        unsafe {
            SetWindowPos(
                hwnd(handle),
                HWND::default(),
                0,
                0,
                outer.width as i32,
                outer.height as i32,
                SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(os_error("SetWindowPos"))
    }

    fn set_style(&mut self, handle: NativeHandle, style: WindowStyle) -> PlatformResult<()> {
        let client = self.client_size(handle)?;
        let bits = window_style(style) | WS_VISIBLE;
        let _ = unsafe { SetWindowLongPtrW(hwnd(handle), GWL_STYLE, bits.0 as isize) };
        let outer = self.outer_size(client, style)?;
        unsafe {
            SetWindowPos(
                hwnd(handle),
                HWND::default(),
                0,
                0,
                outer.width as i32,
                outer.height as i32,
                SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(os_error("SetWindowPos"))
    }

    fn drain_messages(&mut self, handle: NativeHandle, out: &mut VecDeque<RawMessage>) {
        let mut msg = MSG::default();
        unsafe {
            while PeekMessageW(&mut msg, hwnd(handle), 0, 0, PM_REMOVE).as_bool() {
                // Posts WM_CHAR behind the key message being dispatched
                let _ = TranslateMessage(&msg);
                let _ = DispatchMessageW(&msg);
            }
        }
        INBOX.with(|inbox| {
            if let Some(queued) = inbox.borrow_mut().get_mut(&handle.0) {
                out.extend(queued.drain(..));
            }
        });
    }

    fn default_window_proc(&mut self, message: &RawMessage) -> isize {
        unsafe {
            DefWindowProcW(
                hwnd(message.window),
                message.id,
                WPARAM(message.wparam),
                LPARAM(message.lparam),
            )
        }
        .0
    }
}
