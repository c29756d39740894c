//! Native window messages
//!
//! [`RawMessage`] is the message exactly as the OS delivered it. [`Message`]
//! is its decoded form: the message classes the translator understands, with
//! the packed `wparam`/`lparam` fields unpacked. Anything else decodes to
//! [`Message::Other`] and is left to the OS default handler.

use super::NativeHandle;
use crate::input::{Modifiers, MouseButton};
use crate::window::Size;

/// Win32 message and virtual-key codes used by the decoder
pub mod codes {
    #![allow(missing_docs)]

    pub const WM_SIZE: u32 = 0x0005;
    pub const WM_SETFOCUS: u32 = 0x0007;
    pub const WM_KILLFOCUS: u32 = 0x0008;
    pub const WM_CLOSE: u32 = 0x0010;
    pub const WM_KEYDOWN: u32 = 0x0100;
    pub const WM_KEYUP: u32 = 0x0101;
    pub const WM_CHAR: u32 = 0x0102;
    pub const WM_SYSKEYDOWN: u32 = 0x0104;
    pub const WM_SYSKEYUP: u32 = 0x0105;
    pub const WM_MOUSEMOVE: u32 = 0x0200;
    pub const WM_LBUTTONDOWN: u32 = 0x0201;
    pub const WM_LBUTTONUP: u32 = 0x0202;
    pub const WM_RBUTTONDOWN: u32 = 0x0204;
    pub const WM_RBUTTONUP: u32 = 0x0205;
    pub const WM_MBUTTONDOWN: u32 = 0x0207;
    pub const WM_MBUTTONUP: u32 = 0x0208;
    pub const WM_MOUSEWHEEL: u32 = 0x020A;
    pub const WM_XBUTTONDOWN: u32 = 0x020B;
    pub const WM_XBUTTONUP: u32 = 0x020C;

    pub const SIZE_MINIMIZED: usize = 1;
    pub const SIZE_MAXIMIZED: usize = 2;

    pub const XBUTTON1: u16 = 0x0001;
    pub const XBUTTON2: u16 = 0x0002;

    pub const VK_CONTROL: u16 = 0x11;
    pub const VK_MENU: u16 = 0x12;
    pub const VK_F4: u16 = 0x73;
    pub const VK_PROCESSKEY: u16 = 0xE5;

    /// One wheel notch
    pub const WHEEL_DELTA: i16 = 120;
}

use codes::*;

/// A message as delivered by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage {
    /// Window the message was delivered to
    pub window: NativeHandle,
    /// Message identifier (`WM_*`)
    pub id: u32,
    /// First message parameter
    pub wparam: usize,
    /// Second message parameter
    pub lparam: isize,
    /// OS tick count when the message was posted, in milliseconds
    pub time: u32,
    /// Modifier key state captured when the OS handed the message over
    pub mods: Modifiers,
}

impl RawMessage {
    /// Create a raw message with a zero timestamp and no modifiers held
    pub const fn new(window: NativeHandle, id: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            window,
            id,
            wparam,
            lparam,
            time: 0,
            mods: Modifiers::empty(),
        }
    }

    /// Set the message timestamp
    #[must_use]
    pub const fn with_time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    /// Attach the modifier snapshot taken when the message was received
    #[must_use]
    pub const fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    /// Decode into a [`Message`]
    pub fn decode(&self) -> Message {
        Message::decode(self)
    }
}

/// Direction of a key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key went down, or auto-repeated while held
    Down,
    /// Key was released
    Up,
}

/// Unpacked key message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMessage {
    /// Down or up
    pub action: KeyAction,
    /// Sent as `WM_SYSKEY*` (alt held, or F10)
    pub system: bool,
    /// Virtual-key code from `wparam`
    pub virtual_key: u16,
    /// 9-bit scancode: make code plus the extended flag as bit 8
    pub scancode: u16,
    /// Previous key state bit: set when this down message is an auto-repeat
    pub repeat: bool,
    /// Message timestamp
    pub time: u32,
}

impl KeyMessage {
    /// Whether the extended (E0) flag is set
    pub const fn is_extended(&self) -> bool {
        self.scancode & 0x100 != 0
    }
}

/// Decoded message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// The user asked to close the window
    Close,
    /// The client area changed size
    Size {
        /// New client size
        size: Size,
        /// The window was minimized
        minimized: bool,
        /// The window was maximized
        maximized: bool,
    },
    /// Key transition
    Key(KeyMessage),
    /// One UTF-16 code unit of text input
    Char(u16),
    /// Mouse button transition
    MouseButton {
        /// Which button
        button: MouseButton,
        /// Pressed (true) or released (false)
        pressed: bool,
        /// Cursor x in client coordinates
        x: i16,
        /// Cursor y in client coordinates
        y: i16,
    },
    /// Cursor moved inside the client area
    MouseMove {
        /// Cursor x in client coordinates
        x: i16,
        /// Cursor y in client coordinates
        y: i16,
    },
    /// Vertical wheel rotation, in multiples of [`codes::WHEEL_DELTA`] per notch
    MouseWheel {
        /// Signed wheel delta
        delta: i16,
    },
    /// The window received keyboard focus
    FocusGained,
    /// The window lost keyboard focus
    FocusLost,
    /// Not handled by the translator
    Other,
}

const fn low_word(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

const fn high_word(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

impl Message {
    /// Decode a raw OS message
    pub fn decode(raw: &RawMessage) -> Self {
        let lparam = raw.lparam as usize;
        match raw.id {
            WM_CLOSE => Self::Close,
            WM_SIZE => Self::Size {
                size: Size::new(u32::from(low_word(lparam)), u32::from(high_word(lparam))),
                minimized: raw.wparam == SIZE_MINIMIZED,
                maximized: raw.wparam == SIZE_MAXIMIZED,
            },
            WM_KEYDOWN | WM_KEYUP | WM_SYSKEYDOWN | WM_SYSKEYUP => Self::Key(KeyMessage {
                action: if matches!(raw.id, WM_KEYUP | WM_SYSKEYUP) { KeyAction::Up } else { KeyAction::Down },
                system: matches!(raw.id, WM_SYSKEYDOWN | WM_SYSKEYUP),
                virtual_key: low_word(raw.wparam),
                scancode: high_word(lparam) & 0x1FF,
                repeat: lparam & (1 << 30) != 0,
                time: raw.time,
            }),
            WM_CHAR => Self::Char(low_word(raw.wparam)),
            WM_LBUTTONDOWN | WM_LBUTTONUP | WM_RBUTTONDOWN | WM_RBUTTONUP | WM_MBUTTONDOWN
            | WM_MBUTTONUP | WM_XBUTTONDOWN | WM_XBUTTONUP => {
                let button = match raw.id {
                    WM_LBUTTONDOWN | WM_LBUTTONUP => MouseButton::Left,
                    WM_RBUTTONDOWN | WM_RBUTTONUP => MouseButton::Right,
                    WM_MBUTTONDOWN | WM_MBUTTONUP => MouseButton::Middle,
                    _ => match high_word(raw.wparam) {
                        XBUTTON1 => MouseButton::Four,
                        XBUTTON2 => MouseButton::Five,
                        _ => return Self::Other,
                    },
                };
                Self::MouseButton {
                    button,
                    pressed: matches!(raw.id, WM_LBUTTONDOWN | WM_RBUTTONDOWN | WM_MBUTTONDOWN | WM_XBUTTONDOWN),
                    x: low_word(lparam) as i16,
                    y: high_word(lparam) as i16,
                }
            }
            WM_MOUSEMOVE => Self::MouseMove {
                x: low_word(lparam) as i16,
                y: high_word(lparam) as i16,
            },
            WM_MOUSEWHEEL => Self::MouseWheel {
                delta: high_word(raw.wparam) as i16,
            },
            WM_SETFOCUS => Self::FocusGained,
            WM_KILLFOCUS => Self::FocusLost,
            _ => Self::Other,
        }
    }

    /// Whether the translator consumes this message class
    pub const fn is_translated(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: NativeHandle = NativeHandle(0x10);

    fn key_lparam(scancode: u16, repeat: bool, up: bool) -> isize {
        let mut value = 1usize | (usize::from(scancode & 0x1FF) << 16);
        if repeat || up {
            value |= 1 << 30;
        }
        if up {
            value |= 1 << 31;
        }
        value as isize
    }

    #[test]
    fn test_decode_key_down() {
        let raw = RawMessage::new(WINDOW, WM_KEYDOWN, 0x41, key_lparam(0x1E, false, false)).with_time(77);
        let Message::Key(key) = raw.decode() else {
            panic!("expected key message");
        };
        assert_eq!(key.action, KeyAction::Down);
        assert!(!key.system);
        assert!(!key.repeat);
        assert_eq!(key.scancode, 0x1E);
        assert_eq!(key.virtual_key, 0x41);
        assert_eq!(key.time, 77);
    }

    #[test]
    fn test_decode_extended_system_key() {
        let raw = RawMessage::new(WINDOW, WM_SYSKEYUP, usize::from(VK_MENU), key_lparam(0x138, false, true));
        let Message::Key(key) = raw.decode() else {
            panic!("expected key message");
        };
        assert_eq!(key.action, KeyAction::Up);
        assert!(key.system);
        assert!(key.is_extended());
        assert_eq!(key.scancode, 0x138);
    }

    #[test]
    fn test_decode_repeat_flag() {
        let raw = RawMessage::new(WINDOW, WM_KEYDOWN, 0x41, key_lparam(0x1E, true, false));
        assert!(matches!(raw.decode(), Message::Key(KeyMessage { repeat: true, .. })));
    }

    #[test]
    fn test_decode_negative_mouse_coordinates() {
        let lparam = ((-5i16 as u16 as usize) | ((-12i16 as u16 as usize) << 16)) as isize;
        let raw = RawMessage::new(WINDOW, WM_LBUTTONDOWN, 0, lparam);
        assert_eq!(
            raw.decode(),
            Message::MouseButton { button: MouseButton::Left, pressed: true, x: -5, y: -12 }
        );
    }

    #[test]
    fn test_decode_extended_buttons() {
        let four = RawMessage::new(WINDOW, WM_XBUTTONDOWN, usize::from(XBUTTON1) << 16, 0);
        let five = RawMessage::new(WINDOW, WM_XBUTTONUP, usize::from(XBUTTON2) << 16, 0);
        let bogus = RawMessage::new(WINDOW, WM_XBUTTONUP, 0x7 << 16, 0);
        assert!(matches!(four.decode(), Message::MouseButton { button: MouseButton::Four, pressed: true, .. }));
        assert!(matches!(five.decode(), Message::MouseButton { button: MouseButton::Five, pressed: false, .. }));
        assert_eq!(bogus.decode(), Message::Other);
    }

    #[test]
    fn test_decode_wheel_delta_sign() {
        let down = RawMessage::new(WINDOW, WM_MOUSEWHEEL, ((-240i16 as u16 as usize) << 16) | 0x8, 0);
        assert_eq!(down.decode(), Message::MouseWheel { delta: -240 });
    }

    #[test]
    fn test_decode_size() {
        let raw = RawMessage::new(WINDOW, WM_SIZE, 0, (600 << 16) | 800);
        assert_eq!(raw.decode(), Message::Size { size: Size::new(800, 600), minimized: false, maximized: false });
        let minimized = RawMessage::new(WINDOW, WM_SIZE, SIZE_MINIMIZED, 0);
        assert!(matches!(minimized.decode(), Message::Size { minimized: true, .. }));
        let maximized = RawMessage::new(WINDOW, WM_SIZE, SIZE_MAXIMIZED, (1080 << 16) | 1920);
        assert!(matches!(maximized.decode(), Message::Size { maximized: true, minimized: false, .. }));
    }

    #[test]
    fn test_unknown_message_is_other() {
        let raw = RawMessage::new(WINDOW, 0x0024, 0, 0);
        assert_eq!(raw.decode(), Message::Other);
        assert!(!raw.decode().is_translated());
        assert!(RawMessage::new(WINDOW, WM_CLOSE, 0, 0).decode().is_translated());
    }
}
