//! Portable input types
//!
//! Keys, mouse buttons and the modifier snapshot carried by input events.
//! Keys are identified by physical position (scancode), not by the
//! character the active layout produces; text arrives separately as
//! [`Event::CharInput`](crate::Event::CharInput).

pub mod scancode;

pub use scancode::key_from_scancode;

use bitflags::bitflags;

/// Physical key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// 0 key on the main row
    Digit0,
    /// 1 key on the main row
    Digit1,
    /// 2 key on the main row
    Digit2,
    /// 3 key on the main row
    Digit3,
    /// 4 key on the main row
    Digit4,
    /// 5 key on the main row
    Digit5,
    /// 6 key on the main row
    Digit6,
    /// 7 key on the main row
    Digit7,
    /// 8 key on the main row
    Digit8,
    /// 9 key on the main row
    Digit9,
    /// F1 key
    F1,
    /// F2 key
    F2,
    /// F3 key
    F3,
    /// F4 key
    F4,
    /// F5 key
    F5,
    /// F6 key
    F6,
    /// F7 key
    F7,
    /// F8 key
    F8,
    /// F9 key
    F9,
    /// F10 key
    F10,
    /// F11 key
    F11,
    /// F12 key
    F12,
    /// F13 key
    F13,
    /// F14 key
    F14,
    /// F15 key
    F15,
    /// F16 key
    F16,
    /// F17 key
    F17,
    /// F18 key
    F18,
    /// F19 key
    F19,
    /// F20 key
    F20,
    /// F21 key
    F21,
    /// F22 key
    F22,
    /// F23 key
    F23,
    /// F24 key
    F24,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Space bar
    Space,
    /// Insert key
    Insert,
    /// Delete key
    Delete,
    /// Home key
    Home,
    /// End key
    End,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// `-` key
    Minus,
    /// `=` key
    Equal,
    /// `[` key
    LeftBracket,
    /// `]` key
    RightBracket,
    /// `\` key
    Backslash,
    /// `;` key
    Semicolon,
    /// `'` key
    Apostrophe,
    /// `,` key
    Comma,
    /// `.` key
    Period,
    /// `/` key
    Slash,
    /// `` ` `` key
    Grave,
    /// Extra key next to left shift on ISO layouts
    NonUsBackslash,
    /// Caps Lock key
    CapsLock,
    /// Num Lock key
    NumLock,
    /// Scroll Lock key
    ScrollLock,
    /// Print Screen key
    PrintScreen,
    /// Pause key
    Pause,
    /// Context menu key
    Menu,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Left control
    LeftControl,
    /// Right control
    RightControl,
    /// Left alt
    LeftAlt,
    /// Right alt (AltGr on some layouts)
    RightAlt,
    /// Left Windows key
    LeftSuper,
    /// Right Windows key
    RightSuper,
    /// Keypad 0
    Kp0,
    /// Keypad 1
    Kp1,
    /// Keypad 2
    Kp2,
    /// Keypad 3
    Kp3,
    /// Keypad 4
    Kp4,
    /// Keypad 5
    Kp5,
    /// Keypad 6
    Kp6,
    /// Keypad 7
    Kp7,
    /// Keypad 8
    Kp8,
    /// Keypad 9
    Kp9,
    /// Keypad `/`
    KpDivide,
    /// Keypad `*`
    KpMultiply,
    /// Keypad `-`
    KpSubtract,
    /// Keypad `+`
    KpAdd,
    /// Keypad Enter
    KpEnter,
    /// Keypad `=`
    KpEqual,
    /// Keypad `.`
    KpDecimal,
    /// Scancode with no assigned key
    Unknown,
}

impl Key {
    /// Whether this is one of the modifier keys
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::LeftShift
                | Self::RightShift
                | Self::LeftControl
                | Self::RightControl
                | Self::LeftAlt
                | Self::RightAlt
                | Self::LeftSuper
                | Self::RightSuper
        )
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// First extended button (usually "back")
    Four,
    /// Second extended button (usually "forward")
    Five,
}

bitflags! {
    /// Modifier snapshot taken when the OS hands a message over
    ///
    /// Lock flags report the toggle state, the others report whether either
    /// the left or the right key is held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key held
        const SHIFT = 1 << 0;
        /// Either control key held
        const CONTROL = 1 << 1;
        /// Either alt key held
        const ALT = 1 << 2;
        /// Either Windows key held
        const SUPER = 1 << 3;
        /// Caps lock toggled on
        const CAPS_LOCK = 1 << 4;
        /// Num lock toggled on
        const NUM_LOCK = 1 << 5;
    }
}
