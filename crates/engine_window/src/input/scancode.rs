//! Scancode to key translation
//!
//! Win32 reports a set-1 make code in bits 16..=23 of a key message's lparam
//! and the "extended" (E0 prefix) flag in bit 24. Together they form a 9-bit
//! scancode, which indexes this table directly.

use super::Key;

/// Number of distinct 9-bit scancodes
pub const SCANCODE_COUNT: usize = 0x200;

static KEYS: [Key; SCANCODE_COUNT] = build_table();

/// Translate a 9-bit scancode into a portable key
///
/// Bits above the ninth are ignored. Scancodes without an assigned key map to
/// [`Key::Unknown`].
pub fn key_from_scancode(scancode: u16) -> Key {
    KEYS[usize::from(scancode) & (SCANCODE_COUNT - 1)]
}

const fn build_table() -> [Key; SCANCODE_COUNT] {
    let mut keys = [Key::Unknown; SCANCODE_COUNT];

    keys[0x00B] = Key::Digit0;
    keys[0x002] = Key::Digit1;
    keys[0x003] = Key::Digit2;
    keys[0x004] = Key::Digit3;
    keys[0x005] = Key::Digit4;
    keys[0x006] = Key::Digit5;
    keys[0x007] = Key::Digit6;
    keys[0x008] = Key::Digit7;
    keys[0x009] = Key::Digit8;
    keys[0x00A] = Key::Digit9;

    keys[0x01E] = Key::A;
    keys[0x030] = Key::B;
    keys[0x02E] = Key::C;
    keys[0x020] = Key::D;
    keys[0x012] = Key::E;
    keys[0x021] = Key::F;
    keys[0x022] = Key::G;
    keys[0x023] = Key::H;
    keys[0x017] = Key::I;
    keys[0x024] = Key::J;
    keys[0x025] = Key::K;
    keys[0x026] = Key::L;
    keys[0x032] = Key::M;
    keys[0x031] = Key::N;
    keys[0x018] = Key::O;
    keys[0x019] = Key::P;
    keys[0x010] = Key::Q;
    keys[0x013] = Key::R;
    keys[0x01F] = Key::S;
    keys[0x014] = Key::T;
    keys[0x016] = Key::U;
    keys[0x02F] = Key::V;
    keys[0x011] = Key::W;
    keys[0x02D] = Key::X;
    keys[0x015] = Key::Y;
    keys[0x02C] = Key::Z;

    keys[0x028] = Key::Apostrophe;
    keys[0x02B] = Key::Backslash;
    keys[0x033] = Key::Comma;
    keys[0x00D] = Key::Equal;
    keys[0x029] = Key::Grave;
    keys[0x01A] = Key::LeftBracket;
    keys[0x00C] = Key::Minus;
    keys[0x034] = Key::Period;
    keys[0x01B] = Key::RightBracket;
    keys[0x027] = Key::Semicolon;
    keys[0x035] = Key::Slash;
    keys[0x056] = Key::NonUsBackslash;

    keys[0x00E] = Key::Backspace;
    keys[0x153] = Key::Delete;
    keys[0x14F] = Key::End;
    keys[0x01C] = Key::Enter;
    keys[0x001] = Key::Escape;
    keys[0x147] = Key::Home;
    keys[0x152] = Key::Insert;
    keys[0x15D] = Key::Menu;
    keys[0x151] = Key::PageDown;
    keys[0x149] = Key::PageUp;
    keys[0x045] = Key::Pause;
    keys[0x039] = Key::Space;
    keys[0x00F] = Key::Tab;
    keys[0x03A] = Key::CapsLock;
    keys[0x145] = Key::NumLock;
    keys[0x046] = Key::ScrollLock;

    keys[0x03B] = Key::F1;
    keys[0x03C] = Key::F2;
    keys[0x03D] = Key::F3;
    keys[0x03E] = Key::F4;
    keys[0x03F] = Key::F5;
    keys[0x040] = Key::F6;
    keys[0x041] = Key::F7;
    keys[0x042] = Key::F8;
    keys[0x043] = Key::F9;
    keys[0x044] = Key::F10;
    keys[0x057] = Key::F11;
    keys[0x058] = Key::F12;
    keys[0x064] = Key::F13;
    keys[0x065] = Key::F14;
    keys[0x066] = Key::F15;
    keys[0x067] = Key::F16;
    keys[0x068] = Key::F17;
    keys[0x069] = Key::F18;
    keys[0x06A] = Key::F19;
    keys[0x06B] = Key::F20;
    keys[0x06C] = Key::F21;
    keys[0x06D] = Key::F22;
    keys[0x06E] = Key::F23;
    keys[0x076] = Key::F24;

    keys[0x038] = Key::LeftAlt;
    keys[0x01D] = Key::LeftControl;
    keys[0x02A] = Key::LeftShift;
    keys[0x15B] = Key::LeftSuper;
    keys[0x137] = Key::PrintScreen;
    keys[0x138] = Key::RightAlt;
    keys[0x11D] = Key::RightControl;
    keys[0x036] = Key::RightShift;
    keys[0x15C] = Key::RightSuper;

    keys[0x150] = Key::Down;
    keys[0x14B] = Key::Left;
    keys[0x14D] = Key::Right;
    keys[0x148] = Key::Up;

    keys[0x052] = Key::Kp0;
    keys[0x04F] = Key::Kp1;
    keys[0x050] = Key::Kp2;
    keys[0x051] = Key::Kp3;
    keys[0x04B] = Key::Kp4;
    keys[0x04C] = Key::Kp5;
    keys[0x04D] = Key::Kp6;
    keys[0x047] = Key::Kp7;
    keys[0x048] = Key::Kp8;
    keys[0x049] = Key::Kp9;
    keys[0x04E] = Key::KpAdd;
    keys[0x053] = Key::KpDecimal;
    keys[0x135] = Key::KpDivide;
    keys[0x11C] = Key::KpEnter;
    keys[0x059] = Key::KpEqual;
    keys[0x037] = Key::KpMultiply;
    keys[0x04A] = Key::KpSubtract;

    keys
}
