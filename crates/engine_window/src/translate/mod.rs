//! Event translation
//!
//! One [`Translator`] exists per native window. [`Translator::step`] takes the
//! window's recorded size, one decoded message and the message queued right
//! behind it, and returns a [`Transition`]: the events to emit and, for size
//! changes, the size the caller must apply to the window record (swap chain
//! included) before the events are published.
//!
//! The only state carried between steps is the pending high surrogate of a
//! UTF-16 pair.

use crate::events::Event;
use crate::input::{key_from_scancode, Modifiers};
use crate::platform::message::codes::{VK_CONTROL, VK_F4, VK_MENU, VK_PROCESSKEY, WHEEL_DELTA};
use crate::platform::{KeyAction, KeyMessage, Message};
use crate::window::{Position, Size, WindowId};

/// Whether the OS default handler should still run for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    /// The translator consumed the message
    #[default]
    Handled,
    /// Pass the message to the OS default handler
    Default,
}

/// Outcome of translating one message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    /// Events to publish, in order
    pub events: Vec<Event>,
    /// New client size the window record must adopt before `events` are published
    pub resize: Option<Size>,
    /// Whether default OS handling is still required
    pub disposition: Disposition,
}

impl Transition {
    fn handled() -> Self {
        Self::default()
    }

    fn emit(event: Event) -> Self {
        Self {
            events: vec![event],
            ..Self::default()
        }
    }

    fn pass_through() -> Self {
        Self {
            disposition: Disposition::Default,
            ..Self::default()
        }
    }
}

/// Per-window translation state machine
#[derive(Debug, Default)]
pub struct Translator {
    pending_high_surrogate: Option<u16>,
}

impl Translator {
    /// Create a translator with no pending text input
    pub fn new() -> Self {
        Self::default()
    }

    /// High surrogate waiting for its low half
    pub const fn pending_high_surrogate(&self) -> Option<u16> {
        self.pending_high_surrogate
    }

    /// Translate one message
    ///
    /// `mods` is the modifier state captured with the message, not the state
    /// at translation time: a batch drained in one tick may span modifier
    /// presses and releases.
    pub fn step(
        &mut self,
        window: WindowId,
        current: Size,
        message: &Message,
        lookahead: Option<&Message>,
        mods: Modifiers,
    ) -> Transition {
        match *message {
            Message::Close => Transition::emit(Event::Close { window }),
            Message::Size { size, minimized, .. } => {
                if minimized || size.is_empty() || size == current {
                    return Transition::handled();
                }
                Transition {
                    events: vec![Event::WindowResize { window, size }],
                    resize: Some(size),
                    disposition: Disposition::Handled,
                }
            }
            Message::Key(key) => Self::translate_key(window, &key, lookahead, mods),
            Message::Char(unit) => match self.decode_char(unit) {
                Some(codepoint) => Transition::emit(Event::CharInput { window, codepoint }),
                None => Transition::handled(),
            },
            Message::MouseButton { button, pressed, x, y } => {
                let pos = Position::new(f64::from(x), f64::from(y));
                Transition::emit(if pressed {
                    Event::MousePress { window, button, mods, pos }
                } else {
                    Event::MouseRelease { window, button, mods, pos }
                })
            }
            Message::MouseMove { x, y } => Transition::emit(Event::MouseMotion {
                window,
                pos: Position::new(f64::from(x), f64::from(y)),
            }),
            Message::MouseWheel { delta } => Transition::emit(Event::MouseScroll {
                window,
                xoffset: 0.0,
                yoffset: f32::from(delta) / f32::from(WHEEL_DELTA),
            }),
            Message::FocusGained => Transition::emit(Event::FocusGained { window }),
            Message::FocusLost => Transition::emit(Event::FocusLost { window }),
            Message::Other => Transition::pass_through(),
        }
    }

    fn translate_key(
        window: WindowId,
        message: &KeyMessage,
        lookahead: Option<&Message>,
        mods: Modifiers,
    ) -> Transition {
        // IME composition in progress; the real keys arrive separately
        if message.virtual_key == VK_PROCESSKEY {
            return Transition::handled();
        }

        if message.system && message.action == KeyAction::Down && message.virtual_key == VK_F4 {
            return Transition::emit(Event::Close { window });
        }

        if is_synthetic_control(message, lookahead) {
            log::trace!("Dropping synthetic left control preceding right alt");
            return Transition::handled();
        }

        let key = key_from_scancode(message.scancode);
        Transition::emit(match (message.action, message.repeat) {
            (KeyAction::Down, false) => Event::KeyPress { window, key, mods },
            (KeyAction::Down, true) => Event::KeyRepeat { window, key, mods },
            (KeyAction::Up, _) => Event::KeyRelease { window, key, mods },
        })
    }

    fn decode_char(&mut self, unit: u16) -> Option<char> {
        match unit {
            0xD800..=0xDBFF => {
                self.pending_high_surrogate = Some(unit);
                None
            }
            0xDC00..=0xDFFF => {
                let Some(high) = self.pending_high_surrogate.take() else {
                    log::trace!("Dropping unpaired low surrogate {unit:#06x}");
                    return None;
                };
                char::decode_utf16([high, unit]).next()?.ok()
            }
            _ => {
                if let Some(high) = self.pending_high_surrogate.take() {
                    log::trace!("Dropping unpaired high surrogate {high:#06x}");
                }
                char::from_u32(u32::from(unit))
            }
        }
    }
}

/// Right alt on layouts with AltGr arrives as a fake left control followed by
/// the real right alt, both stamped with the same message time.
///
/// Equal timestamps are how the pair is recognised. Timer granularity makes
/// this a heuristic: an unrelated left control pressed in the same
/// millisecond as right alt is dropped too.
fn is_synthetic_control(message: &KeyMessage, lookahead: Option<&Message>) -> bool {
    if message.virtual_key != VK_CONTROL || message.is_extended() {
        return false;
    }
    matches!(
        lookahead,
        Some(Message::Key(next))
            if next.virtual_key == VK_MENU
                && next.is_extended()
                && next.action == message.action
                && next.time == message.time
    )
}
