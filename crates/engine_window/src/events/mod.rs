//! Portable window events
//!
//! Key principles:
//! - One closed enum, one variant per platform occurrence
//! - Every event names the window it came from
//! - FIFO delivery: pop order equals push order

use std::collections::VecDeque;

use crate::input::{Key, Modifiers, MouseButton};
use crate::window::{Position, Size, WindowId};

/// Event produced by the window backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The user asked to close the window
    Close {
        /// Originating window
        window: WindowId,
    },
    /// The client area changed size
    WindowResize {
        /// Originating window
        window: WindowId,
        /// New client size
        size: Size,
    },
    /// A key went down
    KeyPress {
        /// Originating window
        window: WindowId,
        /// Physical key
        key: Key,
        /// Modifier snapshot
        mods: Modifiers,
    },
    /// A held key auto-repeated
    KeyRepeat {
        /// Originating window
        window: WindowId,
        /// Physical key
        key: Key,
        /// Modifier snapshot
        mods: Modifiers,
    },
    /// A key was released
    KeyRelease {
        /// Originating window
        window: WindowId,
        /// Physical key
        key: Key,
        /// Modifier snapshot
        mods: Modifiers,
    },
    /// Text input, one code point at a time
    CharInput {
        /// Originating window
        window: WindowId,
        /// Decoded character
        codepoint: char,
    },
    /// A mouse button went down
    MousePress {
        /// Originating window
        window: WindowId,
        /// Which button
        button: MouseButton,
        /// Modifier snapshot
        mods: Modifiers,
        /// Cursor position in client coordinates
        pos: Position,
    },
    /// A mouse button was released
    MouseRelease {
        /// Originating window
        window: WindowId,
        /// Which button
        button: MouseButton,
        /// Modifier snapshot
        mods: Modifiers,
        /// Cursor position in client coordinates
        pos: Position,
    },
    /// The cursor moved
    MouseMotion {
        /// Originating window
        window: WindowId,
        /// Cursor position in client coordinates
        pos: Position,
    },
    /// The wheel turned; one notch is 1.0
    MouseScroll {
        /// Originating window
        window: WindowId,
        /// Horizontal offset
        xoffset: f32,
        /// Vertical offset, positive away from the user
        yoffset: f32,
    },
    /// The window gained keyboard focus
    FocusGained {
        /// Originating window
        window: WindowId,
    },
    /// The window lost keyboard focus
    FocusLost {
        /// Originating window
        window: WindowId,
    },
}

impl Event {
    /// Window the event came from
    pub const fn window(&self) -> WindowId {
        match *self {
            Self::Close { window }
            | Self::WindowResize { window, .. }
            | Self::KeyPress { window, .. }
            | Self::KeyRepeat { window, .. }
            | Self::KeyRelease { window, .. }
            | Self::CharInput { window, .. }
            | Self::MousePress { window, .. }
            | Self::MouseRelease { window, .. }
            | Self::MouseMotion { window, .. }
            | Self::MouseScroll { window, .. }
            | Self::FocusGained { window }
            | Self::FocusLost { window } => window,
        }
    }
}

/// Ordered, unbounded event queue
///
/// Filled by the backend while it pumps messages, drained by the tick driver
/// once per frame. Single-threaded: both sides run on the tick thread.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Take the oldest event
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, Event> {
        self.events.drain(..)
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discard every queued event
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn window_ids() -> (WindowId, WindowId) {
        let mut ids: SlotMap<WindowId, ()> = SlotMap::with_key();
        (ids.insert(()), ids.insert(()))
    }

    #[test]
    fn test_fifo_order() {
        let (window, _) = window_ids();
        let mut queue = EventQueue::new();
        queue.push(Event::FocusGained { window });
        queue.push(Event::Close { window });
        queue.push(Event::FocusLost { window });

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(Event::FocusGained { window }));
        assert_eq!(queue.pop(), Some(Event::Close { window }));
        assert_eq!(queue.pop(), Some(Event::FocusLost { window }));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_drain_empties_queue() {
        let (window, _) = window_ids();
        let mut queue = EventQueue::new();
        queue.extend([
            Event::MouseMotion { window, pos: Position::new(1.0, 2.0) },
            Event::MouseScroll { window, xoffset: 0.0, yoffset: 1.0 },
        ]);
        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], Event::MouseMotion { .. }));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_window() {
        let (first, second) = window_ids();
        let event = Event::KeyPress { window: second, key: Key::A, mods: Modifiers::SHIFT };
        assert_eq!(event.window(), second);
        assert_ne!(event.window(), first);
        assert_eq!(Event::WindowResize { window: first, size: Size::new(1, 1) }.window(), first);
    }
}
