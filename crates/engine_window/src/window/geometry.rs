//! Window geometry value types

/// Client-area or framebuffer size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Create a new size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (minimized windows report this)
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Screen-space rectangle: top-left corner plus extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Extent of the rectangle
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Cursor position in window-local coordinates
///
/// Signed because captured drags report positions left of or above the
/// client area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Horizontal offset from the client-area origin
    pub x: f64,
    /// Vertical offset from the client-area origin
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
