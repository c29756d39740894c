//! Window state
//!
//! - **`geometry`**: size, rectangle and cursor position value types
//! - **`record`**: the mirrored per-window state and its native resources
//! - **`table`**: the change-tracking store the engine and backend share

pub mod geometry;
pub mod record;
pub mod table;

pub use geometry::{Position, Rect, Size};
pub use record::{NativeWindow, SurfaceDescriptor, WindowRecord};
pub use table::{WindowFields, WindowId, WindowTable};
