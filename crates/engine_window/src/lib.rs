//! # Engine Window
//!
//! Win32 window backend for the engine's windowing/event layer.
//!
//! ## Features
//!
//! - **Event Translation**: Native window messages become a portable, ordered [`Event`] stream
//! - **Window State Mirroring**: Size, surface and swap chain tracked per window in a [`WindowTable`]
//! - **Swap Chain Upkeep**: Size changes recreate the swap chain before the tick returns
//! - **Testable Core**: All OS access goes through the [`Platform`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use engine_window::prelude::*;
//!
//! fn run(mut backend: WindowBackend, host: &mut dyn Host) -> Result<(), BackendError> {
//!     let mut windows = WindowTable::new();
//!     windows.insert(WindowRecord::new("Demo", 1280, 720));
//!
//!     loop {
//!         backend.tick(&mut windows, host)?;
//!         for event in backend.drain_events() {
//!             if let Event::Close { .. } = event {
//!                 return Ok(());
//!             }
//!         }
//!         windows.end_tick();
//!     }
//! }
//! ```

pub mod config;
pub mod events;
pub mod foundation;
pub mod gpu;
pub mod input;
pub mod platform;
pub mod translate;
pub mod window;

mod backend;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use backend::{BackendError, Host, HostError, WindowBackend};
pub use events::{Event, EventQueue};
pub use platform::Platform;
pub use window::{WindowId, WindowRecord, WindowTable};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        BackendError, Host, HostError, WindowBackend,
        config::{BackendConfig, Config, ConfigError},
        events::{Event, EventQueue},
        gpu::{Gpu, GpuError, PresentMode, SurfaceHandle, SwapChainDescriptor, SwapChainHandle, TextureFormat},
        input::{Key, Modifiers, MouseButton},
        platform::{Platform, PlatformError},
        window::{Position, Rect, Size, WindowFields, WindowId, WindowRecord, WindowTable},
    };
}
