//! GPU presentation seam
//!
//! The backend does not create devices or surfaces itself. It only needs to
//! rebuild a window's swap chain when the client area changes size, so the
//! GPU layer is consumed through the small [`Gpu`] trait and opaque handles,
//! the same way Vulkan hands out `VkSwapchainKHR` values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::window::Size;

/// Opaque surface handle issued by the GPU layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Opaque swap chain handle issued by the GPU layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapChainHandle(pub u64);

/// Presentable image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureFormat {
    /// 8-bit BGRA, linear
    #[default]
    Bgra8Unorm,
    /// 8-bit BGRA, sRGB encoded
    Bgra8UnormSrgb,
    /// 8-bit RGBA, linear
    Rgba8Unorm,
    /// 16-bit float RGBA
    Rgba16Float,
}

/// Presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PresentMode {
    /// Vertical sync, never tears
    #[default]
    Fifo,
    /// Latest frame wins, never tears
    Mailbox,
    /// No sync, may tear
    Immediate,
}

/// Everything needed to (re)create a swap chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SwapChainDescriptor {
    /// Image width
    pub width: u32,
    /// Image height
    pub height: u32,
    /// Image format
    pub format: TextureFormat,
    /// Presentation mode
    pub present_mode: PresentMode,
}

impl SwapChainDescriptor {
    /// Descriptor with the given size and default format and present mode
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: TextureFormat::Bgra8Unorm,
            present_mode: PresentMode::Fifo,
        }
    }

    /// Same descriptor resized
    #[must_use]
    pub const fn with_size(self, size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            ..self
        }
    }

    /// Image size
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// GPU-layer errors
#[derive(Error, Debug)]
pub enum GpuError {
    /// Swap chain creation failed
    #[error("Swap chain creation failed: {0}")]
    SwapChainCreation(String),

    /// Releasing a swap chain failed
    #[error("Swap chain release failed: {0}")]
    SwapChainRelease(String),
}

/// Swap chain capability consumed by the backend
pub trait Gpu {
    /// Create a swap chain presenting to `surface`
    fn create_swap_chain(
        &mut self,
        surface: SurfaceHandle,
        descriptor: &SwapChainDescriptor,
    ) -> Result<SwapChainHandle, GpuError>;

    /// Release a swap chain; the handle is invalid afterwards
    fn release_swap_chain(&mut self, swap_chain: SwapChainHandle) -> Result<(), GpuError>;
}
