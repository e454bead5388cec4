/// RenderTarget and MultiRenderTarget traits, and the reference target used
/// to resolve relative texture sizes

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::PixelFormat;

/// Render target trait
///
/// A surface that can receive rendering output and later be sampled.
pub trait RenderTarget: Send + Sync {
    /// Backing resource name
    fn name(&self) -> &str;

    /// Width of the render target in pixels
    fn width(&self) -> u32;

    /// Height of the render target in pixels
    fn height(&self) -> u32;

    /// Pixel format of the render target
    fn format(&self) -> PixelFormat;

    /// Multi-sample count (1 = no FSAA)
    fn sample_count(&self) -> u32;

    /// Whether writes are gamma corrected
    fn hw_gamma_write(&self) -> bool;

    /// Depth buffer pool this target draws its depth buffer from
    fn depth_buffer_id(&self) -> u16;
}

/// Multiple render target trait
///
/// Groups several render targets written by a single pass. Surfaces are bound
/// by slot; slot `i` receives the output of fragment output `i`.
pub trait MultiRenderTarget: Send + Sync {
    /// Backing resource name
    fn name(&self) -> &str;

    /// Bind `target` at `slot`
    ///
    /// Fails if the slot exceeds the device limit, or if the surface size
    /// differs from the surfaces already bound.
    fn bind_surface(&mut self, slot: usize, target: Arc<dyn RenderTarget>) -> Result<()>;

    /// Surface bound at `slot`, if any
    fn surface(&self, slot: usize) -> Option<&Arc<dyn RenderTarget>>;

    /// Number of bound surfaces
    fn surface_count(&self) -> usize;
}

/// Reference target supplied by the execution context
///
/// Texture definitions with a zero width or height are sized relative to this
/// target, and definitions with FSAA enabled inherit its sample count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTarget {
    pub width: u32,
    pub height: u32,
    /// Sample count used by definitions with `fsaa == true`
    pub fsaa_samples: u32,
    /// Gamma write used by definitions with `hw_gamma_write == Undefined`
    pub hw_gamma_write: bool,
}

impl ReferenceTarget {
    /// Single-sampled, linear reference target of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fsaa_samples: 1,
            hw_gamma_write: false,
        }
    }

    pub fn with_fsaa_samples(mut self, samples: u32) -> Self {
        self.fsaa_samples = samples.max(1);
        self
    }

    pub fn with_hw_gamma_write(mut self, enabled: bool) -> Self {
        self.hw_gamma_write = enabled;
        self
    }

    /// Take size, samples and gamma setting from an existing render target
    pub fn from_render_target(target: &dyn RenderTarget) -> Self {
        Self {
            width: target.width(),
            height: target.height(),
            fsaa_samples: target.sample_count().max(1),
            hw_gamma_write: target.hw_gamma_write(),
        }
    }
}
