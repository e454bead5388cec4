/// GraphicsDevice trait - render texture factory interface

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{MultiRenderTarget, Texture, TextureDesc};

/// Limits and features reported by a graphics device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// Maximum surfaces bound to one multiple render target
    pub max_multi_render_targets: usize,
    /// Whether multi-sampled textures can be sampled without a resolve
    pub supports_explicit_resolve: bool,
    /// Maximum width or height of a 2D texture
    pub max_texture_size: u32,
    /// Maximum multi-sample count
    pub max_fsaa_samples: u32,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_multi_render_targets: 8,
            supports_explicit_resolve: true,
            max_texture_size: 16384,
            max_fsaa_samples: 8,
        }
    }
}

/// Graphics device trait
///
/// The factory the compositor uses to create render textures and multiple
/// render targets. Implemented by rendering backends; `HeadlessGraphicsDevice`
/// provides a GPU-less implementation.
pub trait GraphicsDevice: Send + Sync {
    /// Create a texture
    ///
    /// # Errors
    ///
    /// Fails if the name is already used by a live texture, the format or
    /// size is unsupported, or the device runs out of memory.
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create an empty multiple render target container
    ///
    /// Surfaces are bound afterwards with `MultiRenderTarget::bind_surface()`.
    fn create_multi_render_target(&mut self, name: &str) -> Result<Box<dyn MultiRenderTarget>>;

    /// Limits and features of this device
    fn capabilities(&self) -> DeviceCapabilities;
}
