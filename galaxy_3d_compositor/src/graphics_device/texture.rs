/// Texture trait, pixel formats, texture descriptor, and texture info

use std::sync::Arc;
use bitflags::bitflags;
use crate::error::Result;
use crate::graphics_device::RenderTarget;

/// Pixel format of a render texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum PixelFormat {
    // 8-bit per channel color formats
    R8_UNORM,
    R8G8_UNORM,
    R8G8B8_UNORM,
    R8G8B8A8_UNORM,
    B8G8R8A8_UNORM,

    // Float color formats (shadow maps, HDR)
    R16_FLOAT,
    R16G16_FLOAT,
    R16G16B16A16_FLOAT,
    R32_FLOAT,
    R32G32_FLOAT,
    R32G32B32A32_FLOAT,

    // Depth formats
    D16_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
}

impl PixelFormat {
    /// Size of one pixel in bytes
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::R8_UNORM => 1,
            PixelFormat::R8G8_UNORM => 2,
            PixelFormat::R8G8B8_UNORM => 3,
            PixelFormat::R8G8B8A8_UNORM | PixelFormat::B8G8R8A8_UNORM => 4,
            PixelFormat::R16_FLOAT | PixelFormat::D16_UNORM => 2,
            PixelFormat::R16G16_FLOAT => 4,
            PixelFormat::R16G16B16A16_FLOAT => 8,
            PixelFormat::R32_FLOAT | PixelFormat::D32_FLOAT | PixelFormat::D24_UNORM_S8_UINT => 4,
            PixelFormat::R32G32_FLOAT => 8,
            PixelFormat::R32G32B32A32_FLOAT => 16,
        }
    }

    /// Returns true for depth/stencil formats
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            PixelFormat::D16_UNORM | PixelFormat::D32_FLOAT | PixelFormat::D24_UNORM_S8_UINT
        )
    }

    /// Returns true if hardware gamma-correct writes apply to this format
    ///
    /// sRGB writes only exist for 8-bit per channel color formats.
    pub fn supports_hw_gamma(&self) -> bool {
        matches!(
            self,
            PixelFormat::R8_UNORM
                | PixelFormat::R8G8_UNORM
                | PixelFormat::R8G8B8_UNORM
                | PixelFormat::R8G8B8A8_UNORM
                | PixelFormat::B8G8R8A8_UNORM
        )
    }
}

bitflags! {
    /// Texture usage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        /// Texture can be sampled in shaders
        const SAMPLED = 1 << 0;
        /// Texture can be used as a color render target
        const RENDER_TARGET = 1 << 1;
        /// Texture can be used as depth/stencil attachment
        const DEPTH_STENCIL = 1 << 2;
    }
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a render texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Backing resource name, unique among live textures of the device
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of mip levels beyond the base level
    pub mip_levels: u32,
    /// Pixel format
    pub format: PixelFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Multi-sample count (1 = no FSAA)
    pub sample_count: u32,
    /// Perform sRGB gamma correction on write
    pub hw_gamma_write: bool,
    /// Skip implicit resolves when the texture is sampled
    pub fsaa_explicit_resolve: bool,
    /// Depth buffer pool shared by this target
    pub depth_buffer_id: u16,
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub format: PixelFormat,
    pub usage: TextureUsage,
    pub sample_count: u32,
    pub hw_gamma_write: bool,
    pub fsaa_explicit_resolve: bool,
    pub depth_buffer_id: u16,
}

impl TextureInfo {
    /// Returns true if the texture is multi-sampled
    pub fn is_multisampled(&self) -> bool {
        self.sample_count > 1
    }
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            mip_levels: desc.mip_levels,
            format: desc.format,
            usage: desc.usage,
            sample_count: desc.sample_count,
            hw_gamma_write: desc.hw_gamma_write,
            fsaa_explicit_resolve: desc.fsaa_explicit_resolve,
            depth_buffer_id: desc.depth_buffer_id,
        }
    }
}

// ===== TEXTURE TRAIT =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types. The texture is destroyed
/// when the last reference is dropped.
pub trait Texture: Send + Sync {
    /// Backing resource name
    fn name(&self) -> &str;

    /// Read-only properties of this texture
    fn info(&self) -> &TextureInfo;

    /// Render target view of this texture
    ///
    /// Fails for textures created without `TextureUsage::RENDER_TARGET`.
    fn render_target(&self) -> Result<Arc<dyn RenderTarget>>;
}
