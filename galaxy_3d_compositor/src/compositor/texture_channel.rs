/// Texture channel — the runtime counterpart of a texture definition.
///
/// A channel owns the texture(s) created for one definition and the target
/// passes render into: a plain render target for single-format definitions,
/// or a multiple render target binding one surface per format.

use std::fmt;
use std::sync::Arc;
use crate::graphics_device::{MultiRenderTarget, RenderTarget, Texture};

/// Where passes writing to a channel render
#[derive(Clone)]
pub enum ChannelTarget {
    RenderTarget(Arc<dyn RenderTarget>),
    MultiRenderTarget(Arc<dyn MultiRenderTarget>),
}

impl ChannelTarget {
    /// Backing resource name of the target
    pub fn name(&self) -> &str {
        match self {
            ChannelTarget::RenderTarget(rt) => rt.name(),
            ChannelTarget::MultiRenderTarget(mrt) => mrt.name(),
        }
    }

    pub fn as_render_target(&self) -> Option<&Arc<dyn RenderTarget>> {
        match self {
            ChannelTarget::RenderTarget(rt) => Some(rt),
            ChannelTarget::MultiRenderTarget(_) => None,
        }
    }

    pub fn as_multi_render_target(&self) -> Option<&Arc<dyn MultiRenderTarget>> {
        match self {
            ChannelTarget::MultiRenderTarget(mrt) => Some(mrt),
            ChannelTarget::RenderTarget(_) => None,
        }
    }
}

/// Texture handles plus the target they are rendered through
#[derive(Clone)]
pub struct TextureChannel {
    target: ChannelTarget,
    textures: Vec<Arc<dyn Texture>>,
}

impl TextureChannel {
    /// Internal only — built by node instantiation
    pub(crate) fn new(target: ChannelTarget, textures: Vec<Arc<dyn Texture>>) -> Self {
        debug_assert!(!textures.is_empty(), "a channel holds at least one texture");
        Self { target, textures }
    }

    pub fn target(&self) -> &ChannelTarget {
        &self.target
    }

    /// Textures in MRT slot order (a single texture for plain targets)
    pub fn textures(&self) -> &[Arc<dyn Texture>] {
        &self.textures
    }

    /// Returns true if the target is a multiple render target
    pub fn is_mrt(&self) -> bool {
        matches!(self.target, ChannelTarget::MultiRenderTarget(_))
    }
}

impl fmt::Debug for TextureChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.textures.iter().map(|t| t.name()).collect();
        f.debug_struct("TextureChannel")
            .field("target", &self.target.name())
            .field("mrt", &self.is_mrt())
            .field("textures", &names)
            .finish()
    }
}
