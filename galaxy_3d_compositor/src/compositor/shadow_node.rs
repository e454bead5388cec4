/// Shadow node — a live instance of a shadow node definition.
///
/// Construction creates one texture channel per shadow map definition, in
/// declaration order, so channel `i` always belongs to definition `i`.
/// Passes address their targets positionally, so this ordering must hold.
///
/// Backing resource names combine the definition's texture name with the
/// node instance id (`"shadowMap0#7"`), so several instances of the same
/// definition can be alive at once. MRT surfaces append their slot index
/// (`"gbuffer#7#0"`, `"gbuffer#7#1"`, ...). Texture names never contain the
/// separator, so these names cannot collide across instances. They are
/// plain strings and are not interned.

use std::sync::Arc;
use crate::config::CompositorConfig;
use crate::error::Result;
use crate::{engine_bail, engine_err};
use crate::graphics_device::{
    DeviceCapabilities, GraphicsDevice, PixelFormat, ReferenceTarget, Texture, TextureDesc,
    TextureUsage,
};
use crate::id_string::{IdString, CONCAT_SEPARATOR};
use super::shadow_node_def::ShadowNodeDefinition;
use super::texture_channel::{ChannelTarget, TextureChannel};
use super::texture_definition::{TextureDefinition, TextureSource};

const SOURCE: &str = "galaxy3d::ShadowNode";

/// Backing resource name `"<base>#<suffix>"`
fn storage_name(base: impl std::fmt::Display, suffix: impl std::fmt::Display) -> String {
    format!("{}{}{}", base, CONCAT_SEPARATOR, suffix)
}

/// Settings shared by every texture of one definition
struct SurfaceSettings {
    width: u32,
    height: u32,
    mip_levels: u32,
    sample_count: u32,
    hw_gamma_write: bool,
    fsaa_explicit_resolve: bool,
    depth_buffer_id: u16,
}

impl SurfaceSettings {
    fn desc(&self, name: String, format: PixelFormat) -> TextureDesc {
        let usage = if format.is_depth() {
            TextureUsage::RENDER_TARGET | TextureUsage::DEPTH_STENCIL | TextureUsage::SAMPLED
        } else {
            TextureUsage::RENDER_TARGET | TextureUsage::SAMPLED
        };

        TextureDesc {
            name,
            width: self.width,
            height: self.height,
            mip_levels: self.mip_levels,
            format,
            usage,
            sample_count: self.sample_count,
            // sRGB writes only exist for 8-bit per channel formats
            hw_gamma_write: self.hw_gamma_write && format.supports_hw_gamma(),
            fsaa_explicit_resolve: self.fsaa_explicit_resolve,
            depth_buffer_id: self.depth_buffer_id,
        }
    }
}

pub struct ShadowNode {
    id: u32,
    definition: Arc<ShadowNodeDefinition>,
    local_textures: Vec<TextureChannel>,
}

impl ShadowNode {
    /// Instantiate `definition` as node instance `id`
    ///
    /// `reference` sizes relative textures and provides the FSAA and gamma
    /// defaults. Either every channel is created or none is: on failure all
    /// resources created so far are released before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `ResourceCreation` if a definition has no formats, needs more
    /// MRT surfaces than the device supports, or the device fails to create
    /// a texture, render target or MRT.
    pub fn new(
        id: u32,
        definition: Arc<ShadowNodeDefinition>,
        device: &mut dyn GraphicsDevice,
        reference: &ReferenceTarget,
        config: &CompositorConfig,
    ) -> Result<Self> {
        let capabilities = device.capabilities();
        let texture_defs = definition.textures().texture_definitions();
        let mut local_textures = Vec::with_capacity(texture_defs.len());

        for texture_def in texture_defs {
            let texture_name = storage_name(texture_def.name, id);
            let channel = Self::create_channel(
                texture_def,
                &texture_name,
                device,
                reference,
                config,
                &capabilities,
            )
            .map_err(|err| {
                engine_err!(SOURCE, ResourceCreation,
                    "Shadow node '{}' (#{}) failed to create '{}': {}",
                    definition.name(), id, texture_name, err)
            })?;
            local_textures.push(channel);
        }

        crate::engine_debug!(SOURCE, "Shadow node '{}' (#{}) created {} channel(s)",
            definition.name(), id, local_textures.len());

        Ok(Self {
            id,
            definition,
            local_textures,
        })
    }

    fn create_channel(
        texture_def: &TextureDefinition,
        texture_name: &str,
        device: &mut dyn GraphicsDevice,
        reference: &ReferenceTarget,
        config: &CompositorConfig,
        capabilities: &DeviceCapabilities,
    ) -> Result<TextureChannel> {
        let surface_count = texture_def.format_list.len();
        if surface_count == 0 {
            engine_bail!(SOURCE, ResourceCreation,
                "Texture definition '{}' has no pixel format", texture_def.name);
        }
        if surface_count > capabilities.max_multi_render_targets {
            engine_bail!(SOURCE, ResourceCreation,
                "Texture definition '{}' needs {} MRT surfaces, device supports {}",
                texture_def.name, surface_count, capabilities.max_multi_render_targets);
        }

        let fsaa_explicit_resolve = if texture_def.fsaa_explicit_resolve
            && !capabilities.supports_explicit_resolve
        {
            crate::engine_warn!(SOURCE,
                "Explicit resolves are not supported by this device, '{}' will resolve implicitly",
                texture_def.name);
            false
        } else {
            texture_def.fsaa_explicit_resolve
        };

        let (width, height) = texture_def.resolved_size(reference.width, reference.height);
        let settings = SurfaceSettings {
            width,
            height,
            mip_levels: config.mip_levels,
            sample_count: if texture_def.fsaa { reference.fsaa_samples.max(1) } else { 1 },
            hw_gamma_write: texture_def.hw_gamma_write.resolve(reference.hw_gamma_write),
            fsaa_explicit_resolve,
            depth_buffer_id: texture_def.depth_buffer_id,
        };

        if let [format] = texture_def.format_list.as_slice() {
            // Normal RT
            let texture = device.create_texture(settings.desc(texture_name.to_string(), *format))?;
            let render_target = texture.render_target()?;
            return Ok(TextureChannel::new(
                ChannelTarget::RenderTarget(render_target),
                vec![texture],
            ));
        }

        // MRT
        let mut mrt = device.create_multi_render_target(texture_name)?;
        let mut textures: Vec<Arc<dyn Texture>> = Vec::with_capacity(surface_count);
        for (slot, format) in texture_def.format_list.iter().enumerate() {
            let texture = device.create_texture(settings.desc(storage_name(texture_name, slot), *format))?;
            mrt.bind_surface(slot, texture.render_target()?)?;
            textures.push(texture);
        }

        Ok(TextureChannel::new(
            ChannelTarget::MultiRenderTarget(Arc::from(mrt)),
            textures,
        ))
    }

    /// Unique instance id of this node
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Name of the definition this node was created from
    pub fn name(&self) -> IdString {
        self.definition.name()
    }

    pub fn definition(&self) -> &Arc<ShadowNodeDefinition> {
        &self.definition
    }

    /// Channels in definition order
    pub fn local_textures(&self) -> &[TextureChannel] {
        &self.local_textures
    }

    /// Channel created for definition `index`
    pub fn channel(&self, index: usize) -> Option<&TextureChannel> {
        self.local_textures.get(index)
    }

    /// Channel for the texture called `name`
    ///
    /// # Errors
    ///
    /// - `NameNotFound` if the definition doesn't know `name`
    /// - `InvalidScope` if `name` is a global texture (owned by the workspace)
    pub fn texture(&self, name: IdString) -> Result<&TextureChannel> {
        let (index, source) = self.definition.textures().texture_source(name)?;
        match source {
            TextureSource::Local => self.local_textures.get(index).ok_or_else(|| {
                engine_err!(SOURCE, NameNotFound,
                    "Shadow node '{}' has no channel #{} for '{}'", self.name(), index, name)
            }),
            TextureSource::Global | TextureSource::Input => Err(engine_err!(SOURCE, InvalidScope,
                "Texture '{}' is not owned by shadow node '{}' (source {:?})",
                name, self.name(), source)),
        }
    }
}

impl std::fmt::Debug for ShadowNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowNode")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("local_textures", &self.local_textures)
            .finish()
    }
}

#[cfg(test)]
#[path = "shadow_node_tests.rs"]
mod tests;
