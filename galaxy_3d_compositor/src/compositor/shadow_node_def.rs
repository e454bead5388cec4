/// Shadow node definition — the authoring-time description of a shadow node.
///
/// Holds the shadow map textures every instance of the node creates. Shadow
/// nodes are instantiated on demand by regular nodes, so they never receive
/// textures through input channels.

use crate::config::GlobalNamePolicy;
use crate::error::Result;
use crate::engine_bail;
use crate::id_string::IdString;
use super::texture_definition::{
    TextureDefinition, TextureDefinitionHandle, TextureDefinitionRegistry, TextureSource,
};

const SOURCE: &str = "galaxy3d::ShadowNodeDefinition";

#[derive(Debug, Clone)]
pub struct ShadowNodeDefinition {
    name: IdString,
    textures: TextureDefinitionRegistry,
}

impl ShadowNodeDefinition {
    /// Create an empty shadow node definition
    pub fn new(name: &str, global_name_policy: GlobalNamePolicy) -> Self {
        Self {
            name: IdString::new(name),
            textures: TextureDefinitionRegistry::for_node(global_name_policy),
        }
    }

    pub fn name(&self) -> IdString {
        self.name
    }

    /// Texture definitions and name index (read-only)
    pub fn textures(&self) -> &TextureDefinitionRegistry {
        &self.textures
    }

    /// Reserve room for `additional` more shadow map definitions
    pub fn reserve(&mut self, additional: usize) {
        self.textures.reserve(additional);
    }

    /// Declare a new shadow map texture
    ///
    /// See `TextureDefinitionRegistry::add_texture_definition()`.
    pub fn add_texture_definition(&mut self, name: &str) -> Result<TextureDefinitionHandle> {
        self.textures.add_texture_definition(name)
    }

    pub fn texture_definition_mut(
        &mut self,
        handle: TextureDefinitionHandle,
    ) -> Option<&mut TextureDefinition> {
        self.textures.texture_definition_mut(handle)
    }

    /// Register an alias to a local or global texture
    ///
    /// # Errors
    ///
    /// Returns `InvalidScope` for `TextureSource::Input`, in addition to the
    /// errors of `TextureDefinitionRegistry::add_texture_source_name()`.
    pub fn add_texture_source_name(
        &mut self,
        name: &str,
        index: usize,
        source: TextureSource,
    ) -> Result<IdString> {
        if source == TextureSource::Input {
            engine_bail!(SOURCE, InvalidScope,
                "Shadow node '{}' can't bind '{}' to an input channel: shadow nodes have no inputs",
                self.name, name);
        }
        self.textures.add_texture_source_name(name, index, source)
    }
}
