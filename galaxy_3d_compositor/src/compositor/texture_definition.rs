/// Texture definitions for compositor nodes and workspaces.
///
/// A `TextureDefinitionRegistry` holds the textures a node (or workspace)
/// declares, in declaration order, plus an index mapping every texture name
/// the owner understands to where the texture lives:
///
/// - **Input**: the texture arrives through input channel `index`
/// - **Local**: the owner creates it from `texture_definitions()[index]`
/// - **Global**: it belongs to the workspace and is looked up by name
///
/// Names are unique across all three sources within one registry.

use rustc_hash::FxHashMap;
use crate::config::GlobalNamePolicy;
use crate::error::Result;
use crate::{engine_bail, engine_err};
use crate::graphics_device::PixelFormat;
use crate::id_string::{IdString, CONCAT_SEPARATOR};

const SOURCE: &str = "galaxy3d::TextureDefinitionRegistry";

/// Number of low bits holding the index in an encoded location
const INDEX_BITS: u32 = 30;

/// Largest index that can be encoded
pub const MAX_TEXTURE_INDEX: usize = (1 << INDEX_BITS) - 1;

/// Where a named texture comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TextureSource {
    /// The texture is supplied through an input channel
    Input = 0,
    /// The owner of the registry creates the texture
    Local = 1,
    /// A workspace-level texture, looked up by name
    Global = 2,
}

impl TextureSource {
    fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(TextureSource::Input),
            1 => Some(TextureSource::Local),
            2 => Some(TextureSource::Global),
            _ => None,
        }
    }
}

/// Pack an `(index, source)` pair into a single value
///
/// The source occupies the two high bits, the index the low 30 bits.
/// `index` must not exceed `MAX_TEXTURE_INDEX`; larger values are masked.
/// Registries reject such indices with `InvalidIndex` before encoding.
pub(crate) fn encode_texture_source(index: usize, source: TextureSource) -> u32 {
    debug_assert!(index <= MAX_TEXTURE_INDEX, "texture index {} cannot be encoded", index);
    ((source as u32) << INDEX_BITS) | (index as u32 & MAX_TEXTURE_INDEX as u32)
}

/// Unpack a value produced by `encode_texture_source`
///
/// Returns `None` if the source tag is not a valid `TextureSource`.
pub(crate) fn decode_texture_source(encoded: u32) -> Option<(usize, TextureSource)> {
    let source = TextureSource::from_tag(encoded >> INDEX_BITS)?;
    Some(((encoded & MAX_TEXTURE_INDEX as u32) as usize, source))
}

/// Tri-state setting; `Undefined` defers to the context default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolSetting {
    #[default]
    Undefined,
    False,
    True,
}

impl BoolSetting {
    /// Resolve against a default used when the setting is `Undefined`
    pub fn resolve(&self, default: bool) -> bool {
        match self {
            BoolSetting::Undefined => default,
            BoolSetting::False => false,
            BoolSetting::True => true,
        }
    }
}

impl From<bool> for BoolSetting {
    fn from(value: bool) -> Self {
        if value { BoolSetting::True } else { BoolSetting::False }
    }
}

/// Declaration of a texture owned by a node or workspace
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDefinition {
    /// Name, unique within the owning registry
    pub name: IdString,
    /// Width in pixels; 0 means `width_factor` times the reference width
    pub width: u32,
    /// Height in pixels; 0 means `height_factor` times the reference height
    pub height: u32,
    pub width_factor: f32,
    pub height_factor: f32,
    /// One surface per format; more than one means MRT
    pub format_list: Vec<PixelFormat>,
    /// true: use the reference target's FSAA setting, false: disable FSAA
    pub fsaa: bool,
    /// Do not resolve FSAA surfaces implicitly when sampled.
    /// Forced to false on devices without explicit resolve support.
    pub fsaa_explicit_resolve: bool,
    /// sRGB gamma correction on write (8-bit per channel formats only)
    pub hw_gamma_write: BoolSetting,
    /// Depth buffer pool id
    pub depth_buffer_id: u16,
}

impl TextureDefinition {
    /// Depth buffer pool used unless a definition picks another one
    pub const DEFAULT_DEPTH_BUFFER_ID: u16 = 1;

    /// Definition with default settings and no formats yet
    pub fn new(name: IdString) -> Self {
        Self {
            name,
            width: 0,
            height: 0,
            width_factor: 1.0,
            height_factor: 1.0,
            format_list: Vec::new(),
            fsaa: true,
            fsaa_explicit_resolve: false,
            hw_gamma_write: BoolSetting::Undefined,
            depth_buffer_id: Self::DEFAULT_DEPTH_BUFFER_ID,
        }
    }

    /// Returns true if this definition describes a multiple render target
    pub fn is_mrt(&self) -> bool {
        self.format_list.len() > 1
    }

    /// Width and height in pixels against a reference size
    ///
    /// Relative dimensions are rounded up and never drop below one pixel.
    pub fn resolved_size(&self, reference_width: u32, reference_height: u32) -> (u32, u32) {
        fn resolve(fixed: u32, factor: f32, reference: u32) -> u32 {
            if fixed != 0 {
                return fixed;
            }
            ((reference as f32 * factor).ceil() as u32).max(1)
        }

        (
            resolve(self.width, self.width_factor, reference_width),
            resolve(self.height, self.height_factor, reference_height),
        )
    }
}

/// Stable handle to a definition inside its registry
///
/// Handles stay valid as more definitions are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureDefinitionHandle(usize);

impl TextureDefinitionHandle {
    /// Position of the definition in declaration order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Texture definitions and name-to-location index of a node or workspace
#[derive(Debug, Clone)]
pub struct TextureDefinitionRegistry {
    /// Source given to names added by `add_texture_definition()`
    default_source: TextureSource,
    global_name_policy: GlobalNamePolicy,
    texture_definitions: Vec<TextureDefinition>,
    name_to_location: FxHashMap<IdString, u32>,
    num_input_channels: usize,
}

impl TextureDefinitionRegistry {
    /// Create an empty registry
    ///
    /// `default_source` is `Local` for node definitions and `Global` for
    /// workspace definitions.
    pub fn new(default_source: TextureSource, global_name_policy: GlobalNamePolicy) -> Self {
        debug_assert!(default_source != TextureSource::Input, "definitions are never inputs");
        Self {
            default_source,
            global_name_policy,
            texture_definitions: Vec::new(),
            name_to_location: FxHashMap::default(),
            num_input_channels: 0,
        }
    }

    /// Registry for a node definition (definitions are local)
    pub fn for_node(global_name_policy: GlobalNamePolicy) -> Self {
        Self::new(TextureSource::Local, global_name_policy)
    }

    /// Registry for a workspace definition (definitions are global)
    pub fn for_workspace(global_name_policy: GlobalNamePolicy) -> Self {
        Self::new(TextureSource::Global, global_name_policy)
    }

    pub fn default_source(&self) -> TextureSource {
        self.default_source
    }

    pub fn global_name_policy(&self) -> &GlobalNamePolicy {
        &self.global_name_policy
    }

    /// Register `name` as living at `(index, source)`
    ///
    /// Returns the interned name for convenience. On error the registry is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidScope` if the name contains `CONCAT_SEPARATOR`, carries the
    ///   global marker and the source is not `Global`, or the source is
    ///   `Global` and the marker is missing
    /// - `InvalidIndex` if `index` exceeds `MAX_TEXTURE_INDEX`
    /// - `DuplicateName` if the name is already registered
    pub fn add_texture_source_name(
        &mut self,
        name: &str,
        index: usize,
        source: TextureSource,
    ) -> Result<IdString> {
        // Backing resource names append `#<id>` and `#<slot>`
        if name.contains(CONCAT_SEPARATOR) {
            engine_bail!(SOURCE, InvalidScope,
                "Texture '{}' must not contain the reserved separator '{}'",
                name, CONCAT_SEPARATOR);
        }

        let is_global_name = self.global_name_policy.is_global_name(name);
        if is_global_name && source != TextureSource::Global {
            engine_bail!(SOURCE, InvalidScope,
                "Texture '{}' uses the global prefix '{}' but its source is {:?}",
                name, self.global_name_policy.prefix, source);
        }
        if !is_global_name && source == TextureSource::Global {
            engine_bail!(SOURCE, InvalidScope,
                "Global texture '{}' must start with the prefix '{}'",
                name, self.global_name_policy.prefix);
        }
        if index > MAX_TEXTURE_INDEX {
            engine_bail!(SOURCE, InvalidIndex,
                "Texture '{}': index {} exceeds the maximum of {}",
                name, index, MAX_TEXTURE_INDEX);
        }

        let id = IdString::new(name);
        if self.name_to_location.contains_key(&id) {
            engine_bail!(SOURCE, DuplicateName,
                "Texture with name '{}' already exists in the same scope", name);
        }

        self.name_to_location.insert(id, encode_texture_source(index, source));
        if source == TextureSource::Input {
            self.num_input_channels += 1;
        }
        Ok(id)
    }

    /// Alias `name` to input channel `channel`
    pub fn add_input_channel(&mut self, name: &str, channel: usize) -> Result<IdString> {
        self.add_texture_source_name(name, channel, TextureSource::Input)
    }

    /// Where the texture called `name` lives
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the name was never registered.
    pub fn texture_source(&self, name: IdString) -> Result<(usize, TextureSource)> {
        match self.name_to_location.get(&name).copied().and_then(decode_texture_source) {
            Some(location) => Ok(location),
            None => Err(engine_err!(SOURCE, NameNotFound,
                "Can't find texture with name '{}'", name)),
        }
    }

    /// Returns true if `name` is registered with any source
    pub fn contains(&self, name: IdString) -> bool {
        self.name_to_location.contains_key(&name)
    }

    /// Number of names bound to input channels
    pub fn num_input_channels(&self) -> usize {
        self.num_input_channels
    }

    /// Reserve room for `additional` more definitions
    pub fn reserve(&mut self, additional: usize) {
        self.texture_definitions.reserve(additional);
        self.name_to_location.reserve(additional);
    }

    /// Declare a new texture called `name` with default settings
    ///
    /// The name is registered with the registry's default source at the
    /// definition's position. Nothing is added if registration fails.
    ///
    /// # Errors
    ///
    /// Same as `add_texture_source_name()`.
    pub fn add_texture_definition(&mut self, name: &str) -> Result<TextureDefinitionHandle> {
        let index = self.texture_definitions.len();
        let id = self.add_texture_source_name(name, index, self.default_source)?;
        self.texture_definitions.push(TextureDefinition::new(id));
        Ok(TextureDefinitionHandle(index))
    }

    /// Get a definition by handle
    pub fn texture_definition(&self, handle: TextureDefinitionHandle) -> Option<&TextureDefinition> {
        self.texture_definitions.get(handle.0)
    }

    /// Get a mutable definition by handle
    pub fn texture_definition_mut(
        &mut self,
        handle: TextureDefinitionHandle,
    ) -> Option<&mut TextureDefinition> {
        self.texture_definitions.get_mut(handle.0)
    }

    /// Handle of the definition `name` resolves to
    ///
    /// Returns `None` for unknown names and for names living elsewhere
    /// (input channels, or globals in a node registry).
    pub fn texture_definition_handle(&self, name: IdString) -> Option<TextureDefinitionHandle> {
        match self.name_to_location.get(&name).copied().and_then(decode_texture_source) {
            Some((index, source))
                if source == self.default_source && index < self.texture_definitions.len() =>
            {
                Some(TextureDefinitionHandle(index))
            }
            _ => None,
        }
    }

    /// All definitions in declaration order
    pub fn texture_definitions(&self) -> &[TextureDefinition] {
        &self.texture_definitions
    }

    pub fn texture_definition_count(&self) -> usize {
        self.texture_definitions.len()
    }
}

#[cfg(test)]
#[path = "texture_definition_tests.rs"]
mod tests;
