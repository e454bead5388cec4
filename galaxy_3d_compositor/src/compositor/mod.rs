/// Compositor module - texture definitions, shadow node definitions and
/// their live instances

// Module declarations
pub mod texture_definition;
pub mod shadow_node_def;
pub mod texture_channel;
pub mod shadow_node;
pub mod compositor_manager;

// Re-export main types
pub use texture_definition::{
    BoolSetting, TextureDefinition, TextureDefinitionHandle, TextureDefinitionRegistry,
    TextureSource, MAX_TEXTURE_INDEX,
};
pub use shadow_node_def::ShadowNodeDefinition;
pub use texture_channel::{ChannelTarget, TextureChannel};
pub use shadow_node::ShadowNode;
pub use compositor_manager::{CompositorManager, ShadowNodeKey};
