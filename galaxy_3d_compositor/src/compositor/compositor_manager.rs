/// Central compositor manager.
///
/// Owns named shadow node definitions and the live shadow node instances
/// created from them. Each instance gets a fresh id, which keeps the backing
/// texture names of concurrently alive instances apart.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::config::CompositorConfig;
use crate::error::Result;
use crate::{engine_bail, engine_err};
use crate::graphics_device::{GraphicsDevice, ReferenceTarget};
use crate::id_string::IdString;
use super::shadow_node::ShadowNode;
use super::shadow_node_def::ShadowNodeDefinition;

const SOURCE: &str = "galaxy3d::CompositorManager";

new_key_type! {
    /// Stable key for a live ShadowNode within a CompositorManager.
    ///
    /// A key becomes invalid only when its own node is destroyed.
    pub struct ShadowNodeKey;
}

pub struct CompositorManager {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: CompositorConfig,
    shadow_node_definitions: FxHashMap<IdString, Arc<ShadowNodeDefinition>>,
    shadow_nodes: SlotMap<ShadowNodeKey, ShadowNode>,
    next_node_id: u32,
}

impl CompositorManager {
    /// Create a manager provisioning textures through `device`
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: CompositorConfig) -> Self {
        Self {
            device,
            config,
            shadow_node_definitions: FxHashMap::default(),
            shadow_nodes: SlotMap::with_key(),
            next_node_id: 0,
        }
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn device(&self) -> &Arc<Mutex<dyn GraphicsDevice>> {
        &self.device
    }

    // ===== DEFINITIONS =====

    /// Start a shadow node definition using this manager's naming policy
    ///
    /// The definition is not registered until passed to
    /// `add_shadow_node_definition()`.
    pub fn new_shadow_node_definition(&self, name: &str) -> ShadowNodeDefinition {
        let mut definition =
            ShadowNodeDefinition::new(name, self.config.global_name_policy.clone());
        definition.reserve(self.config.reserve_hint);
        definition
    }

    /// Register a completed shadow node definition
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if a definition with the same name exists.
    pub fn add_shadow_node_definition(&mut self, definition: ShadowNodeDefinition) -> Result<()> {
        let name = definition.name();
        if self.shadow_node_definitions.contains_key(&name) {
            engine_bail!(SOURCE, DuplicateName,
                "Shadow node definition '{}' already exists", name);
        }

        crate::engine_debug!(SOURCE, "Registered shadow node definition '{}' ({} texture(s))",
            name, definition.textures().texture_definition_count());
        self.shadow_node_definitions.insert(name, Arc::new(definition));
        Ok(())
    }

    pub fn shadow_node_definition(&self, name: IdString) -> Option<&Arc<ShadowNodeDefinition>> {
        self.shadow_node_definitions.get(&name)
    }

    /// Mutable access to a definition
    ///
    /// Returns `None` if the definition doesn't exist or live nodes still
    /// use it: a definition is read-only while instantiated.
    pub fn shadow_node_definition_mut(&mut self, name: IdString) -> Option<&mut ShadowNodeDefinition> {
        self.shadow_node_definitions.get_mut(&name).and_then(Arc::get_mut)
    }

    /// Unregister a definition
    ///
    /// Live nodes created from it keep working.
    pub fn remove_shadow_node_definition(&mut self, name: IdString) -> Option<Arc<ShadowNodeDefinition>> {
        self.shadow_node_definitions.remove(&name)
    }

    pub fn shadow_node_definition_count(&self) -> usize {
        self.shadow_node_definitions.len()
    }

    pub fn shadow_node_definition_names(&self) -> Vec<IdString> {
        self.shadow_node_definitions.keys().copied().collect()
    }

    // ===== NODES =====

    /// Instantiate the shadow node definition called `definition_name`
    ///
    /// # Errors
    ///
    /// - `NameNotFound` if no such definition is registered
    /// - `ResourceCreation` if GPU resources could not be created (nothing
    ///   is kept in that case), or every instance id has been handed out
    pub fn create_shadow_node(
        &mut self,
        definition_name: IdString,
        reference: &ReferenceTarget,
    ) -> Result<ShadowNodeKey> {
        let definition = self.shadow_node_definitions.get(&definition_name).cloned()
            .ok_or_else(|| engine_err!(SOURCE, NameNotFound,
                "Shadow node definition '{}' not found", definition_name))?;

        let id = self.next_node_id;
        self.next_node_id = id.checked_add(1)
            .ok_or_else(|| engine_err!(SOURCE, ResourceCreation,
                "Shadow node instance ids exhausted, '{}' can't be instantiated", definition_name))?;

        let node = {
            let mut device = self.device.lock()
                .map_err(|_| engine_err!(SOURCE, ResourceCreation, "Graphics device lock poisoned"))?;
            ShadowNode::new(id, definition, &mut *device, reference, &self.config)?
        };

        crate::engine_info!(SOURCE, "Shadow node '{}' (#{}) created", definition_name, id);
        Ok(self.shadow_nodes.insert(node))
    }

    pub fn shadow_node(&self, key: ShadowNodeKey) -> Option<&ShadowNode> {
        self.shadow_nodes.get(key)
    }

    /// Destroy a live node and release its GPU resources
    ///
    /// Returns false if the key is stale.
    pub fn destroy_shadow_node(&mut self, key: ShadowNodeKey) -> bool {
        match self.shadow_nodes.remove(key) {
            Some(node) => {
                crate::engine_info!(SOURCE, "Shadow node '{}' (#{}) destroyed", node.name(), node.id());
                true
            }
            None => false,
        }
    }

    pub fn shadow_node_count(&self) -> usize {
        self.shadow_nodes.len()
    }

    /// Live nodes with their keys
    pub fn shadow_nodes(&self) -> impl Iterator<Item = (ShadowNodeKey, &ShadowNode)> {
        self.shadow_nodes.iter()
    }

    /// Destroy all nodes, then all definitions
    pub fn clear(&mut self) {
        self.shadow_nodes.clear();
        self.shadow_node_definitions.clear();
    }
}

#[cfg(test)]
#[path = "compositor_manager_tests.rs"]
mod tests;
