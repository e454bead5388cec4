//! Compositor configuration
//!
//! Policy values consumed by texture definition registries and shadow node
//! instantiation. Construct with `CompositorConfig::default()` and override
//! individual fields as needed.

/// Rule deciding whether a texture name designates a global texture
///
/// Names carrying the marker must be registered with `TextureSource::Global`,
/// and global textures must carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalNamePolicy {
    /// Marker that must appear at the start of every global texture name
    pub prefix: String,
    /// Compare the prefix ignoring ASCII case
    pub ignore_ascii_case: bool,
}

impl GlobalNamePolicy {
    /// Prefix used by authoring tools for global textures
    pub const DEFAULT_PREFIX: &'static str = "global_";

    /// Create a case-sensitive policy with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ignore_ascii_case: false,
        }
    }

    /// Returns true if `name` carries the global marker
    pub fn is_global_name(&self, name: &str) -> bool {
        if self.prefix.is_empty() || name.len() < self.prefix.len() {
            return false;
        }
        match name.get(..self.prefix.len()) {
            Some(head) if self.ignore_ascii_case => head.eq_ignore_ascii_case(&self.prefix),
            Some(head) => head == self.prefix,
            None => false,
        }
    }
}

impl Default for GlobalNamePolicy {
    fn default() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }
}

/// Compositor configuration
#[derive(Debug, Clone)]
pub struct CompositorConfig {
    /// Global texture naming rule
    pub global_name_policy: GlobalNamePolicy,
    /// Mip levels requested for render textures (0 = base level only)
    pub mip_levels: u32,
    /// Capacity reserved up-front by new definition registries
    pub reserve_hint: usize,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            global_name_policy: GlobalNamePolicy::default(),
            mip_levels: 0,
            reserve_hint: 8,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
