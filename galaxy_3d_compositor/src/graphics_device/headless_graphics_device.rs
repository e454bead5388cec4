/// Headless graphics device (no GPU required)
///
/// Validates and records render texture allocations without touching a GPU.
/// Used by content validation tools to check that a compositor setup can be
/// instantiated, and by tests.
///
/// The device enforces the same rules a real backend would report as
/// failures: unique live texture names, supported formats, size and sample
/// limits, MRT slot limits, and an optional memory budget.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashSet;
use crate::error::{Error, Result};
use crate::{engine_bail, engine_err};
use crate::graphics_device::{
    DeviceCapabilities, GraphicsDevice, MultiRenderTarget, PixelFormat, RenderTarget, Texture,
    TextureDesc, TextureInfo, TextureUsage,
};

const SOURCE: &str = "galaxy3d::HeadlessGraphicsDevice";

/// Names and memory of resources that are still alive
#[derive(Default)]
struct LiveResources {
    texture_names: FxHashSet<String>,
    multi_render_target_names: FxHashSet<String>,
    texture_memory: u64,
}

type SharedLiveResources = Arc<Mutex<LiveResources>>;

// ============================================================================
// Headless RenderTarget
// ============================================================================

#[derive(Debug)]
pub struct HeadlessRenderTarget {
    name: String,
    info: TextureInfo,
}

impl RenderTarget for HeadlessRenderTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn width(&self) -> u32 {
        self.info.width
    }

    fn height(&self) -> u32 {
        self.info.height
    }

    fn format(&self) -> PixelFormat {
        self.info.format
    }

    fn sample_count(&self) -> u32 {
        self.info.sample_count
    }

    fn hw_gamma_write(&self) -> bool {
        self.info.hw_gamma_write
    }

    fn depth_buffer_id(&self) -> u16 {
        self.info.depth_buffer_id
    }
}

// ============================================================================
// Headless Texture
// ============================================================================

pub struct HeadlessTexture {
    name: String,
    info: TextureInfo,
    memory: u64,
    render_target: Option<Arc<HeadlessRenderTarget>>,
    live: SharedLiveResources,
}

impl Texture for HeadlessTexture {
    fn name(&self) -> &str {
        &self.name
    }

    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn render_target(&self) -> Result<Arc<dyn RenderTarget>> {
        match &self.render_target {
            Some(rt) => Ok(rt.clone() as Arc<dyn RenderTarget>),
            None => Err(engine_err!(SOURCE, ResourceCreation,
                "Texture '{}' was not created with RENDER_TARGET usage", self.name)),
        }
    }
}

impl Drop for HeadlessTexture {
    fn drop(&mut self) {
        if let Ok(mut live) = self.live.lock() {
            live.texture_names.remove(&self.name);
            live.texture_memory = live.texture_memory.saturating_sub(self.memory);
        }
    }
}

// ============================================================================
// Headless MultiRenderTarget
// ============================================================================

pub struct HeadlessMultiRenderTarget {
    name: String,
    max_surfaces: usize,
    surfaces: Vec<Option<Arc<dyn RenderTarget>>>,
    live: SharedLiveResources,
}

impl MultiRenderTarget for HeadlessMultiRenderTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind_surface(&mut self, slot: usize, target: Arc<dyn RenderTarget>) -> Result<()> {
        if slot >= self.max_surfaces {
            engine_bail!(SOURCE, ResourceCreation,
                "MRT '{}': slot {} exceeds the device limit of {} surfaces",
                self.name, slot, self.max_surfaces);
        }

        let mismatch = self.surfaces.iter().flatten().find(|bound| {
            bound.width() != target.width() || bound.height() != target.height()
        });
        if let Some(bound) = mismatch {
            engine_bail!(SOURCE, ResourceCreation,
                "MRT '{}': surface '{}' is {}x{} but '{}' is {}x{}",
                self.name, target.name(), target.width(), target.height(),
                bound.name(), bound.width(), bound.height());
        }

        if self.surfaces.len() <= slot {
            self.surfaces.resize_with(slot + 1, || None);
        }
        self.surfaces[slot] = Some(target);
        Ok(())
    }

    fn surface(&self, slot: usize) -> Option<&Arc<dyn RenderTarget>> {
        self.surfaces.get(slot).and_then(|s| s.as_ref())
    }

    fn surface_count(&self) -> usize {
        self.surfaces.iter().flatten().count()
    }
}

impl Drop for HeadlessMultiRenderTarget {
    fn drop(&mut self) {
        if let Ok(mut live) = self.live.lock() {
            live.multi_render_target_names.remove(&self.name);
        }
    }
}

// ============================================================================
// Headless GraphicsDevice
// ============================================================================

/// GPU-less graphics device
pub struct HeadlessGraphicsDevice {
    capabilities: DeviceCapabilities,
    unsupported_formats: FxHashSet<PixelFormat>,
    memory_budget: Option<u64>,
    live: SharedLiveResources,
    textures_created: usize,
    multi_render_targets_created: usize,
}

impl HeadlessGraphicsDevice {
    /// Create a device with default capabilities and no memory budget
    pub fn new() -> Self {
        Self::with_capabilities(DeviceCapabilities::default())
    }

    /// Create a device reporting the given capabilities
    pub fn with_capabilities(capabilities: DeviceCapabilities) -> Self {
        Self {
            capabilities,
            unsupported_formats: FxHashSet::default(),
            memory_budget: None,
            live: Arc::new(Mutex::new(LiveResources::default())),
            textures_created: 0,
            multi_render_targets_created: 0,
        }
    }

    /// Reject textures of `format` as if the backend could not render to it
    pub fn with_unsupported_format(mut self, format: PixelFormat) -> Self {
        self.unsupported_formats.insert(format);
        self
    }

    /// Fail with `OutOfMemory` once live textures would exceed `bytes`
    pub fn with_memory_budget(mut self, bytes: u64) -> Self {
        self.memory_budget = Some(bytes);
        self
    }

    /// Number of textures currently alive
    pub fn live_texture_count(&self) -> usize {
        self.live.lock().map(|l| l.texture_names.len()).unwrap_or(0)
    }

    /// Number of multiple render targets currently alive
    pub fn live_multi_render_target_count(&self) -> usize {
        self.live.lock().map(|l| l.multi_render_target_names.len()).unwrap_or(0)
    }

    /// Bytes used by live textures
    pub fn live_texture_memory(&self) -> u64 {
        self.live.lock().map(|l| l.texture_memory).unwrap_or(0)
    }

    /// Returns true if a live texture uses `name`
    pub fn is_texture_name_live(&self, name: &str) -> bool {
        self.live.lock().map(|l| l.texture_names.contains(name)).unwrap_or(false)
    }

    /// Total textures created over the device lifetime
    pub fn textures_created(&self) -> usize {
        self.textures_created
    }

    /// Total multiple render targets created over the device lifetime
    pub fn multi_render_targets_created(&self) -> usize {
        self.multi_render_targets_created
    }

    fn validate_desc(&self, desc: &TextureDesc) -> Result<()> {
        if desc.name.is_empty() {
            engine_bail!(SOURCE, ResourceCreation, "Texture name must not be empty");
        }
        if self.unsupported_formats.contains(&desc.format) {
            engine_bail!(SOURCE, ResourceCreation,
                "Texture '{}': format {:?} is not supported as a render target",
                desc.name, desc.format);
        }
        let max_size = self.capabilities.max_texture_size;
        if desc.width == 0 || desc.height == 0 || desc.width > max_size || desc.height > max_size {
            engine_bail!(SOURCE, ResourceCreation,
                "Texture '{}': size {}x{} outside 1..={}",
                desc.name, desc.width, desc.height, max_size);
        }
        if desc.sample_count == 0 || desc.sample_count > self.capabilities.max_fsaa_samples {
            engine_bail!(SOURCE, ResourceCreation,
                "Texture '{}': {} samples not supported (max {})",
                desc.name, desc.sample_count, self.capabilities.max_fsaa_samples);
        }
        if desc.fsaa_explicit_resolve && !self.capabilities.supports_explicit_resolve {
            engine_bail!(SOURCE, ResourceCreation,
                "Texture '{}': explicit resolves are not supported by this device", desc.name);
        }
        Ok(())
    }
}

impl Default for HeadlessGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for HeadlessGraphicsDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        self.validate_desc(&desc)?;

        let memory = desc.width as u64
            * desc.height as u64
            * desc.format.bytes_per_pixel() as u64
            * desc.sample_count as u64;

        {
            let mut live = self.live.lock()
                .map_err(|_| engine_err!(SOURCE, ResourceCreation, "Live resource lock poisoned"))?;

            if live.texture_names.contains(&desc.name) {
                engine_bail!(SOURCE, ResourceCreation,
                    "Texture '{}' already exists", desc.name);
            }
            if let Some(budget) = self.memory_budget {
                if live.texture_memory + memory > budget {
                    crate::engine_error!(SOURCE,
                        "Texture '{}' needs {} bytes, {} of {} already in use",
                        desc.name, memory, live.texture_memory, budget);
                    return Err(Error::OutOfMemory);
                }
            }

            live.texture_names.insert(desc.name.clone());
            live.texture_memory += memory;
        }

        let info = TextureInfo::from(&desc);
        let render_target = desc.usage.contains(TextureUsage::RENDER_TARGET).then(|| {
            Arc::new(HeadlessRenderTarget {
                name: desc.name.clone(),
                info: info.clone(),
            })
        });

        self.textures_created += 1;
        crate::engine_trace!(SOURCE, "Created texture '{}' ({}x{} {:?}, {} samples)",
            desc.name, desc.width, desc.height, desc.format, desc.sample_count);

        let texture: Arc<dyn Texture> = Arc::new(HeadlessTexture {
            name: desc.name,
            info,
            memory,
            render_target,
            live: self.live.clone(),
        });
        Ok(texture)
    }

    fn create_multi_render_target(&mut self, name: &str) -> Result<Box<dyn MultiRenderTarget>> {
        {
            let mut live = self.live.lock()
                .map_err(|_| engine_err!(SOURCE, ResourceCreation, "Live resource lock poisoned"))?;
            if !live.multi_render_target_names.insert(name.to_string()) {
                engine_bail!(SOURCE, ResourceCreation,
                    "MultiRenderTarget '{}' already exists", name);
            }
        }

        self.multi_render_targets_created += 1;

        Ok(Box::new(HeadlessMultiRenderTarget {
            name: name.to_string(),
            max_surfaces: self.capabilities.max_multi_render_targets,
            surfaces: Vec::new(),
            live: self.live.clone(),
        }))
    }

    fn capabilities(&self) -> DeviceCapabilities {
        self.capabilities
    }
}

#[cfg(test)]
#[path = "headless_graphics_device_tests.rs"]
mod tests;
