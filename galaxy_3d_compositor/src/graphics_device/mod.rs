/// Graphics device module - the device-side types and traits the compositor
/// provisions render textures through

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod render_target;
pub mod headless_graphics_device;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use render_target::*;
pub use headless_graphics_device::*;
