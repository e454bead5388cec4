/*!
# Galaxy 3D Compositor

Render texture management for the Galaxy 3D compositor.

Nodes and workspaces declare the textures they render into as texture
definitions. A registry maps each texture name to where the texture lives:
an input channel, a texture local to the node, or a global texture owned by
the workspace. Shadow nodes use their definitions to create their shadow map
render targets on demand through a `GraphicsDevice`.

## Architecture

- **TextureDefinitionRegistry**: Name to (index, source) map plus texture definitions
- **ShadowNodeDefinition**: Read-only description of a shadow node
- **ShadowNode**: Live instance owning one texture channel per definition
- **CompositorManager**: Named definitions and live shadow node instances
- **GraphicsDevice**: Trait the textures are created through
  (`HeadlessGraphicsDevice` validates without a GPU)
*/

// Internal modules
mod error;
pub mod log;
pub mod config;
pub mod id_string;
pub mod graphics_device;
pub mod compositor;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Configuration
    pub use crate::config::{CompositorConfig, GlobalNamePolicy};

    // Interned identifiers
    pub use crate::id_string::IdString;

    // Logging sub-module (types and functions, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, set_min_severity, min_severity,
        };
    }

    // Render sub-module with the device-side types
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Compositor sub-module
    pub mod compositor {
        pub use crate::compositor::*;
    }
}
