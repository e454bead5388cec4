//! Error types for the Galaxy3D compositor
//!
//! This module defines the error types raised while authoring texture
//! definitions, resolving texture names, and provisioning GPU render targets
//! for compositor nodes.

use std::fmt;

/// Result type for compositor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Compositor errors
///
/// All variants are reported synchronously by the call that introduced the
/// problem. None of them are transient: retrying the same call fails again.
#[derive(Debug, Clone)]
pub enum Error {
    /// A texture (or definition) name is already registered in the same scope
    DuplicateName(String),

    /// A name uses the global marker with a non-global source, or a global
    /// source uses a name without the marker
    InvalidScope(String),

    /// A texture name could not be resolved
    NameNotFound(String),

    /// A storage index does not fit in the encoded name-to-location value
    InvalidIndex(String),

    /// The graphics device failed to create a texture, render target or MRT
    ResourceCreation(String),

    /// Out of GPU memory
    OutOfMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateName(msg) => write!(f, "Duplicate name: {}", msg),
            Error::InvalidScope(msg) => write!(f, "Invalid scope: {}", msg),
            Error::NameNotFound(msg) => write!(f, "Name not found: {}", msg),
            Error::InvalidIndex(msg) => write!(f, "Invalid index: {}", msg),
            Error::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error and build the matching `Error` value
///
/// The message is logged at ERROR severity (with file:line) under `$source`
/// before the error is returned to the caller.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("galaxy3d::ShadowNode", ResourceCreation,
///     "Format {:?} is not renderable", format));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::$variant(message)
    }};
}

/// Log an error and return it from the current function
///
/// Shorthand for `return Err(engine_err!(...))`.
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
