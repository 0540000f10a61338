// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Depth buffer, global light uniform and per-object uniform slots.

pub mod global_bindings;
pub mod object_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, LightUniform};
pub use object_bindings::{ObjectBindings, ObjectUniform};
pub use texture_resource::TextureResource;
