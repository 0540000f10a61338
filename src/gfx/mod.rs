//! # Graphics Module
//!
//! Camera, scene graph, rendering pipeline and GPU resources.
//!
//! ## Architecture Overview
//!
//! - **Scene** ([`scene`]) - Transform hierarchy, objects and the draw list
//! - **Camera** ([`camera`]) - Infinite-far perspective camera and its orbit
//!   controller
//! - **Rendering** ([`rendering`]) - Pipelines and the per-frame render pass
//! - **Resources** ([`resources`]) - Depth buffer and uniform bindings
//!
//! The scene side is plain CPU data and is fully usable without a GPU; the
//! [`RenderEngine`] consumes [`Scene::draw_list`] once per frame.
//!
//! [`Scene::draw_list`]: scene::Scene::draw_list

pub mod camera;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
