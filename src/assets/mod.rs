//! Binary asset loading
//!
//! Both asset files use the same chunked container ([`chunk`]); the mesh
//! library supplies drawable ranges and the scene blob supplies placements.

pub mod chunk;
pub mod mesh_library;
pub mod scene_blob;

pub use mesh_library::MeshLibrary;
pub use scene_blob::SceneEntry;
