//! # Scene Management Module
//!
//! The transform hierarchy, the objects placed by it and the scene that owns
//! both together with the camera.
//!
//! ## Key Components
//!
//! - [`TransformTree`] - Arena of local transforms linked by parent ids
//! - [`Object`] - A named [`Drawable`] range placed by a transform node
//! - [`Scene`] - Camera, transforms and insertion-ordered objects
//! - [`Vertex3D`] - Vertex format with position, normal and colour
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::{Deg, Vector3};
//! use robopop::gfx::scene::{Drawable, Scene, Transform};
//!
//! let mut scene = Scene::new(Deg(60.0).into(), 4.0 / 3.0, 0.01);
//! let base = scene.add_object("Base", Drawable::new(0, 36), Transform::default());
//! let link = scene.add_object(
//!     "Link1",
//!     Drawable::new(36, 36),
//!     Transform::from_position(Vector3::new(0.0, 0.0, 0.6)),
//! );
//! scene.set_parent(link, base).unwrap();
//!
//! for draw in scene.draw_list() {
//!     // upload draw.mvp / draw.itmv, then draw draw.drawable.range()
//! }
//! ```

pub mod object;
pub mod scene;
pub mod transform;
pub mod vertex;

// Re-export main types
pub use object::{Drawable, Object, ObjectId};
pub use scene::{normal_matrix, DrawCommand, Scene};
pub use transform::{Transform, TransformId, TransformTree};
pub use vertex::Vertex3D;
