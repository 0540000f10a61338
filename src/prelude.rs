//! # Robopop Prelude
//!
//! Commonly used types in one import, for writing a custom [`Simulation`]
//! against the scene graph.
//!
//! ```no_run
//! use robopop::prelude::*;
//!
//! struct Spin {
//!     object: ObjectId,
//! }
//!
//! impl Simulation for Spin {
//!     fn update(
//!         &mut self,
//!         frame: &FrameContext,
//!         _input: &InputSnapshot,
//!         scene: &mut Scene,
//!     ) -> SimulationStatus {
//!         let turn = Quaternion::from_angle_z(Rad(frame.elapsed));
//!         let transform = scene.transform_mut(self.object);
//!         transform.rotation = turn * transform.rotation;
//!         SimulationStatus::Running
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Spin"
//!     }
//! }
//! ```

// Re-export core application types
pub use crate::app::RobopopApp;
pub use crate::config::Config;

// Re-export graphics and scene types
pub use crate::gfx::camera::{Camera, OrbitCamera};
pub use crate::gfx::scene::{Drawable, ObjectId, Scene, Transform, TransformId};

// Re-export simulation framework
pub use crate::input::InputSnapshot;
pub use crate::simulation::{FrameContext, Simulation, SimulationStatus};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Quaternion, Rad, Rotation3, Vector3};
