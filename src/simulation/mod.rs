//! Simulation system
//!
//! Per-frame game logic layered on the scene graph: joint integration for the
//! robot arm, balloon bob/pop/fade, and the camera orbit. Each update reads an
//! input snapshot and the frame's elapsed time and writes local transforms.

pub mod balloon_pop;
pub mod balloons;
pub mod frame;
pub mod robot_arm;
pub mod traits;

pub use balloon_pop::BalloonPopDemo;
pub use frame::{FrameClock, FrameContext};
pub use traits::{Simulation, SimulationStatus};
