//! Core simulation trait
//!
//! A simulation owns the per-frame game logic. The app loop hands it the
//! frame's timing and input snapshot and the scene to mutate; everything it
//! changes is plain transform writes, resolved later by the render pass.

use crate::{gfx::scene::Scene, input::InputSnapshot, simulation::frame::FrameContext};

/// What the app loop should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    /// The simulation reached its end condition; the app exits normally
    Finished,
}

pub trait Simulation {
    /// Advance the simulation by one frame
    ///
    /// Infallible: anything that could fail is resolved when the simulation
    /// is built.
    fn update(
        &mut self,
        frame: &FrameContext,
        input: &InputSnapshot,
        scene: &mut Scene,
    ) -> SimulationStatus;

    /// Get simulation name for logging
    fn name(&self) -> &str;
}
