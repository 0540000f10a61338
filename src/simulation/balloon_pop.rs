//! The balloon-popping demo: a robot arm, three balloons and an orbiting
//! camera, laid out around the static props of the loaded scene.

use crate::{
    assets::{MeshLibrary, SceneEntry},
    error::SceneError,
    gfx::{
        camera::{CameraController, OrbitCamera},
        scene::{Drawable, Scene},
    },
    input::InputSnapshot,
    simulation::{
        balloons::{
            balloon_mesh_name, pop_mesh_name, BalloonMeshes, BalloonSet, BALLOON_COUNT,
            FALLBACK_POP_MESH,
        },
        frame::FrameContext,
        robot_arm::{RobotArm, JOINT_COUNT, LINK_NAMES},
        traits::{Simulation, SimulationStatus},
    },
};

/// Scene entries that are drawn as-is; everything else is spawned by the demo
pub fn is_static_prop(name: &str) -> bool {
    name.contains("Cube") || name.contains("Crate") || name == "Stand"
}

/// A balloon's own pop mesh, or [`FALLBACK_POP_MESH`] when the library
/// lacks it
///
/// # Errors
/// [`SceneError::MeshNotFound`] naming the balloon's own pop mesh when
/// neither exists.
fn pop_mesh(library: &MeshLibrary, index: usize) -> Result<Drawable, SceneError> {
    let name = pop_mesh_name(index);
    library.get(&name).or_else(|err| {
        let fallback = library.get(FALLBACK_POP_MESH).map_err(|_| err)?;
        log::warn!("No '{}' mesh, using '{}'", name, FALLBACK_POP_MESH);
        Ok(fallback)
    })
}

pub struct BalloonPopDemo {
    robot: RobotArm,
    balloons: BalloonSet,
    orbit: OrbitCamera,
    controller: CameraController,
}

impl BalloonPopDemo {
    /// Populates `scene` with the static props, the arm and the balloons
    ///
    /// Every mesh the demo will ever draw, pop visuals included, is looked up
    /// here so that [`Simulation::update`] cannot fail.
    ///
    /// # Errors
    /// [`SceneError::MeshNotFound`] for any missing mesh.
    pub fn new(
        scene: &mut Scene,
        library: &MeshLibrary,
        entries: &[SceneEntry],
        angular_velocity: f32,
    ) -> Result<Self, SceneError> {
        let mut links = [Drawable::default(); JOINT_COUNT];
        for (drawable, name) in links.iter_mut().zip(LINK_NAMES) {
            *drawable = library.get(name)?;
        }

        let mut balloon_meshes = [BalloonMeshes::default(); BALLOON_COUNT];
        for (index, meshes) in balloon_meshes.iter_mut().enumerate() {
            meshes.intact = library.get(&balloon_mesh_name(index))?;
            meshes.pop = pop_mesh(library, index)?;
        }

        let mut props = 0;
        for entry in entries.iter().filter(|e| is_static_prop(&e.name)) {
            scene.add_object(entry.name.clone(), library.get(&entry.name)?, entry.transform());
            props += 1;
        }

        let robot = RobotArm::spawn(scene, links, angular_velocity)?;
        let balloons = BalloonSet::spawn(scene, balloon_meshes);

        let orbit = OrbitCamera::default();
        orbit.apply(scene.camera_transform_mut());

        log::info!(
            "Built scene: {} static props of {} entries, {} objects in total",
            props,
            entries.len(),
            scene.object_count()
        );

        Ok(Self {
            robot,
            balloons,
            orbit,
            controller: CameraController::default(),
        })
    }

    pub fn robot(&self) -> &RobotArm {
        &self.robot
    }

    pub fn balloons(&self) -> &BalloonSet {
        &self.balloons
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }
}

impl Simulation for BalloonPopDemo {
    fn update(
        &mut self,
        frame: &FrameContext,
        input: &InputSnapshot,
        scene: &mut Scene,
    ) -> SimulationStatus {
        self.robot.update(frame.elapsed, input, scene);

        let effector = self.robot.end_effector(scene);
        self.balloons.update(frame.elapsed, effector, scene);

        self.controller.process_input(input, &mut self.orbit);
        self.orbit.apply(scene.camera_transform_mut());

        if self.balloons.all_popped() {
            log::info!("All balloons popped");
            SimulationStatus::Finished
        } else {
            SimulationStatus::Running
        }
    }

    fn name(&self) -> &str {
        "Balloon Pop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn library(names: &[&str]) -> MeshLibrary {
        let meshes: HashMap<String, Drawable> = names
            .iter()
            .zip(0u32..)
            .map(|(name, i)| (name.to_string(), Drawable::new(i * 3, 3)))
            .collect();
        MeshLibrary::from_parts(Vec::new(), meshes)
    }

    #[test]
    fn test_pop_mesh_prefers_its_own() {
        let library = library(&["Balloon2-Pop", "Balloon3-Pop"]);
        assert_eq!(pop_mesh(&library, 2).unwrap(), Drawable::new(3, 3));
    }

    #[test]
    fn test_missing_pop_mesh_falls_back() {
        let library = library(&["Balloon1-Pop", "Balloon2-Pop"]);
        assert_eq!(pop_mesh(&library, 2).unwrap(), Drawable::new(3, 3));
        assert_eq!(pop_mesh(&library, 0).unwrap(), Drawable::new(0, 3));
    }

    #[test]
    fn test_missing_fallback_names_own_mesh() {
        let library = library(&["Balloon1-Pop"]);
        match pop_mesh(&library, 2) {
            Err(SceneError::MeshNotFound(name)) => assert_eq!(name, "Balloon3-Pop"),
            other => panic!("expected MeshNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_static_prop_filter() {
        assert!(is_static_prop("Cube.001"));
        assert!(is_static_prop("WoodenCrate"));
        assert!(is_static_prop("Stand"));

        assert!(!is_static_prop("Stand.001"));
        assert!(!is_static_prop("Base"));
        assert!(!is_static_prop("Balloon1"));
    }
}
