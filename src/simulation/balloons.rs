//! Bobbing balloons that pop when the arm's end effector touches them
//!
//! Each balloon runs `Intact -> Popped`. Popping swaps the balloon for a
//! short-lived pop visual placed at the balloon's transform; the visual is
//! hidden again once it has been on screen for [`POP_VISUAL_LIFETIME`].

use cgmath::{InnerSpace, Vector3};

use crate::gfx::scene::{Drawable, ObjectId, Scene, Transform};

pub const BALLOON_COUNT: usize = 3;

/// Squared pop distance, inclusive
pub const POP_RADIUS_SQUARED: f32 = 1.0;
/// Seconds a pop visual stays visible
pub const POP_VISUAL_LIFETIME: f32 = 0.2;
/// Vertical bob speed in units per second
pub const BOUNCE_SPEED: f32 = 0.2;
/// Seconds between bob direction changes
pub const BOUNCE_FLIP_INTERVAL: f32 = 1.0;

pub const BALLOON_POSITIONS: [[f32; 3]; BALLOON_COUNT] = [
    [-0.03, 2.61, 1.18],
    [-1.43, 0.81, 2.19],
    [0.85, -2.08, 2.42],
];

/// The middle balloon bobs against the other two
const BOUNCE_SIGNS: [f32; BALLOON_COUNT] = [1.0, -1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalloonState {
    Intact,
    Popped {
        pop_visual: ObjectId,
        /// Seconds since the pop, counted from the following update
        timer: f32,
        faded: bool,
    },
}

/// Meshes for one balloon, resolved before the scene is built
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BalloonMeshes {
    pub intact: Drawable,
    pub pop: Drawable,
}

#[derive(Debug, Clone)]
pub struct Balloon {
    pub object: ObjectId,
    pop_mesh: Drawable,
    bounce_sign: f32,
    state: BalloonState,
}

impl Balloon {
    pub fn state(&self) -> BalloonState {
        self.state
    }

    pub fn is_popped(&self) -> bool {
        matches!(self.state, BalloonState::Popped { .. })
    }
}

/// True when the effector is close enough to pop a balloon
pub fn within_pop_range(balloon: Vector3<f32>, effector: Vector3<f32>) -> bool {
    (balloon - effector).magnitude2() <= POP_RADIUS_SQUARED
}

/// Object name of a balloon in the scene
pub fn balloon_name(index: usize) -> String {
    format!("Balloon{}", index + 1)
}

/// Mesh drawn for an intact balloon, as exported from the modelling tool
pub fn balloon_mesh_name(index: usize) -> String {
    format!("Balloon{}.001", index + 1)
}

pub fn pop_mesh_name(index: usize) -> String {
    format!("Balloon{}-Pop", index + 1)
}

/// Stands in for any pop mesh missing from the library
pub const FALLBACK_POP_MESH: &str = "Balloon2-Pop";

pub struct BalloonSet {
    balloons: Vec<Balloon>,
    bounce_direction: f32,
    bounce_clock: f32,
}

impl BalloonSet {
    /// Adds the three balloons to `scene` at their starting positions
    pub fn spawn(scene: &mut Scene, meshes: [BalloonMeshes; BALLOON_COUNT]) -> Self {
        let balloons = meshes
            .iter()
            .enumerate()
            .map(|(index, mesh)| Balloon {
                object: scene.add_object(
                    balloon_name(index),
                    mesh.intact,
                    Transform::from_position(Vector3::from(BALLOON_POSITIONS[index])),
                ),
                pop_mesh: mesh.pop,
                bounce_sign: BOUNCE_SIGNS[index],
                state: BalloonState::Intact,
            })
            .collect();

        Self {
            balloons,
            bounce_direction: 1.0,
            bounce_clock: 0.0,
        }
    }

    /// Bobs, pops and fades balloons for one frame
    ///
    /// Each balloon is handled on its own: pops are tested against the
    /// balloon's own world position, and every pop visual fades on its own
    /// timer.
    pub fn update(&mut self, elapsed: f32, effector: Vector3<f32>, scene: &mut Scene) {
        self.bounce(elapsed, scene);

        for (index, balloon) in self.balloons.iter_mut().enumerate() {
            match &mut balloon.state {
                BalloonState::Intact => {
                    if within_pop_range(scene.world_position(balloon.object), effector) {
                        let placement: Transform = *scene.transform(balloon.object);
                        let pop_visual =
                            scene.add_object(pop_mesh_name(index), balloon.pop_mesh, placement);
                        scene.transform_mut(balloon.object).scale = Vector3::new(0.0, 0.0, 0.0);

                        log::info!("{} popped", balloon_name(index));
                        balloon.state = BalloonState::Popped {
                            pop_visual,
                            timer: 0.0,
                            faded: false,
                        };
                    }
                }
                BalloonState::Popped {
                    pop_visual,
                    timer,
                    faded,
                } => {
                    *timer += elapsed;
                    if !*faded && *timer >= POP_VISUAL_LIFETIME {
                        scene.transform_mut(*pop_visual).scale = Vector3::new(0.0, 0.0, 0.0);
                        *faded = true;
                        log::debug!("{} faded", pop_mesh_name(index));
                    }
                }
            }
        }
    }

    fn bounce(&mut self, elapsed: f32, scene: &mut Scene) {
        let step = elapsed * BOUNCE_SPEED * self.bounce_direction;
        for balloon in self.balloons.iter().filter(|b| !b.is_popped()) {
            scene.transform_mut(balloon.object).position.z += step * balloon.bounce_sign;
        }

        self.bounce_clock += elapsed;
        while self.bounce_clock >= BOUNCE_FLIP_INTERVAL {
            self.bounce_clock -= BOUNCE_FLIP_INTERVAL;
            self.bounce_direction = -self.bounce_direction;
        }
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn all_popped(&self) -> bool {
        self.balloons.iter().all(Balloon::is_popped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Deg;

    fn meshes() -> [BalloonMeshes; BALLOON_COUNT] {
        [0, 1, 2].map(|i| BalloonMeshes {
            intact: Drawable::new(i * 6, 3),
            pop: Drawable::new(i * 6 + 3, 3),
        })
    }

    fn setup() -> (Scene, BalloonSet) {
        let mut scene = Scene::new(Deg(60.0).into(), 1.0, 0.01);
        let set = BalloonSet::spawn(&mut scene, meshes());
        (scene, set)
    }

    fn far_away() -> Vector3<f32> {
        Vector3::new(100.0, 100.0, 100.0)
    }

    #[test]
    fn test_pop_range_boundary() {
        let balloon = Vector3::new(-0.03, 2.61, 1.18);
        assert!(within_pop_range(balloon, Vector3::new(0.97, 2.61, 1.18)));
        assert!(!within_pop_range(balloon, Vector3::new(-0.03, 3.6100006, 1.18)));
    }

    #[test]
    fn test_pop_range_just_outside() {
        let balloon = Vector3::new(-0.03, 2.61, 1.18);
        let effector = Vector3::new(-0.03 + 1.000001f32.sqrt(), 2.61, 1.18);

        let distance2 = (balloon - effector).magnitude2();
        assert!(distance2 > 1.0);
        assert!((distance2 - 1.000001).abs() < 1e-7);
        assert!(!within_pop_range(balloon, effector));
    }

    #[test]
    fn test_mesh_names() {
        assert_eq!(balloon_name(0), "Balloon1");
        assert_eq!(balloon_mesh_name(0), "Balloon1.001");
        assert_eq!(balloon_mesh_name(2), "Balloon3.001");
        assert_eq!(pop_mesh_name(1), FALLBACK_POP_MESH);
    }

    #[test]
    fn test_pop_spawns_visual_and_hides_balloon() {
        let (mut scene, mut set) = setup();
        let balloon = set.balloons()[0].object;
        let before = scene.object_count();

        set.update(0.0, Vector3::new(0.97, 2.61, 1.18), &mut scene);

        assert_eq!(scene.object_count(), before + 1);
        assert_eq!(scene.transform(balloon).scale, Vector3::new(0.0, 0.0, 0.0));

        let BalloonState::Popped { pop_visual, timer, .. } = set.balloons()[0].state() else {
            panic!("balloon should have popped");
        };
        assert_eq!(timer, 0.0);
        assert_eq!(scene.object(pop_visual).name, "Balloon1-Pop");
        assert_eq!(scene.object(pop_visual).drawable, Drawable::new(3, 3));
        assert_eq!(
            scene.transform(pop_visual).position,
            Vector3::from(BALLOON_POSITIONS[0])
        );
        assert_eq!(scene.transform(pop_visual).scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_pop_fires_once() {
        let (mut scene, mut set) = setup();
        let effector = Vector3::from(BALLOON_POSITIONS[2]);

        set.update(0.0, effector, &mut scene);
        let count = scene.object_count();
        set.update(0.0, effector, &mut scene);

        assert_eq!(scene.object_count(), count);
        assert!(set.balloons()[2].is_popped());
    }

    #[test]
    fn test_third_balloon_uses_its_own_pop_mesh() {
        let (mut scene, mut set) = setup();
        set.update(0.0, Vector3::from(BALLOON_POSITIONS[2]), &mut scene);

        let BalloonState::Popped { pop_visual, .. } = set.balloons()[2].state() else {
            panic!("balloon should have popped");
        };
        assert_eq!(scene.object(pop_visual).name, "Balloon3-Pop");
        assert!(!set.balloons()[0].is_popped());
        assert!(!set.balloons()[1].is_popped());
    }

    #[test]
    fn test_pop_visual_lifetime() {
        let (mut scene, mut set) = setup();
        set.update(0.0, Vector3::from(BALLOON_POSITIONS[0]), &mut scene);
        let BalloonState::Popped { pop_visual, .. } = set.balloons()[0].state() else {
            panic!("balloon should have popped");
        };

        set.update(0.125, far_away(), &mut scene);
        assert_eq!(scene.transform(pop_visual).scale, Vector3::new(1.0, 1.0, 1.0));

        set.update(0.075, far_away(), &mut scene);
        assert_eq!(scene.transform(pop_visual).scale, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_pop_visuals_fade_independently() {
        let (mut scene, mut set) = setup();
        set.update(0.0, Vector3::from(BALLOON_POSITIONS[0]), &mut scene);
        set.update(0.25, far_away(), &mut scene);

        let BalloonState::Popped { pop_visual: first, .. } = set.balloons()[0].state() else {
            panic!("balloon should have popped");
        };
        assert_eq!(scene.transform(first).scale, Vector3::new(0.0, 0.0, 0.0));
        assert!(!set.balloons()[1].is_popped());
        assert!(!set.balloons()[2].is_popped());

        let second_position = scene.world_position(set.balloons()[1].object);
        set.update(0.0, second_position, &mut scene);
        set.update(0.1, far_away(), &mut scene);

        let BalloonState::Popped { pop_visual: second, .. } = set.balloons()[1].state() else {
            panic!("balloon should have popped");
        };
        assert_eq!(scene.transform(second).scale, Vector3::new(1.0, 1.0, 1.0));
        assert!(!set.all_popped());
    }

    #[test]
    fn test_bounce_moves_middle_balloon_opposite() {
        let (mut scene, mut set) = setup();
        set.update(0.5, far_away(), &mut scene);

        let z: Vec<f32> = set
            .balloons()
            .iter()
            .map(|b| scene.transform(b.object).position.z)
            .collect();
        assert!((z[0] - (1.18 + 0.1)).abs() < 1e-5);
        assert!((z[1] - (2.19 - 0.1)).abs() < 1e-5);
        assert!((z[2] - (2.42 + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_direction_flips() {
        let (mut scene, mut set) = setup();
        let start = scene.transform(set.balloons()[0].object).position.z;

        set.update(1.0, far_away(), &mut scene);
        set.update(1.0, far_away(), &mut scene);

        let end = scene.transform(set.balloons()[0].object).position.z;
        assert!((end - start).abs() < 1e-5);
    }
}
