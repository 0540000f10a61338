//! Four-link robot arm driven by key pairs
//!
//! Links are chained Base -> Link1 -> Link2 -> Link3, each storing its offset
//! from its parent. The base turns about the vertical +Z axis, every other
//! joint about its local +X axis.

use std::f32::consts::TAU;

use cgmath::{Quaternion, Rad, Rotation3, Vector3};
use winit::keyboard::KeyCode;

use crate::{
    error::SceneError,
    gfx::scene::{Drawable, ObjectId, Scene, Transform},
    input::InputSnapshot,
};

pub const JOINT_COUNT: usize = 4;

pub const LINK_NAMES: [&str; JOINT_COUNT] = ["Base", "Link1", "Link2", "Link3"];

/// Offsets from each link's parent; the base sits at the world origin
const LINK_OFFSETS: [[f32; 3]; JOINT_COUNT] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 0.6],
    [0.0, 0.0, 1.2],
    [0.0, 0.0, 1.2],
];

/// `(increase, decrease)` key per joint
pub const JOINT_KEYS: [(KeyCode, KeyCode); JOINT_COUNT] = [
    (KeyCode::KeyZ, KeyCode::KeyX),
    (KeyCode::KeyA, KeyCode::KeyS),
    (KeyCode::Semicolon, KeyCode::Comma),
    (KeyCode::Period, KeyCode::Slash),
];

/// Joint angles after `elapsed` seconds of the held keys, each in `[0, 2π)`
///
/// Holding both keys of a pair cancels out.
pub fn integrate_joints(
    angles: [f32; JOINT_COUNT],
    input: &InputSnapshot,
    angular_velocity: f32,
    elapsed: f32,
) -> [f32; JOINT_COUNT] {
    let mut next = angles;
    for (angle, (increase, decrease)) in next.iter_mut().zip(JOINT_KEYS) {
        let mut direction = 0.0;
        if input.is_down(increase) {
            direction += 1.0;
        }
        if input.is_down(decrease) {
            direction -= 1.0;
        }
        *angle = wrap_angle(*angle + direction * angular_velocity * elapsed);
    }
    next
}

/// Local rotation of joint `index` at `angle` radians
pub fn joint_rotation(index: usize, angle: f32) -> Quaternion<f32> {
    if index == 0 {
        Quaternion::from_angle_z(Rad(angle))
    } else {
        Quaternion::from_angle_x(Rad(angle))
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

pub struct RobotArm {
    links: [ObjectId; JOINT_COUNT],
    angles: [f32; JOINT_COUNT],
    angular_velocity: f32,
}

impl RobotArm {
    /// Adds the four links to `scene` and chains them
    pub fn spawn(
        scene: &mut Scene,
        drawables: [Drawable; JOINT_COUNT],
        angular_velocity: f32,
    ) -> Result<Self, SceneError> {
        let mut links = [ObjectId(0); JOINT_COUNT];
        for (index, link) in links.iter_mut().enumerate() {
            *link = scene.add_object(
                LINK_NAMES[index],
                drawables[index],
                Transform::from_position(Vector3::from(LINK_OFFSETS[index])),
            );
        }

        for pair in links.windows(2) {
            scene.set_parent(pair[1], pair[0])?;
        }

        Ok(Self {
            links,
            angles: [0.0; JOINT_COUNT],
            angular_velocity,
        })
    }

    pub fn update(&mut self, elapsed: f32, input: &InputSnapshot, scene: &mut Scene) {
        self.angles = integrate_joints(self.angles, input, self.angular_velocity, elapsed);
        for (index, (&link, &angle)) in self.links.iter().zip(&self.angles).enumerate() {
            scene.transform_mut(link).rotation = joint_rotation(index, angle);
        }
    }

    /// World position of the last link's origin, the "pin" that pops balloons
    pub fn end_effector(&self, scene: &Scene) -> Vector3<f32> {
        scene.world_position(self.links[JOINT_COUNT - 1])
    }

    pub fn angles(&self) -> [f32; JOINT_COUNT] {
        self.angles
    }

    pub fn links(&self) -> [ObjectId; JOINT_COUNT] {
        self.links
    }
}
