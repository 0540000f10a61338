use cgmath::*;

use crate::gfx::scene::transform::Transform;

/// Camera orbiting a target point on a sphere
///
/// The scene is Z-up: elevation is measured from the XY plane towards +Z and
/// azimuth turns about +Z starting from +X.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub radius: f32,
    pub elevation: f32,
    pub azimuth: f32,
    pub target: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(5.0, 0.0, 0.0, Vector3::zero())
    }
}

impl OrbitCamera {
    pub fn new(radius: f32, elevation: f32, azimuth: f32, target: Vector3<f32>) -> Self {
        let mut camera = Self {
            radius,
            elevation,
            azimuth,
            target,
            bounds: OrbitCameraBounds::default(),
        };
        camera.set_radius(radius);
        camera.set_elevation(elevation);
        camera
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.clamp(self.bounds.min_radius, self.bounds.max_radius);
    }

    pub fn set_elevation(&mut self, elevation: f32) {
        self.elevation = elevation.clamp(self.bounds.min_elevation, self.bounds.max_elevation);
    }

    pub fn add_elevation(&mut self, delta: f32) {
        self.set_elevation(self.elevation + delta);
    }

    /// Azimuth is unbounded; the orbit wraps naturally through sin/cos
    pub fn add_azimuth(&mut self, delta: f32) {
        self.azimuth += delta;
    }

    /// `target + radius * (cos e cos a, cos e sin a, sin e)`
    pub fn eye_position(&self) -> Vector3<f32> {
        calculate_cartesian_eye_position(self.elevation, self.azimuth, self.radius, self.target)
    }

    /// Orientation whose local -Z points from the eye at the target
    ///
    /// Built from an orthonormal basis: `out` points away from the target,
    /// world +Z is re-projected orthogonal to it for `up`, and
    /// `right = up x out`.
    pub fn rotation(&self) -> Quaternion<f32> {
        let out = (self.eye_position() - self.target).normalize();
        let world_up = Vector3::unit_z();
        let up = (world_up - out * world_up.dot(out)).normalize();
        let right = up.cross(out);

        Quaternion::from(Matrix3::from_cols(right, up, out))
    }

    /// Writes the orbit pose into the camera's transform node
    pub fn apply(&self, transform: &mut Transform) {
        transform.position = self.eye_position();
        transform.rotation = self.rotation();
        transform.scale = Vector3::new(1.0, 1.0, 1.0);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        // Elevation stops short of the poles, where `up` and `out` coincide
        Self {
            min_radius: 0.1,
            max_radius: 100.0,
            min_elevation: -std::f32::consts::FRAC_PI_2 + 1.0e-3,
            max_elevation: std::f32::consts::FRAC_PI_2 - 1.0e-3,
        }
    }
}

fn calculate_cartesian_eye_position(
    elevation: f32,
    azimuth: f32,
    radius: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        elevation.cos() * azimuth.cos(),
        elevation.cos() * azimuth.sin(),
        elevation.sin(),
    ) * radius
        + target
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < EPSILON
    }

    #[test]
    fn test_default_eye_on_positive_x() {
        let camera = OrbitCamera::default();
        assert!(approx_eq_vec(camera.eye_position(), Vector3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_eye_is_offset_from_target() {
        let target = Vector3::new(1.0, 2.0, 3.0);
        let camera = OrbitCamera::new(2.0, std::f32::consts::FRAC_PI_6, 1.0, target);

        assert!(((camera.eye_position() - target).magnitude() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_looks_at_target() {
        let target = Vector3::new(0.5, -1.0, 0.25);
        let camera = OrbitCamera::new(4.0, 0.7, -2.3, target);

        let forward = camera.rotation() * Vector3::new(0.0, 0.0, -1.0);
        let expected = (target - camera.eye_position()).normalize();
        assert!(approx_eq_vec(forward, expected));

        // Camera up stays in the plane spanned by forward and world +Z
        let up = camera.rotation() * Vector3::unit_y();
        assert!(up.z > 0.0);
        assert!(up.dot(forward).abs() < EPSILON);
    }

    #[test]
    fn test_elevation_clamped_before_pole() {
        let mut camera = OrbitCamera::default();
        camera.add_elevation(10.0);
        assert!(camera.elevation < std::f32::consts::FRAC_PI_2);

        let rotation = camera.rotation();
        assert!(rotation.s.is_finite() && rotation.v.x.is_finite());
    }

    #[test]
    fn test_apply_writes_pose() {
        let camera = OrbitCamera::new(3.0, 0.2, 0.4, Vector3::zero());
        let mut transform = Transform::default();
        transform.scale = Vector3::new(2.0, 2.0, 2.0);

        camera.apply(&mut transform);
        assert!(approx_eq_vec(transform.position, camera.eye_position()));
        assert_eq!(transform.scale, Vector3::new(1.0, 1.0, 1.0));
    }
}
