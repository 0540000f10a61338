use crate::input::InputSnapshot;

use super::orbit_camera::OrbitCamera;

/// Turns mouse drags into orbit motion
pub struct CameraController {
    /// Radians per unit of normalized mouse travel
    pub rotate_speed: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl CameraController {
    pub fn new(rotate_speed: f32) -> Self {
        Self { rotate_speed }
    }

    /// Applies the drag accumulated while the left button was held
    ///
    /// `drag` is in normalized device units (`[-1, 1]` across the window, +Y
    /// up), so dragging up lowers the eye and dragging right swings it left.
    pub fn process_input(&self, input: &InputSnapshot, camera: &mut OrbitCamera) {
        let drag = input.drag;
        if drag.x == 0.0 && drag.y == 0.0 {
            return;
        }

        camera.add_elevation(-self.rotate_speed * drag.y);
        camera.add_azimuth(-self.rotate_speed * drag.x);
    }
}
