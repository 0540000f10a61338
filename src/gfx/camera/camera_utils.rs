use cgmath::{Matrix4, Rad};

use crate::gfx::scene::transform::{TransformId, TransformTree};

/// Remaps OpenGL clip depth `[-1, 1]` onto wgpu's `[0, 1]`
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Perspective camera placed by a node in the scene's transform tree
///
/// Only a near plane is configured; the far plane sits at infinity.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub transform: TransformId,
    pub fovy: Rad<f32>,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
}

impl Camera {
    pub fn new(transform: TransformId, fovy: Rad<f32>, aspect: f32, near: f32) -> Self {
        Self {
            transform,
            fovy,
            aspect,
            near,
        }
    }

    /// Right-handed infinite perspective, mapped to wgpu clip depth
    ///
    /// Points on the near plane land at depth 0 and depth approaches 1 as
    /// distance grows.
    pub fn projection(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * infinite_perspective(self.fovy, self.aspect, self.near)
    }

    /// Inverse of the camera node's world matrix
    pub fn view(&self, transforms: &TransformTree) -> Matrix4<f32> {
        transforms.world_to_local(self.transform)
    }

    pub fn view_projection(&self, transforms: &TransformTree) -> Matrix4<f32> {
        self.projection() * self.view(transforms)
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

/// OpenGL-convention perspective with the far plane at infinity
pub fn infinite_perspective(fovy: Rad<f32>, aspect: f32, near: f32) -> Matrix4<f32> {
    let f = 1.0 / (fovy.0 / 2.0).tan();

    #[rustfmt::skip]
    let projection = Matrix4::new(
        f / aspect, 0.0, 0.0,          0.0,
        0.0,        f,   0.0,          0.0,
        0.0,        0.0, -1.0,         -1.0,
        0.0,        0.0, -2.0 * near,  0.0,
    );
    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::transform::Transform;
    use cgmath::{Deg, Vector3, Vector4};

    fn clip_depth(camera: &Camera, tree: &TransformTree, world: Vector3<f32>) -> f32 {
        let clip = camera.view_projection(tree) * world.extend(1.0);
        clip.z / clip.w
    }

    #[test]
    fn test_near_plane_maps_to_zero_depth() {
        let mut tree = TransformTree::new();
        let id = tree.insert(Transform::default());
        let camera = Camera::new(id, Deg(60.0).into(), 4.0 / 3.0, 0.01);

        // Camera looks down -Z from the origin
        let depth = clip_depth(&camera, &tree, Vector3::new(0.0, 0.0, -0.01));
        assert!(depth.abs() < 1e-4);

        let far = clip_depth(&camera, &tree, Vector3::new(0.0, 0.0, -100.0));
        assert!(far < 1.0 && far > 0.99);
    }

    #[test]
    fn test_view_is_inverse_of_camera_placement() {
        let mut tree = TransformTree::new();
        let id = tree.insert(Transform::from_position(Vector3::new(0.0, 0.0, 5.0)));
        let camera = Camera::new(id, Deg(60.0).into(), 1.0, 0.01);

        let eye_space = camera.view(&tree) * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((eye_space.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut tree = TransformTree::new();
        let id = tree.insert(Transform::default());
        let mut camera = Camera::new(id, Deg(60.0).into(), 1.0, 0.01);

        camera.resize_projection(640, 480);
        assert!((camera.aspect - 640.0 / 480.0).abs() < 1e-6);

        // A minimised window keeps the previous aspect
        camera.resize_projection(640, 0);
        assert!((camera.aspect - 640.0 / 480.0).abs() < 1e-6);
    }
}
