use cgmath::{Matrix, Matrix3, Matrix4, Rad, SquareMatrix, Vector3};

use crate::{
    error::SceneError,
    gfx::camera::camera_utils::Camera,
};

use super::{
    object::{Drawable, Object, ObjectId},
    transform::{Transform, TransformTree},
};

/// Main scene containing the transform tree, the camera and the drawn objects
///
/// Objects are kept in insertion order, which is also draw order.
pub struct Scene {
    pub camera: Camera,
    transforms: TransformTree,
    objects: Vec<Object>,
}

/// Everything the render pass needs to issue one object's draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub object: ObjectId,
    pub drawable: Drawable,
    pub pipeline: &'static str,
    pub mvp: Matrix4<f32>,
    /// Inverse-transpose of the model-view upper 3x3, for normals
    pub itmv: Matrix3<f32>,
}

impl Scene {
    /// Creates an empty scene whose camera sits at the world origin
    pub fn new(fovy: Rad<f32>, aspect: f32, near: f32) -> Self {
        let mut transforms = TransformTree::new();
        let camera_transform = transforms.insert(Transform::default());

        Self {
            camera: Camera::new(camera_transform, fovy, aspect, near),
            transforms,
            objects: Vec::new(),
        }
    }

    /// Adds an object drawn with `drawable` at the given local placement
    ///
    /// The placement's parent link is ignored; use [`Scene::set_parent`].
    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        drawable: Drawable,
        transform: Transform,
    ) -> ObjectId {
        let transform = self.transforms.insert(transform);
        let id = ObjectId(self.objects.len());
        let object = Object::new(name, transform, drawable);
        log::debug!(
            "Added object '{}' ({} vertices from {})",
            object.name,
            drawable.count,
            drawable.start
        );
        self.objects.push(object);
        id
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.0]
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn transforms(&self) -> &TransformTree {
        &self.transforms
    }

    /// Local placement of an object
    pub fn transform(&self, id: ObjectId) -> &Transform {
        self.transforms.get(self.objects[id.0].transform)
    }

    pub fn transform_mut(&mut self, id: ObjectId) -> &mut Transform {
        self.transforms.get_mut(self.objects[id.0].transform)
    }

    pub fn camera_transform_mut(&mut self) -> &mut Transform {
        self.transforms.get_mut(self.camera.transform)
    }

    /// Parents one object's transform to another's
    ///
    /// # Errors
    /// [`SceneError::Cycle`] if `parent` is `child` or one of its descendants.
    pub fn set_parent(&mut self, child: ObjectId, parent: ObjectId) -> Result<(), SceneError> {
        let child = self.objects[child.0].transform;
        let parent = self.objects[parent.0].transform;
        self.transforms.set_parent(child, Some(parent))
    }

    pub fn world_matrix(&self, id: ObjectId) -> Matrix4<f32> {
        self.transforms.local_to_world(self.objects[id.0].transform)
    }

    pub fn world_position(&self, id: ObjectId) -> Vector3<f32> {
        self.transforms.world_position(self.objects[id.0].transform)
    }

    /// Resolves every object's matrices for this frame, in draw order
    ///
    /// Reads the transform tree only; nothing is mutated.
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let view = self.camera.view(&self.transforms);
        let projection = self.camera.projection();

        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| {
                let model_view = view * self.transforms.local_to_world(object.transform);
                DrawCommand {
                    object: ObjectId(index),
                    drawable: object.drawable,
                    pipeline: object.pipeline,
                    mvp: projection * model_view,
                    itmv: normal_matrix(model_view),
                }
            })
            .collect()
    }
}

/// `transpose(inverse(mat3(model_view)))`, or identity when singular
pub fn normal_matrix(model_view: Matrix4<f32>) -> Matrix3<f32> {
    let upper = Matrix3::from_cols(
        model_view.x.truncate(),
        model_view.y.truncate(),
        model_view.z.truncate(),
    );
    upper
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or_else(Matrix3::identity)
}
