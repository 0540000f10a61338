//! # Transform Hierarchy
//!
//! Local position/rotation/scale nodes stored in an arena and linked by
//! parent ids. World matrices are resolved on demand by walking the parent
//! chain, so there is no cached state that could go stale when a node or any
//! of its ancestors is mutated.
//!
//! ## Composition order
//!
//! ```text
//! world = parent.world * T(position) * R(rotation) * S(scale)
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use cgmath::Vector3;
//! use robopop::gfx::scene::transform::{Transform, TransformTree};
//!
//! let mut tree = TransformTree::new();
//! let base = tree.insert(Transform::default());
//! let link = tree.insert(Transform::from_position(Vector3::new(0.0, 0.0, 0.6)));
//! tree.set_parent(link, Some(base)).unwrap();
//!
//! let world = tree.local_to_world(link);
//! ```

use cgmath::{Matrix4, Quaternion, Vector3};

use crate::error::SceneError;

/// Handle to a node in a [`TransformTree`]
///
/// Ids are only ever handed out by [`TransformTree::insert`] and nodes are
/// never removed, so an id stays valid for the lifetime of its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransformId(usize);

impl TransformId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local placement of a node relative to its parent (or the world origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    /// Unit quaternion
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
    parent: Option<TransformId>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            parent: None,
        }
    }
}

impl Transform {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
            parent: None,
        }
    }

    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn parent(&self) -> Option<TransformId> {
        self.parent
    }

    /// `T(position) * R(rotation) * S(scale)`
    pub fn local_matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from(self.rotation);
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s // Order matters: T * R * S
    }

    /// `S⁻¹ * R⁻¹ * T(-position)`, built from the components rather than a
    /// general 4x4 inverse.
    ///
    /// Exact for any scale without zero components, uniform or not. A zero
    /// component inverts to zero, which keeps collapsed (hidden) nodes finite.
    pub fn inverse_local_matrix(&self) -> Matrix4<f32> {
        let inv_s = Matrix4::from_nonuniform_scale(
            reciprocal_or_zero(self.scale.x),
            reciprocal_or_zero(self.scale.y),
            reciprocal_or_zero(self.scale.z),
        );
        let inv_r = Matrix4::from(self.rotation.conjugate());
        let inv_t = Matrix4::from_translation(-self.position);
        inv_s * inv_r * inv_t
    }
}

fn reciprocal_or_zero(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        1.0 / value
    }
}

/// Arena of transforms linked by parent ids
///
/// The parent relation is a forest: every node has at most one parent and
/// [`set_parent`](Self::set_parent) refuses any link that would close a cycle,
/// so walking a parent chain always terminates.
#[derive(Debug, Default, Clone)]
pub struct TransformTree {
    nodes: Vec<Transform>,
}

impl TransformTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its id
    ///
    /// Any parent stored on `transform` is discarded; links are only made
    /// through [`set_parent`](Self::set_parent) so they can be checked.
    pub fn insert(&mut self, mut transform: Transform) -> TransformId {
        transform.parent = None;
        self.nodes.push(transform);
        TransformId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: TransformId) -> &Transform {
        &self.nodes[id.0]
    }

    /// Mutable access to the local fields of a node
    ///
    /// The parent link is private to the tree, so writes through this
    /// reference cannot break the acyclic invariant.
    pub fn get_mut(&mut self, id: TransformId) -> &mut Transform {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: TransformId) -> Option<TransformId> {
        self.nodes[id.0].parent
    }

    /// Iterates over the strict ancestors of `id`, nearest first
    pub fn ancestors(&self, id: TransformId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Links `child` under `parent`, or detaches it when `parent` is `None`
    ///
    /// # Errors
    /// [`SceneError::Cycle`] if `parent` is `child` itself or one of its
    /// descendants. The hierarchy is left untouched on error.
    pub fn set_parent(
        &mut self,
        child: TransformId,
        parent: Option<TransformId>,
    ) -> Result<(), SceneError> {
        if let Some(parent) = parent {
            let closes_loop =
                parent == child || self.ancestors(parent).any(|ancestor| ancestor == child);
            if closes_loop {
                return Err(SceneError::Cycle { child, parent });
            }
        }

        self.nodes[child.0].parent = parent;
        Ok(())
    }

    /// Composes every ancestor's local matrix with this node's, root to leaf
    pub fn local_to_world(&self, id: TransformId) -> Matrix4<f32> {
        self.ancestors(id)
            .fold(self.get(id).local_matrix(), |world, ancestor| {
                self.get(ancestor).local_matrix() * world
            })
    }

    /// Inverse of [`local_to_world`](Self::local_to_world), leaf to root
    pub fn world_to_local(&self, id: TransformId) -> Matrix4<f32> {
        self.ancestors(id)
            .fold(self.get(id).inverse_local_matrix(), |local, ancestor| {
                local * self.get(ancestor).inverse_local_matrix()
            })
    }

    /// World-space position of the node's local origin
    pub fn world_position(&self, id: TransformId) -> Vector3<f32> {
        self.local_to_world(id).w.truncate()
    }
}

/// Iterator returned by [`TransformTree::ancestors`]
pub struct Ancestors<'a> {
    tree: &'a TransformTree,
    next: Option<TransformId>,
}

impl Iterator for Ancestors<'_> {
    type Item = TransformId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, InnerSpace, Rotation3, SquareMatrix, Vector4};

    const EPSILON: f32 = 1e-5;

    fn approx_eq_mat(a: Matrix4<f32>, b: Matrix4<f32>) -> bool {
        let a: &[f32; 16] = a.as_ref();
        let b: &[f32; 16] = b.as_ref();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < EPSILON)
    }

    fn approx_eq_vec(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    fn sample_transform() -> Transform {
        Transform::new(
            Vector3::new(1.0, -2.0, 0.5),
            Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), Deg(30.0)),
            Vector3::new(2.0, 2.0, 2.0),
        )
    }

    #[test]
    fn test_root_world_matrix_is_local_composition() {
        let mut tree = TransformTree::new();
        let t = sample_transform();
        let id = tree.insert(t);

        let expected = Matrix4::from_translation(t.position)
            * Matrix4::from(t.rotation)
            * Matrix4::from_nonuniform_scale(2.0, 2.0, 2.0);

        assert_eq!(tree.local_to_world(id), expected);
    }

    #[test]
    fn test_three_level_chain_composes_translations() {
        let mut tree = TransformTree::new();
        let a = tree.insert(Transform::from_position(Vector3::new(1.0, 0.0, 0.0)));
        let b = tree.insert(Transform::new(
            Vector3::new(0.0, 2.0, 0.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Vector3::new(2.0, 2.0, 2.0),
        ));
        let c = tree.insert(Transform::from_position(Vector3::new(0.0, 0.0, 3.0)));
        tree.set_parent(b, Some(a)).unwrap();
        tree.set_parent(c, Some(b)).unwrap();

        // c's offset is scaled by b's scale before b's and a's translations
        assert!(approx_eq_vec(
            tree.world_position(c),
            Vector3::new(1.0, 2.0, 6.0)
        ));
        assert!(approx_eq_mat(
            tree.local_to_world(c),
            tree.local_to_world(b) * tree.get(c).local_matrix()
        ));
    }

    #[test]
    fn test_parent_rotation_moves_child() {
        let mut tree = TransformTree::new();
        let base = tree.insert(Transform::default());
        let link = tree.insert(Transform::from_position(Vector3::new(1.0, 0.0, 0.0)));
        tree.set_parent(link, Some(base)).unwrap();

        tree.get_mut(base).rotation =
            Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), Deg(90.0));

        assert!(approx_eq_vec(
            tree.world_position(link),
            Vector3::new(0.0, 1.0, 0.0)
        ));
    }

    #[test]
    fn test_set_parent_changes_world_without_local_change() {
        let mut tree = TransformTree::new();
        let parent = tree.insert(Transform::from_position(Vector3::new(5.0, 0.0, 0.0)));
        let child = tree.insert(Transform::from_position(Vector3::new(0.0, 1.0, 0.0)));

        assert!(approx_eq_vec(tree.world_position(child), Vector3::new(0.0, 1.0, 0.0)));
        tree.set_parent(child, Some(parent)).unwrap();
        assert!(approx_eq_vec(tree.world_position(child), Vector3::new(5.0, 1.0, 0.0)));
        tree.set_parent(child, None).unwrap();
        assert!(approx_eq_vec(tree.world_position(child), Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_self_parent_rejected() {
        let mut tree = TransformTree::new();
        let a = tree.insert(Transform::default());

        assert_eq!(
            tree.set_parent(a, Some(a)),
            Err(SceneError::Cycle { child: a, parent: a })
        );
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_descendant_parent_rejected() {
        let mut tree = TransformTree::new();
        let a = tree.insert(Transform::default());
        let b = tree.insert(Transform::default());
        let c = tree.insert(Transform::default());
        tree.set_parent(b, Some(a)).unwrap();
        tree.set_parent(c, Some(b)).unwrap();

        // A under C would make A its own ancestor
        assert_eq!(
            tree.set_parent(a, Some(c)),
            Err(SceneError::Cycle { child: a, parent: c })
        );
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_reparent_to_sibling_branch_allowed() {
        let mut tree = TransformTree::new();
        let root = tree.insert(Transform::default());
        let left = tree.insert(Transform::default());
        let right = tree.insert(Transform::default());
        tree.set_parent(left, Some(root)).unwrap();
        tree.set_parent(right, Some(root)).unwrap();

        assert!(tree.set_parent(right, Some(left)).is_ok());
        assert_eq!(tree.ancestors(right).collect::<Vec<_>>(), vec![left, root]);
    }

    #[test]
    fn test_world_to_local_round_trip() {
        let mut tree = TransformTree::new();
        let parent = tree.insert(sample_transform());
        let child = tree.insert(Transform::new(
            Vector3::new(-0.3, 4.0, 1.25),
            Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0).normalize(), Deg(-70.0)),
            Vector3::new(0.5, 0.5, 0.5),
        ));
        tree.set_parent(child, Some(parent)).unwrap();

        let product = tree.world_to_local(child) * tree.local_to_world(child);
        assert!(approx_eq_mat(product, Matrix4::identity()));
    }

    #[test]
    fn test_world_to_local_handles_nonuniform_scale() {
        let mut tree = TransformTree::new();
        let id = tree.insert(Transform::new(
            Vector3::new(1.0, 2.0, 3.0),
            Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), Deg(45.0)),
            Vector3::new(1.0, 3.0, 0.5),
        ));

        let general = tree.local_to_world(id).invert().unwrap();
        assert!(approx_eq_mat(tree.world_to_local(id), general));
    }

    #[test]
    fn test_collapsed_scale_stays_finite() {
        let mut tree = TransformTree::new();
        let id = tree.insert(Transform::new(
            Vector3::new(1.0, 1.0, 1.0),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
        ));

        let inverse = tree.world_to_local(id);
        let values: &[f32; 16] = inverse.as_ref();
        assert!(values.iter().all(|v| v.is_finite()));

        // Every point collapses onto the node's origin
        let p = tree.local_to_world(id) * Vector4::new(3.0, -1.0, 7.0, 1.0);
        assert!(approx_eq_vec(p.truncate(), Vector3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_insert_discards_foreign_parent() {
        let mut tree = TransformTree::new();
        let a = tree.insert(Transform::default());
        let b = tree.insert(Transform::default());
        tree.set_parent(b, Some(a)).unwrap();

        let copy = *tree.get(b);
        assert_eq!(copy.parent(), Some(a));
        let c = tree.insert(copy);
        assert_eq!(tree.parent(c), None);
        assert!(tree.local_to_world(c).is_invertible());
    }
}
