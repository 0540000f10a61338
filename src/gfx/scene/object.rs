use std::ops::Range;

use super::transform::TransformId;

/// Pipeline used for every mesh the scene viewer draws
pub const LIT_PIPELINE: &str = "lit";

/// A contiguous run of vertices in the mesh library's shared vertex buffer
///
/// Non-owning: the vertices live in the [`MeshLibrary`] and its GPU buffer.
///
/// [`MeshLibrary`]: crate::assets::MeshLibrary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drawable {
    pub start: u32,
    pub count: u32,
}

impl Drawable {
    pub fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }

    /// Vertex range for a non-indexed draw call
    pub fn range(&self) -> Range<u32> {
        self.start..self.start + self.count
    }
}

/// Handle to an [`Object`] in a [`Scene`](super::Scene), in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A drawable placed by a node of the scene's transform tree
#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub transform: TransformId,
    pub drawable: Drawable,
    /// Name of the render pipeline that draws this object
    pub pipeline: &'static str,
}

impl Object {
    pub fn new(name: impl Into<String>, transform: TransformId, drawable: Drawable) -> Self {
        Self {
            name: name.into(),
            transform,
            drawable,
            pipeline: LIT_PIPELINE,
        }
    }
}
