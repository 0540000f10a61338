//! Named mesh ranges over one shared vertex array
//!
//! `meshes.blob` layout, in chunk order:
//!
//! - `pnc.` vertices, 28 bytes each (position, normal, RGBA8 colour)
//! - `str0` concatenated mesh names
//! - `idx0` 16-byte entries `{name_begin, name_end, vertex_begin, vertex_end}`
//!
//! Meshes are non-indexed triangle lists, so a mesh is simply a contiguous
//! run of vertices.

use std::{collections::HashMap, path::Path};

use crate::{
    assets::chunk::{name_slice, ChunkReader},
    error::{FormatError, SceneError},
    gfx::scene::{object::Drawable, vertex::Vertex3D},
};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshIndexRecord {
    pub name_begin: u32,
    pub name_end: u32,
    pub vertex_begin: u32,
    pub vertex_end: u32,
}

/// Every mesh in a blob plus the vertex data they index into
#[derive(Debug, Default, Clone)]
pub struct MeshLibrary {
    vertices: Vec<Vertex3D>,
    meshes: HashMap<String, Drawable>,
}

impl MeshLibrary {
    /// Reads and parses a mesh blob from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FormatError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let library = Self::from_bytes(&bytes)?;
        log::info!(
            "Loaded {} meshes ({} vertices) from {}",
            library.meshes.len(),
            library.vertices.len(),
            path.display()
        );
        Ok(library)
    }

    /// Parses an in-memory mesh blob
    ///
    /// # Errors
    /// Any [`FormatError`]: bad chunk headers or sizes, name ranges outside the
    /// string table, vertex ranges outside the vertex chunk.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut reader = ChunkReader::new(bytes);
        let vertices: Vec<Vertex3D> = reader.read_records(b"pnc.")?;
        let strings = reader.read_bytes(b"str0")?;
        let entries: Vec<MeshIndexRecord> = reader.read_records(b"idx0")?;

        let mut meshes = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let name = name_slice(strings, index, entry.name_begin, entry.name_end)?;

            if !(entry.vertex_begin <= entry.vertex_end
                && entry.vertex_end as usize <= vertices.len())
            {
                return Err(FormatError::VertexRange {
                    index,
                    begin: entry.vertex_begin,
                    end: entry.vertex_end,
                    len: vertices.len(),
                });
            }

            let drawable = Drawable::new(entry.vertex_begin, entry.vertex_end - entry.vertex_begin);
            if meshes.insert(name.clone(), drawable).is_some() {
                log::warn!("Duplicate mesh name '{}', keeping the last entry", name);
            }
        }

        Ok(Self { vertices, meshes })
    }

    /// Builds a library from already-decoded parts
    pub fn from_parts(vertices: Vec<Vertex3D>, meshes: HashMap<String, Drawable>) -> Self {
        Self { vertices, meshes }
    }

    /// Looks up a mesh by name
    ///
    /// # Errors
    /// [`SceneError::MeshNotFound`] if no mesh has that name.
    pub fn get(&self, name: &str) -> Result<Drawable, SceneError> {
        self.meshes
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::MeshNotFound(name.to_string()))
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
