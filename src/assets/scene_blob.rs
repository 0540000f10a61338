//! Object placements exported from the modelling tool
//!
//! `scene.blob` holds a `str0` chunk of concatenated names followed by a
//! `scn0` chunk of 48-byte [`SceneRecord`]s.

use std::path::Path;

use cgmath::{Quaternion, Vector3};

use crate::{
    assets::chunk::{name_slice, ChunkReader},
    error::FormatError,
    gfx::scene::transform::Transform,
};

/// On-disk placement record
///
/// The rotation is stored `x, y, z, w`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneRecord {
    pub name_begin: u32,
    pub name_end: u32,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

/// A decoded placement: which mesh, and where
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry {
    pub name: String,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl SceneEntry {
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation, self.scale)
    }
}

/// Reads and parses a scene blob from disk
pub fn load(path: impl AsRef<Path>) -> Result<Vec<SceneEntry>, FormatError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| FormatError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let entries = parse(&bytes)?;
    log::info!("Loaded {} scene entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parses an in-memory scene blob, preserving record order
///
/// # Errors
/// [`FormatError::NameRange`] if any record has `name_begin > name_end` or
/// `name_end` past the string table; chunk errors from [`ChunkReader`].
pub fn parse(bytes: &[u8]) -> Result<Vec<SceneEntry>, FormatError> {
    let mut reader = ChunkReader::new(bytes);
    let strings = reader.read_bytes(b"str0")?;
    let records: Vec<SceneRecord> = reader.read_records(b"scn0")?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let name = name_slice(strings, index, record.name_begin, record.name_end)?;
            let [x, y, z, w] = record.rotation;
            Ok(SceneEntry {
                name,
                position: record.position.into(),
                rotation: Quaternion::new(w, x, y, z),
                scale: record.scale.into(),
            })
        })
        .collect()
}
