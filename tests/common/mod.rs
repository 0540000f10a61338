//! In-memory mesh and scene blobs shared by the integration tests

#![allow(dead_code)]

use robopop::assets::{
    chunk::write_chunk,
    mesh_library::MeshIndexRecord,
    scene_blob::SceneRecord,
};
use robopop::gfx::scene::Vertex3D;

/// Every mesh the balloon demo looks up, plus a few props
pub const DEMO_MESHES: [&str; 13] = [
    "Base",
    "Link1",
    "Link2",
    "Link3",
    "Balloon1.001",
    "Balloon2.001",
    "Balloon3.001",
    "Balloon1-Pop",
    "Balloon2-Pop",
    "Balloon3-Pop",
    "Cube",
    "Stand",
    "WoodenCrate",
];

fn triangle(colour: [u8; 4]) -> [Vertex3D; 3] {
    let normal = [0.0, 0.0, 1.0];
    [
        Vertex3D { position: [0.0, 0.0, 0.0], normal, colour },
        Vertex3D { position: [1.0, 0.0, 0.0], normal, colour },
        Vertex3D { position: [0.0, 1.0, 0.0], normal, colour },
    ]
}

/// A mesh blob with one triangle per name, in the given order
pub fn mesh_blob(names: &[&str]) -> Vec<u8> {
    let mut vertices = Vec::new();
    let mut strings = Vec::new();
    let mut index = Vec::new();

    for (i, name) in names.iter().enumerate() {
        let name_begin = strings.len() as u32;
        strings.extend_from_slice(name.as_bytes());
        let vertex_begin = vertices.len() as u32;
        vertices.extend_from_slice(&triangle([i as u8, 128, 255, 255]));

        index.push(MeshIndexRecord {
            name_begin,
            name_end: strings.len() as u32,
            vertex_begin,
            vertex_end: vertices.len() as u32,
        });
    }

    let mut blob = Vec::new();
    write_chunk(&mut blob, b"pnc.", bytemuck::cast_slice(&vertices));
    write_chunk(&mut blob, b"str0", &strings);
    write_chunk(&mut blob, b"idx0", bytemuck::cast_slice(&index));
    blob
}

/// A scene blob placing each name at the given position, unrotated and
/// unscaled
pub fn scene_blob(placements: &[(&str, [f32; 3])]) -> Vec<u8> {
    let mut strings = Vec::new();
    let mut records = Vec::new();

    for (name, position) in placements {
        let name_begin = strings.len() as u32;
        strings.extend_from_slice(name.as_bytes());
        records.push(SceneRecord {
            name_begin,
            name_end: strings.len() as u32,
            position: *position,
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        });
    }

    let mut blob = Vec::new();
    write_chunk(&mut blob, b"str0", &strings);
    write_chunk(&mut blob, b"scn0", bytemuck::cast_slice(&records));
    blob
}

/// The props of the exported scene, plus the exported (and ignored) copies
/// of the arm and balloons
pub fn demo_scene_blob() -> Vec<u8> {
    scene_blob(&[
        ("Cube", [0.0, 0.0, -0.5]),
        ("Stand", [2.0, 2.0, 0.0]),
        ("Base", [9.0, 9.0, 9.0]),
        ("WoodenCrate", [-2.0, 1.0, 0.0]),
        ("Balloon1.001", [9.0, 9.0, 9.0]),
        ("Stand.001", [9.0, 9.0, 9.0]),
    ])
}
