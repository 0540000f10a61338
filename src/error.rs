//! Error taxonomy for the viewer
//!
//! Every fallible operation happens before the first frame: loading blobs,
//! building the scene and bringing up the GPU. Once the frame loop starts the
//! update and render passes are total.

use thiserror::Error;

use crate::gfx::scene::transform::TransformId;

/// Scene-graph construction failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Re-parenting `child` under `parent` would close a loop in the hierarchy
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    Cycle {
        child: TransformId,
        parent: TransformId,
    },

    /// A mesh required by the scene is missing from the mesh library
    #[error("mesh '{0}' not found in mesh library")]
    MeshNotFound(String),
}

/// Malformed mesh or scene blob
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("expected chunk '{expected}', found '{found}'")]
    ChunkMagic { expected: String, found: String },

    #[error("chunk '{magic}' is {size} bytes, not a multiple of the {record_size}-byte record")]
    ChunkSize {
        magic: String,
        size: usize,
        record_size: usize,
    },

    #[error("truncated data reading '{what}': needed {needed} bytes, {available} available")]
    Truncated {
        what: String,
        needed: usize,
        available: usize,
    },

    #[error("entry {index} has out-of-range name {begin}..{end} (string table is {len} bytes)")]
    NameRange {
        index: usize,
        begin: u32,
        end: u32,
        len: usize,
    },

    #[error("entry {index} has out-of-range vertices {begin}..{end} ({len} vertices loaded)")]
    VertexRange {
        index: usize,
        begin: u32,
        end: u32,
        len: usize,
    },

    #[error("entry {index} name is not valid UTF-8")]
    NameEncoding { index: usize },
}

/// Shader module or pipeline creation rejected by wgpu validation
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to compile shader '{label}':\n{log}")]
    Compile { label: String, log: String },

    #[error("failed to link pipeline '{label}':\n{log}")]
    Link { label: String, log: String },

    #[error("shader '{0}' was never loaded")]
    Missing(String),
}

/// Window, surface or device setup failure; always fatal
#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error(transparent)]
    Shader(#[from] ShaderError),
}
