//! Packed output buffers consumed by the shading stage: light attributes,
//! the per-partition grid, the index-list segments, and the upload seam.

pub mod buffers;
pub mod upload;

pub use buffers::{
    CullingUniforms, GridEntry, IndexListSegments, LightAttributeBuffer, PackedBuffers,
    PartitionGridBuffer,
};
pub use upload::{CaptureUpload, NoopUpload, UploadBackend};
