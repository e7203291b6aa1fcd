//! Photon Sieve – light culling for forward renderers.
//!
//! This crate partitions a camera's view space into screen-space tiles or
//! depth-sliced clusters, assigns visible lights to the partitions in
//! parallel, and packs the per-partition light lists into fixed-capacity
//! buffers ready for a shading stage to consume.

pub mod config;
pub mod culling;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod lights;
pub mod output;
pub mod pipeline;
pub mod utils;

pub use glam::{IVec4, Mat4, UVec2, Vec3, Vec4};

pub use config::{CameraOverrides, CullingConfig, CullingMode};
pub use culling::{assign_lights, pack_buffers, AssignOptions, AssignmentTable, PackStats};
pub use error::{CameraError, ConfigError, CullingError};
pub use geometry::{Cone, Frustum, Plane, Sphere};
pub use grid::{CameraParams, DepthSlicing, GridDimensions, PartitionGrid};
pub use lights::{Light, LightKind, LightSet, VisibleLight};
pub use output::{
    CaptureUpload, CullingUniforms, GridEntry, IndexListSegments, LightAttributeBuffer,
    NoopUpload, PackedBuffers, PartitionGridBuffer, UploadBackend,
};
pub use pipeline::{CullingPipeline, RendererJob};
pub use utils::CullingProfiler;

/// High-level convenience wrapper that owns a [`CullingPipeline`] and runs
/// the whole hook sequence in one call.
pub struct CullingEngine {
    pipeline: CullingPipeline,
}

impl CullingEngine {
    /// Creates an engine with the provided renderer-level settings.
    pub fn new(config: CullingConfig) -> Result<Self, CullingError> {
        Ok(Self {
            pipeline: CullingPipeline::new(config)?,
        })
    }

    /// Culls one frame: configure, collect + assign, pack. Returns the
    /// packed buffers for this frame.
    pub fn cull_frame(
        &mut self,
        camera: &CameraParams,
        visible_lights: &[VisibleLight],
    ) -> Result<&PackedBuffers, CullingError> {
        self.pipeline.configure(camera)?;
        self.pipeline.before_draw(visible_lights);
        self.pipeline.after_draw();
        Ok(self.pipeline.buffers())
    }

    /// Enables or disables parallel execution of the collect and assign
    /// passes.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.pipeline.set_parallel_enabled(enabled);
    }

    /// Returns whether the engine is currently using parallel execution.
    pub fn parallel_enabled(&self) -> bool {
        self.pipeline.parallel_enabled()
    }

    pub fn pipeline(&self) -> &CullingPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut CullingPipeline {
        &mut self.pipeline
    }
}
