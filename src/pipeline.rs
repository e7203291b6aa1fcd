use std::time::Instant;

use log::{info, warn};

use crate::{
    config::{CameraOverrides, CullingConfig, CullingMode, DEFAULT_ASSIGN_BATCH},
    culling::{assign_lights, pack_buffers, AssignOptions, AssignmentTable},
    error::CullingError,
    grid::{CameraParams, PartitionGrid},
    lights::{LightSet, VisibleLight},
    output::{NoopUpload, PackedBuffers, UploadBackend},
    utils::{CullingProfiler, ScopedTimer},
};

/// The renderer-job hook interface. The host invokes the hooks in a fixed
/// order every frame:
///
/// 1. [`configure`](RendererJob::configure) with this frame's camera:
///    validates parameters and rebuilds partitions when they changed;
/// 2. [`light_budget`](RendererJob::light_budget): how many visible
///    lights the host should hand over at most;
/// 3. [`before_draw`](RendererJob::before_draw) with the visible-light
///    list: runs collection and assignment. Both parallel stages have
///    completed by the time the call returns;
/// 4. [`after_draw`](RendererJob::after_draw): packs the output buffers
///    and hands them to the upload backend.
///
/// Disposal is `Drop`. Hooks called out of order are ignored with a log
/// warning; they never panic and never corrupt the previous frame.
pub trait RendererJob {
    fn configure(&mut self, camera: &CameraParams) -> Result<(), CullingError>;
    fn light_budget(&self) -> usize;
    fn before_draw(&mut self, visible_lights: &[VisibleLight]);
    fn after_draw(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FrameStage {
    #[default]
    Idle,
    Configured,
    Assigned,
}

/// The culling pipeline: owns the partition grid, the per-frame light and
/// assignment storage, and the packed output buffers. All storage is
/// allocated once and reused; only configuration or camera changes resize
/// it, and resizing can only happen in `configure`, strictly between
/// frames.
pub struct CullingPipeline {
    config: CullingConfig,
    overrides: Option<CameraOverrides>,
    resolved: CullingConfig,

    camera: Option<CameraParams>,
    rebuild_key: Option<crate::grid::camera::RebuildKey>,
    grid: PartitionGrid,

    lights: LightSet,
    table: AssignmentTable,
    buffers: PackedBuffers,
    backend: Box<dyn UploadBackend>,

    profiler: CullingProfiler,
    stage: FrameStage,
    parallel_enabled: bool,
    assign_batch_size: usize,
}

impl CullingPipeline {
    pub fn new(config: CullingConfig) -> Result<Self, CullingError> {
        config.validate()?;

        Ok(Self {
            config,
            overrides: None,
            resolved: config,
            camera: None,
            rebuild_key: None,
            grid: PartitionGrid::empty(),
            lights: LightSet::with_capacity(config.max_lights),
            table: AssignmentTable::default(),
            buffers: PackedBuffers::new(config.max_lights, 0),
            backend: Box::new(NoopUpload::new()),
            profiler: CullingProfiler::default(),
            stage: FrameStage::Idle,
            parallel_enabled: true,
            assign_batch_size: DEFAULT_ASSIGN_BATCH,
        })
    }

    /// Installs per-camera overrides; validated against the renderer
    /// settings immediately, applied on the next `configure`.
    pub fn set_camera_overrides(
        &mut self,
        overrides: Option<CameraOverrides>,
    ) -> Result<(), CullingError> {
        self.config.resolve(overrides.as_ref()).validate()?;
        self.overrides = overrides;
        // Force a rebuild on the next configure.
        self.rebuild_key = None;
        Ok(())
    }

    pub fn set_upload_backend<B>(&mut self, backend: B)
    where
        B: UploadBackend + 'static,
    {
        self.backend = Box::new(backend);
    }

    pub fn upload_backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    /// Minimum partitions per worker in the assignment pass.
    pub fn set_assign_batch_size(&mut self, batch_size: usize) {
        self.assign_batch_size = batch_size.max(1);
    }

    pub fn config(&self) -> &CullingConfig {
        &self.config
    }

    /// Settings in effect after per-camera overrides.
    pub fn resolved_config(&self) -> &CullingConfig {
        &self.resolved
    }

    pub fn grid(&self) -> &PartitionGrid {
        &self.grid
    }

    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    pub fn assignment(&self) -> &AssignmentTable {
        &self.table
    }

    pub fn buffers(&self) -> &PackedBuffers {
        &self.buffers
    }

    pub fn profiler(&self) -> &CullingProfiler {
        &self.profiler
    }

    fn rebuild(&mut self, camera: &CameraParams) {
        self.grid = PartitionGrid::build(camera, &self.resolved);

        let partitions = self.grid.partition_count();
        self.lights.set_capacity(self.resolved.max_lights);
        self.table
            .resize(partitions, self.resolved.max_lights_per_partition);
        self.buffers.attributes.resize(self.resolved.max_lights);
        self.buffers.grid.resize(partitions);

        let dims = self.grid.dimensions();
        info!(
            "Rebuilt partition grid: mode {:?}, grid size {} px, {} partitions ({}x{}x{})",
            self.grid.mode(),
            dims.grid_size,
            partitions,
            dims.x,
            dims.y,
            dims.z
        );
    }

    fn refresh_uniforms(&mut self) {
        let dims = self.grid.dimensions();
        let uniforms = &mut self.buffers.uniforms;

        uniforms.lights_count = self.lights.len() as u32;
        uniforms.grid_dimensions = [dims.x, dims.y, dims.z];
        uniforms.grid_size = dims.grid_size;
        uniforms.clustered = self.grid.mode() == CullingMode::Cluster;
        match self.grid.slicing() {
            Some(slicing) => {
                uniforms.z_start_step = slicing.step();
                uniforms.z_step_ratio = slicing.ratio();
            }
            None => {
                uniforms.z_start_step = 0.0;
                uniforms.z_step_ratio = 0.0;
            }
        }
    }
}

impl RendererJob for CullingPipeline {
    fn configure(&mut self, camera: &CameraParams) -> Result<(), CullingError> {
        camera.validate()?;

        let resolved = self.config.resolve(self.overrides.as_ref());
        resolved.validate()?;

        let key = camera.rebuild_key();
        let needs_rebuild =
            self.rebuild_key != Some(key) || self.resolved != resolved || self.grid.is_empty();
        self.resolved = resolved;

        if needs_rebuild {
            self.rebuild(camera);
            self.rebuild_key = Some(key);
        }

        self.camera = Some(*camera);
        self.profiler.reset();
        self.stage = FrameStage::Configured;
        Ok(())
    }

    fn light_budget(&self) -> usize {
        self.resolved.max_lights
    }

    fn before_draw(&mut self, visible_lights: &[VisibleLight]) {
        let Some(camera) = self.camera else {
            warn!("before_draw called before configure; skipping");
            return;
        };
        if self.stage != FrameStage::Configured {
            warn!("before_draw called out of order; skipping");
            return;
        }

        let frame_start = Instant::now();

        {
            let _timer = ScopedTimer::with_output("lights::collect", &mut self.profiler.collect_time);
            self.lights
                .collect(visible_lights, &camera.world_to_view, self.parallel_enabled);
        }

        self.table.clear();
        {
            let _timer = ScopedTimer::with_output("lights::assign", &mut self.profiler.assign_time);
            assign_lights(
                self.grid.frustums(),
                self.lights.as_slice(),
                &mut self.table,
                AssignOptions {
                    batch_size: self.assign_batch_size,
                    parallel: self.parallel_enabled,
                },
            );
        }

        self.profiler.lights_count = self.lights.len();
        self.profiler.partition_count = self.grid.partition_count();
        self.profiler.assigned_total = self.table.total_assigned();
        self.profiler.total_frame_time += frame_start.elapsed();
        self.stage = FrameStage::Assigned;
    }

    fn after_draw(&mut self) {
        if self.stage != FrameStage::Assigned {
            warn!("after_draw called out of order; skipping");
            return;
        }

        let frame_start = Instant::now();

        let stats = {
            let _timer = ScopedTimer::with_output("buffers::pack", &mut self.profiler.pack_time);
            pack_buffers(self.lights.as_slice(), &self.table, &mut self.buffers)
        };
        self.refresh_uniforms();

        self.backend.upload(&self.buffers);

        self.profiler.spilled_partitions = stats.spilled_partitions;
        self.profiler.total_frame_time += frame_start.elapsed();
        self.stage = FrameStage::Idle;
    }
}
