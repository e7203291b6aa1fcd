//! Configuration for the culling pipeline: compile-time sizing constants,
//! renderer-level settings, and per-camera overrides.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of light slots reserved in the packed attribute buffer.
pub const DEFAULT_MAX_LIGHTS: usize = 512;

/// Default screen-space cell size, in pixels, of one tile/cluster column.
pub const DEFAULT_GRID_SIZE: u32 = 16;

/// Default cap on light indices recorded per partition.
pub const DEFAULT_MAX_LIGHTS_PER_PARTITION: usize = 32;

/// Default far-plane cap for cluster depth slicing.
pub const DEFAULT_Z_FAR_MAX: f32 = 1000.0;

/// Default batch granularity for the parallel assignment pass.
pub const DEFAULT_ASSIGN_BATCH: usize = 64;

/// Ceiling on total cluster count; depth slicing stops before exceeding it.
pub const MAX_CLUSTERS_COUNT: usize = 4096;

/// Number of fixed-capacity index-list segments in the packed output.
pub const INDEX_LIST_SEGMENTS: usize = 4;

/// Four-wide slots per index-list segment (4 light indices per slot).
pub const INDEX_LIST_SLOTS_PER_SEGMENT: usize = 4096;

/// Light indices are packed as 16-bit values; more lights than this cannot
/// be addressed by the index lists.
pub const MAX_ADDRESSABLE_LIGHTS: usize = 1 << 16;

/// Partitioning scheme used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CullingMode {
    /// 2D screen-space tiles spanning the whole camera depth range.
    #[default]
    Tile,
    /// 3D clusters with exponential depth slicing.
    Cluster,
}

/// Renderer-level culling settings. Zero-valued cluster depth fields mean
/// "derive from the camera field of view".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    pub mode: CullingMode,
    /// Screen-space cell size in pixels.
    pub grid_size: u32,
    /// Global light capacity; extra visible lights are silently truncated.
    pub max_lights: usize,
    /// Per-partition cap; assignment stops early once a partition is full.
    pub max_lights_per_partition: usize,
    /// Cluster mode: thickness of the first depth slice (0 = derive).
    pub z_start_step: f32,
    /// Cluster mode: geometric growth ratio between slices (0 = derive).
    pub z_step_ratio: f32,
    /// Cluster mode: depth slicing never extends past this view depth.
    pub z_far_max: f32,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            mode: CullingMode::default(),
            grid_size: DEFAULT_GRID_SIZE,
            max_lights: DEFAULT_MAX_LIGHTS,
            max_lights_per_partition: DEFAULT_MAX_LIGHTS_PER_PARTITION,
            z_start_step: 0.0,
            z_step_ratio: 0.0,
            z_far_max: DEFAULT_Z_FAR_MAX,
        }
    }
}

impl CullingConfig {
    /// Applies per-camera overrides on top of these settings, field by
    /// field. Non-positive override values fall back to the renderer value.
    pub fn resolve(&self, overrides: Option<&CameraOverrides>) -> Self {
        let Some(ov) = overrides else {
            return *self;
        };

        Self {
            mode: self.mode,
            grid_size: if ov.grid_size > 0 {
                ov.grid_size
            } else {
                self.grid_size
            },
            max_lights: if ov.max_lights > 0 {
                ov.max_lights
            } else {
                self.max_lights
            },
            max_lights_per_partition: if ov.max_lights_per_partition > 0 {
                ov.max_lights_per_partition
            } else {
                self.max_lights_per_partition
            },
            z_start_step: if ov.z_start_step > 0.0 {
                ov.z_start_step
            } else {
                self.z_start_step
            },
            z_step_ratio: if ov.z_step_ratio > 0.0 {
                ov.z_step_ratio
            } else {
                self.z_step_ratio
            },
            z_far_max: if ov.z_far_max > 0.0 {
                ov.z_far_max
            } else {
                self.z_far_max
            },
        }
    }

    /// Rejects settings the packed output cannot represent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        if self.max_lights == 0 || self.max_lights > MAX_ADDRESSABLE_LIGHTS {
            return Err(ConfigError::InvalidMaxLights {
                got: self.max_lights,
                max: MAX_ADDRESSABLE_LIGHTS,
            });
        }
        let per_partition_max = INDEX_LIST_SLOTS_PER_SEGMENT * 4;
        if self.max_lights_per_partition == 0 || self.max_lights_per_partition > per_partition_max {
            return Err(ConfigError::InvalidMaxLightsPerPartition {
                got: self.max_lights_per_partition,
                max: per_partition_max,
            });
        }
        if !self.z_start_step.is_finite() || self.z_start_step < 0.0 {
            return Err(ConfigError::InvalidStartStep(self.z_start_step));
        }
        if !self.z_step_ratio.is_finite() || (self.z_step_ratio != 0.0 && self.z_step_ratio <= 1.0)
        {
            return Err(ConfigError::InvalidStepRatio(self.z_step_ratio));
        }
        if !self.z_far_max.is_finite() || self.z_far_max <= 0.0 {
            return Err(ConfigError::InvalidZFarMax(self.z_far_max));
        }
        Ok(())
    }
}

/// Per-camera overrides. A zero (or negative, for the float fields) value
/// leaves the renderer-level setting in effect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOverrides {
    pub grid_size: u32,
    pub max_lights: usize,
    pub max_lights_per_partition: usize,
    pub z_start_step: f32,
    pub z_step_ratio: f32,
    pub z_far_max: f32,
}
