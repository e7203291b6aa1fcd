//! Validation errors surfaced at configure time, never mid-frame.

use thiserror::Error;

/// Rejected culling configuration. Checked when a pipeline is created and
/// whenever per-camera overrides are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid cell size must be positive (got {0})")]
    InvalidGridSize(u32),

    #[error("max lights must be in 1..={max} (got {got})")]
    InvalidMaxLights { got: usize, max: usize },

    #[error("max lights per partition must be in 1..={max} (got {got})")]
    InvalidMaxLightsPerPartition { got: usize, max: usize },

    #[error("cluster depth step ratio must be greater than 1 (got {0})")]
    InvalidStepRatio(f32),

    #[error("cluster depth start step must be non-negative and finite (got {0})")]
    InvalidStartStep(f32),

    #[error("cluster far plane cap must be positive and finite (got {0})")]
    InvalidZFarMax(f32),
}

/// Rejected camera parameters. Degenerate cameras would otherwise propagate
/// `NaN` through every partition plane.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CameraError {
    #[error("clip planes must be finite and positive with near < far (near {near}, far {far})")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("vertical field of view must lie in (0, pi) (got {0})")]
    InvalidFieldOfView(f32),

    #[error("aspect ratio must be finite and positive (got {0})")]
    InvalidAspect(f32),

    #[error("pixel dimensions must be non-zero (got {width}x{height})")]
    InvalidViewport { width: u32, height: u32 },

    #[error("projection or view matrix contains non-finite values")]
    NonFiniteMatrix,
}

/// Union error type returned by the pipeline's configure step.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CullingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Camera(#[from] CameraError),
}
