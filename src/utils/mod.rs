//! Utility helpers: log-backed stage timers and the frame profiler.

pub mod logging;
pub mod profiling;

pub use logging::ScopedTimer;
pub use profiling::CullingProfiler;
