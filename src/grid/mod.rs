//! Partition grid construction: camera parameter snapshots, exponential
//! depth slicing, and the tile/cluster frustum builder.

pub mod builder;
pub mod camera;
pub mod slicing;

pub use builder::{GridDimensions, PartitionGrid};
pub use camera::CameraParams;
pub use slicing::DepthSlicing;
