use glam::Mat4;
use photon_sieve::{
    config::MAX_CLUSTERS_COUNT, CameraParams, CullingConfig, CullingMode, DepthSlicing,
    PartitionGrid,
};

fn camera(width: u32, height: u32) -> CameraParams {
    CameraParams::perspective(
        60f32.to_radians(),
        width,
        height,
        0.3,
        100.0,
        Mat4::IDENTITY,
    )
}

#[test]
fn tile_partition_count_matches_ceil_formula() {
    for (width, height, grid_size) in [
        (1280u32, 720u32, 16u32),
        (1920, 1080, 32),
        (1000, 500, 48),
        (17, 15, 16),
    ] {
        let config = CullingConfig {
            grid_size,
            ..CullingConfig::default()
        };
        let grid = PartitionGrid::build(&camera(width, height), &config);

        let expected = width.div_ceil(grid_size) as usize * height.div_ceil(grid_size) as usize;
        assert_eq!(
            grid.partition_count(),
            expected,
            "{width}x{height} at grid {grid_size}"
        );
    }
}

#[test]
fn reference_resolution_yields_80_by_45() {
    let config = CullingConfig {
        grid_size: 16,
        ..CullingConfig::default()
    };
    let grid = PartitionGrid::build(&camera(1280, 720), &config);

    assert_eq!(grid.dimensions().x, 80);
    assert_eq!(grid.dimensions().y, 45);
    assert_eq!(grid.partition_count(), 3600);
}

#[test]
fn cluster_slice_count_is_minimal_for_depth_cap() {
    let cam = camera(1280, 720);
    let config = CullingConfig {
        mode: CullingMode::Cluster,
        grid_size: 128,
        z_far_max: 60.0,
        ..CullingConfig::default()
    };
    let grid = PartitionGrid::build(&cam, &config);
    let dims = grid.dimensions();

    // Recompute the series independently.
    let slicing = DepthSlicing::from_camera(&cam, dims.y);
    let z_limit = config.z_far_max.min(cam.z_far);

    assert!(slicing.slice_near(dims.z) >= z_limit);
    assert!(
        slicing.slice_near(dims.z - 1) < z_limit,
        "slice count {} is not minimal",
        dims.z
    );
}

#[test]
fn cluster_partition_count_honors_ceiling() {
    // A tiny grid size would explode the xy cell count; the depth axis must
    // shrink to keep the total under the ceiling.
    let config = CullingConfig {
        mode: CullingMode::Cluster,
        grid_size: 16,
        ..CullingConfig::default()
    };
    let grid = PartitionGrid::build(&camera(1280, 720), &config);

    assert!(grid.partition_count() <= MAX_CLUSTERS_COUNT);
    assert!(grid.dimensions().z >= 1);
}

#[test]
fn cluster_mode_reports_slicing_parameters() {
    let config = CullingConfig {
        mode: CullingMode::Cluster,
        grid_size: 64,
        ..CullingConfig::default()
    };
    let grid = PartitionGrid::build(&camera(1280, 720), &config);

    let slicing = grid.slicing().expect("cluster grids carry slicing");
    assert!(slicing.ratio() > 1.0);
    assert!(slicing.step() > 0.0);

    let tile_grid = PartitionGrid::build(&camera(1280, 720), &CullingConfig::default());
    assert!(tile_grid.slicing().is_none());
}
