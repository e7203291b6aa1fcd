use glam::{Mat4, Vec4};
use photon_sieve::{
    geometry::screen_to_view, CameraParams, CullingConfig, CullingEngine, CullingMode,
    VisibleLight,
};

fn camera() -> CameraParams {
    CameraParams::perspective(60f32.to_radians(), 1280, 720, 0.3, 100.0, Mat4::IDENTITY)
}

/// A point light sitting at the center of tile 0's sub-frustum at the given
/// view depth. The side planes pass through the eye, so scaling a near-plane
/// point stays inside the same tile pyramid.
fn light_inside_tile0(cam: &CameraParams, depth: f32, range: f32) -> VisibleLight {
    let near_point = screen_to_view(
        Vec4::new(8.0, 8.0, -1.0, 1.0),
        cam.screen_dimension(),
        &cam.inverse_projection,
    )
    .truncate();
    let position = near_point * (depth / cam.z_near);

    VisibleLight::point(Mat4::from_translation(position), range, Vec4::ONE)
}

#[test]
fn isolated_point_light_lands_only_in_tile_zero() {
    let cam = camera();
    let mut engine = CullingEngine::new(CullingConfig {
        grid_size: 16,
        ..CullingConfig::default()
    })
    .unwrap();

    engine
        .cull_frame(&cam, &[light_inside_tile0(&cam, 20.0, 0.05)])
        .unwrap();

    let table = engine.pipeline().assignment();
    assert_eq!(table.partition_count(), 3600);
    assert_eq!(table.lights_for(0), &[0]);
    for partition in 1..table.partition_count() {
        assert!(
            table.lights_for(partition).is_empty(),
            "light leaked into partition {partition}"
        );
    }
}

#[test]
fn directional_light_is_ubiquitous_in_both_modes() {
    for mode in [CullingMode::Tile, CullingMode::Cluster] {
        let mut engine = CullingEngine::new(CullingConfig {
            mode,
            grid_size: 64,
            ..CullingConfig::default()
        })
        .unwrap();

        engine
            .cull_frame(
                &camera(),
                &[VisibleLight::directional(Mat4::IDENTITY, Vec4::ONE)],
            )
            .unwrap();

        let table = engine.pipeline().assignment();
        for partition in 0..table.partition_count() {
            assert_eq!(
                table.lights_for(partition),
                &[0],
                "partition {partition} missing the directional light ({mode:?})"
            );
        }
    }
}

#[test]
fn per_partition_truncation_is_deterministic_and_bounded() {
    let mut engine = CullingEngine::new(CullingConfig {
        grid_size: 64,
        max_lights_per_partition: 4,
        ..CullingConfig::default()
    })
    .unwrap();

    // Ten directional lights all pass everywhere; only four fit.
    let lights = vec![VisibleLight::directional(Mat4::IDENTITY, Vec4::ONE); 10];
    engine.cull_frame(&camera(), &lights).unwrap();

    let table = engine.pipeline().assignment();
    for partition in 0..table.partition_count() {
        assert_eq!(table.count(partition), 4);
        // Scan order makes the surviving prefix deterministic.
        assert_eq!(table.lights_for(partition), &[0, 1, 2, 3]);
    }

    // Repeat the frame: identical result.
    engine.cull_frame(&camera(), &lights).unwrap();
    assert_eq!(engine.pipeline().assignment().lights_for(0), &[0, 1, 2, 3]);
}

#[test]
fn global_light_capacity_truncates_collection() {
    let mut engine = CullingEngine::new(CullingConfig {
        grid_size: 64,
        max_lights: 8,
        ..CullingConfig::default()
    })
    .unwrap();

    let lights = vec![VisibleLight::directional(Mat4::IDENTITY, Vec4::ONE); 32];
    let buffers = engine.cull_frame(&camera(), &lights).unwrap();

    assert_eq!(buffers.uniforms.lights_count, 8);
}

#[test]
fn spot_light_follows_its_cone() {
    let cam = camera();
    let mut engine = CullingEngine::new(CullingConfig {
        grid_size: 16,
        ..CullingConfig::default()
    })
    .unwrap();

    // A narrow spot at the tile-0 position, aimed further away from the
    // camera axis (outward through the frustum corner): it must at least
    // hit tile 0 itself.
    let position = {
        let near_point = screen_to_view(
            Vec4::new(8.0, 8.0, -1.0, 1.0),
            cam.screen_dimension(),
            &cam.inverse_projection,
        )
        .truncate();
        near_point * (20.0 / cam.z_near)
    };
    let rig = Mat4::from_cols(
        Vec4::X,
        Vec4::Y,
        position.normalize().extend(0.0),
        position.extend(1.0),
    );
    let spot = VisibleLight::spot(rig, 1.0, 20.0, Vec4::ONE);

    engine.cull_frame(&cam, &[spot]).unwrap();

    let table = engine.pipeline().assignment();
    assert_eq!(table.lights_for(0), &[0]);

    // The far-corner tile cannot see it.
    let last = table.partition_count() - 1;
    assert!(table.lights_for(last).is_empty());
}

#[test]
fn mid_session_resolution_change_rebuilds_and_keeps_working() {
    let mut engine = CullingEngine::new(CullingConfig::default()).unwrap();
    let lights = [VisibleLight::directional(Mat4::IDENTITY, Vec4::ONE)];

    engine.cull_frame(&camera(), &lights).unwrap();
    assert_eq!(engine.pipeline().grid().partition_count(), 3600);

    let small = CameraParams::perspective(
        60f32.to_radians(),
        640,
        360,
        0.3,
        100.0,
        Mat4::IDENTITY,
    );
    engine.cull_frame(&small, &lights).unwrap();

    let grid = engine.pipeline().grid();
    assert_eq!(grid.dimensions().x, 40);
    assert_eq!(grid.dimensions().y, 23);
    assert_eq!(
        engine.pipeline().assignment().partition_count(),
        grid.partition_count()
    );
}
