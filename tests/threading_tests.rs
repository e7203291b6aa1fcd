use glam::Mat4;
use photon_sieve::{CameraParams, CullingConfig, CullingEngine, CullingPipeline, VisibleLight};
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_culling_pipeline_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<CullingPipeline>();
    assert_sync_send::<CullingEngine>();
}

#[test]
fn test_shared_engine_across_threads() {
    let engine = Arc::new(Mutex::new(
        CullingEngine::new(CullingConfig::default()).unwrap(),
    ));
    let camera =
        CameraParams::perspective(60f32.to_radians(), 640, 360, 0.3, 100.0, Mat4::IDENTITY);

    let mut handles = vec![];
    for _ in 0..4 {
        let engine_clone = Arc::clone(&engine);
        let handle = thread::spawn(move || {
            let mut engine = engine_clone.lock().unwrap();
            let lights = [VisibleLight::directional(Mat4::IDENTITY, glam::Vec4::ONE)];
            engine.cull_frame(&camera, &lights).unwrap();
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
