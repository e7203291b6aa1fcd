use crate::grid::camera::CameraParams;

/// Exponential depth slicing for cluster mode.
///
/// Slice bounds follow the geometric series
/// `Z_k = z_near + step * (ratio^k - 1) / (ratio - 1)`, so each slice is
/// `ratio` times thicker than the previous one. With the FOV-derived
/// defaults `step = 2 * z_near * tan(theta) / rows` and
/// `ratio = 1 + 2 * tan(theta) / rows` (theta = half vertical FOV) this
/// collapses to `Z_k = z_near * ratio^k`, which makes clusters roughly
/// cubical in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSlicing {
    z_near: f32,
    step: f32,
    ratio: f32,
}

impl DepthSlicing {
    /// Derives the slicing from camera FOV and the vertical tile count.
    pub fn from_camera(camera: &CameraParams, rows: u32) -> Self {
        let tan_half_fov = (camera.fov_y * 0.5).tan();
        let rows = rows.max(1) as f32;

        Self {
            z_near: camera.z_near,
            step: 2.0 * camera.z_near * tan_half_fov / rows,
            ratio: 1.0 + 2.0 * tan_half_fov / rows,
        }
    }

    /// Applies configured overrides; non-positive step and ratios not
    /// greater than one keep the derived values.
    pub fn with_overrides(mut self, step: f32, ratio: f32) -> Self {
        if step > 0.0 {
            self.step = step;
        }
        if ratio > 1.0 {
            self.ratio = ratio;
        }
        self
    }

    /// View depth where slice `k` starts; slice 0 starts at the near plane.
    pub fn slice_near(&self, k: u32) -> f32 {
        self.z_near + self.step * (self.ratio.powi(k as i32) - 1.0) / (self.ratio - 1.0)
    }

    /// View depth where slice `k` ends.
    pub fn slice_far(&self, k: u32) -> f32 {
        self.slice_near(k + 1)
    }

    /// The smallest slice count whose total depth reaches `z_limit`,
    /// clamped to `max_slices`.
    pub fn slice_count(&self, z_limit: f32, max_slices: u32) -> u32 {
        let max_slices = max_slices.max(1);
        let mut count = 1;
        while count < max_slices && self.slice_near(count) < z_limit {
            count += 1;
        }
        count
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Mat4;

    fn camera() -> CameraParams {
        CameraParams::perspective(60f32.to_radians(), 1280, 720, 0.3, 100.0, Mat4::IDENTITY)
    }

    #[test]
    fn derived_series_matches_closed_form() {
        let slicing = DepthSlicing::from_camera(&camera(), 45);
        let ratio = slicing.ratio();

        // With derived step/ratio the series reduces to z_near * ratio^k.
        for k in 0..16 {
            assert_relative_eq!(
                slicing.slice_near(k),
                0.3 * ratio.powi(k as i32),
                max_relative = 1e-4
            );
        }
        assert_relative_eq!(slicing.slice_near(0), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn slice_count_is_minimal() {
        let slicing = DepthSlicing::from_camera(&camera(), 45);
        let count = slicing.slice_count(100.0, u32::MAX);

        assert!(slicing.slice_near(count) >= 100.0);
        assert!(slicing.slice_near(count - 1) < 100.0);
    }

    #[test]
    fn slice_count_respects_ceiling() {
        let slicing = DepthSlicing::from_camera(&camera(), 45);
        assert_eq!(slicing.slice_count(1e30, 24), 24);
    }

    #[test]
    fn overrides_replace_derived_values() {
        let slicing = DepthSlicing::from_camera(&camera(), 45).with_overrides(0.5, 2.0);

        assert_relative_eq!(slicing.step(), 0.5);
        assert_relative_eq!(slicing.ratio(), 2.0);
        // Z_1 = z_near + step, Z_2 = z_near + step * (1 + ratio).
        assert_relative_eq!(slicing.slice_near(1), 0.8, epsilon = 1e-5);
        assert_relative_eq!(slicing.slice_near(2), 1.8, epsilon = 1e-5);
    }
}
