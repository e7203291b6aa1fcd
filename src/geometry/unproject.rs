//! Screen-space to view-space unprojection used when building partition
//! corner rays.

use glam::{Mat4, UVec2, Vec2, Vec4};

/// Maps a screen-space point (pixels, y growing downward) to clip space.
/// Only `x` and `y` are remapped into `[-1, 1]`; `z` and `w` pass through.
pub fn screen_to_clip(screen: Vec4, screen_dimension: UVec2) -> Vec4 {
    let tex = Vec2::new(screen.x, screen.y) / screen_dimension.as_vec2();

    Vec4::new(
        tex.x * 2.0 - 1.0,
        (1.0 - tex.y) * 2.0 - 1.0,
        screen.z,
        screen.w,
    )
}

/// Applies the inverse projection and the perspective divide. A clip point
/// whose unprojected `w` is (near) zero produces non-finite components
/// rather than a panic; callers avoid degenerate depths.
pub fn clip_to_view(clip: Vec4, inverse_projection: &Mat4) -> Vec4 {
    let view = *inverse_projection * clip;
    view / view.w
}

/// Full screen-to-view transform: pixel coordinate plus clip depth in
/// `screen.z` to a view-space position.
pub fn screen_to_view(screen: Vec4, screen_dimension: UVec2, inverse_projection: &Mat4) -> Vec4 {
    clip_to_view(screen_to_clip(screen, screen_dimension), inverse_projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Mat4;

    #[test]
    fn screen_corners_map_to_clip_corners_with_y_flip() {
        let dim = UVec2::new(1280, 720);

        let top_left = screen_to_clip(Vec4::new(0.0, 0.0, -1.0, 1.0), dim);
        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);

        let bottom_right = screen_to_clip(Vec4::new(1280.0, 720.0, -1.0, 1.0), dim);
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);
    }

    #[test]
    fn near_plane_unprojects_to_negative_near_depth() {
        let dim = UVec2::new(800, 600);
        let projection = Mat4::perspective_rh_gl(60f32.to_radians(), 800.0 / 600.0, 0.3, 100.0);
        let inverse = projection.inverse();

        // Screen center at the near clip plane (clip z = -1).
        let view = screen_to_view(Vec4::new(400.0, 300.0, -1.0, 1.0), dim, &inverse);

        assert_relative_eq!(view.z, -0.3, epsilon = 1e-4);
        assert_relative_eq!(view.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(view.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn degenerate_w_yields_non_finite_not_panic() {
        let view = clip_to_view(Vec4::new(0.0, 0.0, 0.0, 0.0), &Mat4::ZERO);
        assert!(!view.is_finite());
    }
}
