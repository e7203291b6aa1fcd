use glam::{Mat4, UVec2};

use crate::error::CameraError;

/// Per-frame camera snapshot handed in by the host renderer.
///
/// View space is right-handed with the camera looking down `-Z`; the
/// inverse projection is expected to unproject GL-style clip coordinates
/// (near plane at clip `z = -1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub z_near: f32,
    pub z_far: f32,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub inverse_projection: Mat4,
    pub world_to_view: Mat4,
}

impl CameraParams {
    /// Builds a snapshot from a standard perspective projection; mostly a
    /// convenience for hosts that do not carry their own matrices.
    pub fn perspective(
        fov_y: f32,
        pixel_width: u32,
        pixel_height: u32,
        z_near: f32,
        z_far: f32,
        world_to_view: Mat4,
    ) -> Self {
        let aspect = pixel_width as f32 / pixel_height.max(1) as f32;
        let projection = Mat4::perspective_rh_gl(fov_y, aspect, z_near, z_far);

        Self {
            z_near,
            z_far,
            fov_y,
            aspect,
            pixel_width,
            pixel_height,
            inverse_projection: projection.inverse(),
            world_to_view,
        }
    }

    pub fn screen_dimension(&self) -> UVec2 {
        UVec2::new(self.pixel_width, self.pixel_height)
    }

    /// Rejects parameters that would propagate `NaN` into partition planes.
    pub fn validate(&self) -> Result<(), CameraError> {
        let clips_ok = self.z_near.is_finite()
            && self.z_far.is_finite()
            && self.z_near > 0.0
            && self.z_far > self.z_near;
        if !clips_ok {
            return Err(CameraError::InvalidClipPlanes {
                near: self.z_near,
                far: self.z_far,
            });
        }
        if !self.fov_y.is_finite() || self.fov_y <= 0.0 || self.fov_y >= std::f32::consts::PI {
            return Err(CameraError::InvalidFieldOfView(self.fov_y));
        }
        if !self.aspect.is_finite() || self.aspect <= 0.0 {
            return Err(CameraError::InvalidAspect(self.aspect));
        }
        if self.pixel_width == 0 || self.pixel_height == 0 {
            return Err(CameraError::InvalidViewport {
                width: self.pixel_width,
                height: self.pixel_height,
            });
        }
        if !self.inverse_projection.is_finite() || !self.world_to_view.is_finite() {
            return Err(CameraError::NonFiniteMatrix);
        }
        Ok(())
    }

    /// Key over everything that forces a partition rebuild when it changes.
    /// The world-to-view matrix is deliberately excluded: it changes every
    /// frame without affecting the view-space grid.
    pub(crate) fn rebuild_key(&self) -> RebuildKey {
        RebuildKey {
            z_near: self.z_near,
            z_far: self.z_far,
            fov_y: self.fov_y,
            pixel_width: self.pixel_width,
            pixel_height: self.pixel_height,
            inverse_projection: self.inverse_projection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RebuildKey {
    z_near: f32,
    z_far: f32,
    fov_y: f32,
    pixel_width: u32,
    pixel_height: u32,
    inverse_projection: Mat4,
}
