use glam::{Mat4, UVec2, Vec3, Vec4};

use crate::{
    config::{CullingConfig, CullingMode, MAX_CLUSTERS_COUNT},
    geometry::{screen_to_view, Frustum, Plane},
    grid::{camera::CameraParams, slicing::DepthSlicing},
};

/// Partition grid shape: cell counts along each axis plus the screen-space
/// cell size. `z == 1` in tile mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridDimensions {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub grid_size: u32,
}

impl GridDimensions {
    pub fn partition_count(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Decomposes a flat partition index into (column, row, slice).
    pub fn to_3d(&self, index: usize) -> (u32, u32, u32) {
        let layer = (self.x * self.y) as usize;
        let x = (index % self.x as usize) as u32;
        let y = (index % layer / self.x as usize) as u32;
        let z = (index / layer) as u32;
        (x, y, z)
    }
}

/// The set of view-space sub-frusta lights are assigned to. Owned by the
/// pipeline and rebuilt only when screen size or camera projection change;
/// read-only during assignment.
#[derive(Debug, Clone, Default)]
pub struct PartitionGrid {
    mode: CullingMode,
    dimensions: GridDimensions,
    slicing: Option<DepthSlicing>,
    frustums: Vec<Frustum>,
}

impl PartitionGrid {
    /// A grid with no partitions; the state before the first configure.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn build(camera: &CameraParams, config: &CullingConfig) -> Self {
        match config.mode {
            CullingMode::Tile => Self::build_tiles(camera, config),
            CullingMode::Cluster => Self::build_clusters(camera, config),
        }
    }

    fn build_tiles(camera: &CameraParams, config: &CullingConfig) -> Self {
        let screen = camera.screen_dimension();
        let dimensions = GridDimensions {
            x: screen.x.div_ceil(config.grid_size),
            y: screen.y.div_ceil(config.grid_size),
            z: 1,
            grid_size: config.grid_size,
        };

        // All tiles share the camera near/far range.
        let near = Plane::new(-Vec3::Z, camera.z_near);
        let far = Plane::new(Vec3::Z, -camera.z_far);

        let mut frustums = Vec::with_capacity(dimensions.partition_count());
        for index in 0..dimensions.partition_count() {
            let (x, y, _) = dimensions.to_3d(index);
            frustums.push(build_frustum(
                UVec2::new(x, y),
                config.grid_size,
                screen,
                &camera.inverse_projection,
                near,
                far,
            ));
        }

        Self {
            mode: CullingMode::Tile,
            dimensions,
            slicing: None,
            frustums,
        }
    }

    fn build_clusters(camera: &CameraParams, config: &CullingConfig) -> Self {
        let screen = camera.screen_dimension();
        let x = screen.x.div_ceil(config.grid_size);
        let y = screen.y.div_ceil(config.grid_size);

        let slicing = DepthSlicing::from_camera(camera, y)
            .with_overrides(config.z_start_step, config.z_step_ratio);

        // Slice until the depth cap is reached, staying under the total
        // cluster ceiling.
        let z_limit = config.z_far_max.min(camera.z_far);
        let slice_budget = (MAX_CLUSTERS_COUNT / (x as usize * y as usize).max(1)).max(1) as u32;
        let z = slicing.slice_count(z_limit, slice_budget);

        let dimensions = GridDimensions {
            x,
            y,
            z,
            grid_size: config.grid_size,
        };

        let mut frustums = Vec::with_capacity(dimensions.partition_count());
        for index in 0..dimensions.partition_count() {
            let (cx, cy, cz) = dimensions.to_3d(index);
            let near = Plane::new(-Vec3::Z, slicing.slice_near(cz));
            let far = Plane::new(Vec3::Z, -slicing.slice_far(cz));
            frustums.push(build_frustum(
                UVec2::new(cx, cy),
                config.grid_size,
                screen,
                &camera.inverse_projection,
                near,
                far,
            ));
        }

        Self {
            mode: CullingMode::Cluster,
            dimensions,
            slicing: Some(slicing),
            frustums,
        }
    }

    pub fn mode(&self) -> CullingMode {
        self.mode
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn slicing(&self) -> Option<&DepthSlicing> {
        self.slicing.as_ref()
    }

    pub fn frustums(&self) -> &[Frustum] {
        &self.frustums
    }

    pub fn partition_count(&self) -> usize {
        self.frustums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frustums.is_empty()
    }
}

/// Builds one partition frustum: the four side planes pass through the eye
/// and the unprojected cell corners (counter-clockwise winding keeps every
/// normal pointing into the cell).
fn build_frustum(
    cell: UVec2,
    grid_size: u32,
    screen: UVec2,
    inverse_projection: &Mat4,
    near: Plane,
    far: Plane,
) -> Frustum {
    let size = grid_size as f32;
    let base = (cell * grid_size).as_vec2();

    // Cell corners on the near clip plane (clip z = -1).
    let corners = [
        Vec4::new(base.x, base.y, -1.0, 1.0),
        Vec4::new(base.x + size, base.y, -1.0, 1.0),
        Vec4::new(base.x, base.y + size, -1.0, 1.0),
        Vec4::new(base.x + size, base.y + size, -1.0, 1.0),
    ];
    let view = corners.map(|c| screen_to_view(c, screen, inverse_projection).truncate());

    let eye = Vec3::ZERO;
    Frustum {
        near,
        far,
        left: Plane::from_points(eye, view[2], view[0]),
        right: Plane::from_points(eye, view[1], view[3]),
        top: Plane::from_points(eye, view[0], view[1]),
        bottom: Plane::from_points(eye, view[3], view[2]),
    }
}
