use glam::Vec3;

use crate::geometry::plane::Plane;

/// Bounding sphere of a point light's influence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Bounding cone of a spot light: apex at the light, axis along the beam,
/// `radius` is the base radius at `height` along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cone {
    pub apex: Vec3,
    /// Unit axis direction.
    pub direction: Vec3,
    pub height: f32,
    pub radius: f32,
}

impl Cone {
    pub fn new(apex: Vec3, direction: Vec3, height: f32, radius: f32) -> Self {
        Self {
            apex,
            direction,
            height,
            radius,
        }
    }
}

/// One partition's view-space bounding volume: six inward-facing planes.
/// Immutable once built; the partition grid rebuilds the whole array when
/// camera parameters change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frustum {
    pub near: Plane,
    pub far: Plane,
    pub left: Plane,
    pub right: Plane,
    pub top: Plane,
    pub bottom: Plane,
}

impl Frustum {
    fn planes(&self) -> [&Plane; 6] {
        [
            &self.near,
            &self.far,
            &self.left,
            &self.right,
            &self.top,
            &self.bottom,
        ]
    }

    /// A volume is inside iff it is not behind any plane; short-circuits on
    /// the first separating plane.
    pub fn contains_sphere(&self, sphere: &Sphere) -> bool {
        self.planes().iter().all(|plane| !plane.sphere_behind(sphere))
    }

    pub fn contains_cone(&self, cone: &Cone) -> bool {
        self.planes().iter().all(|plane| !plane.cone_behind(cone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Axis-aligned box-shaped "frustum" around the origin for direct tests.
    fn unit_box(half_extent: f32) -> Frustum {
        Frustum {
            near: Plane::new(-Vec3::Z, -half_extent),
            far: Plane::new(Vec3::Z, -half_extent),
            left: Plane::new(Vec3::X, -half_extent),
            right: Plane::new(-Vec3::X, -half_extent),
            top: Plane::new(-Vec3::Y, -half_extent),
            bottom: Plane::new(Vec3::Y, -half_extent),
        }
    }

    #[test]
    fn sphere_inside_and_outside_box() {
        let frustum = unit_box(1.0);

        assert!(frustum.contains_sphere(&Sphere::new(Vec3::ZERO, 0.5)));
        assert!(!frustum.contains_sphere(&Sphere::new(Vec3::new(5.0, 0.0, 0.0), 0.5)));
        // Overlapping a face still counts as inside.
        assert!(frustum.contains_sphere(&Sphere::new(Vec3::new(1.2, 0.0, 0.0), 0.5)));
    }

    #[test]
    fn sphere_containment_is_monotonic_in_radius() {
        let frustum = unit_box(1.0);
        let center = Vec3::new(2.5, 0.0, 0.0);

        let mut inside_seen = false;
        for step in 0..40 {
            let radius = 0.1 + step as f32 * 0.1;
            let inside = frustum.contains_sphere(&Sphere::new(center, radius));
            // Growing the radius never flips inside back to outside.
            if inside_seen {
                assert!(inside, "radius {radius} flipped back to outside");
            }
            inside_seen |= inside;
        }
        assert!(inside_seen);
    }

    #[test]
    fn cone_inside_box() {
        let frustum = unit_box(1.0);

        let inside = Cone::new(Vec3::ZERO, Vec3::Z, 0.5, 0.2);
        assert!(frustum.contains_cone(&inside));

        let outside = Cone::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, 0.5, 0.2);
        assert!(!frustum.contains_cone(&outside));
    }
}
