use glam::{Vec3, Vec4};

use crate::geometry::shapes::{Cone, Sphere};

/// A half-space in view coordinates. The normal points toward the positive
/// ("inside") side; a point `p` lies behind the plane iff
/// `dot(normal, p) - distance <= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Plane {
    /// Unit normal, stored 4-wide with `w = 0` to match the packed layout.
    pub normal: Vec4,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normal.extend(0.0),
            distance,
        }
    }

    /// Builds the plane through three points read counter-clockwise; the
    /// normal follows the right-hand rule of `(p1 - p0) x (p2 - p0)`.
    /// Collinear points yield an undefined normal direction; callers must
    /// not pass degenerate corners.
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let normal = (p1 - p0).cross(p2 - p0).normalize();
        Self {
            normal: normal.extend(0.0),
            distance: normal.dot(p0),
        }
    }

    fn normal3(&self) -> Vec3 {
        self.normal.truncate()
    }

    pub fn point_behind(&self, point: Vec3) -> bool {
        self.normal3().dot(point) - self.distance <= 0.0
    }

    /// True iff the sphere lies entirely on the negative side.
    pub fn sphere_behind(&self, sphere: &Sphere) -> bool {
        self.normal3().dot(sphere.center) - self.distance < -sphere.radius
    }

    /// True iff the sphere straddles the plane.
    pub fn sphere_intersects(&self, sphere: &Sphere) -> bool {
        (self.normal3().dot(sphere.center) - self.distance).abs() < sphere.radius
    }

    /// Intersection of the line through `start` and `end` with the plane.
    /// A line parallel to the plane yields non-finite components.
    pub fn line_intersection(&self, start: Vec3, end: Vec3) -> Vec3 {
        let direction = end - start;
        let t = (self.distance - self.normal3().dot(start)) / self.normal3().dot(direction);

        start + direction * t
    }

    /// Conservative cone test: the cone counts as behind iff its apex and
    /// the extremal base point `Q = apex + axis * height + m * radius` are
    /// both behind, with `m` the base direction of steepest descent
    /// relative to the plane. Grazing cones can be misclassified as
    /// behind; callers accept the occasional false cull in exchange for
    /// two point tests per plane.
    pub fn cone_behind(&self, cone: &Cone) -> bool {
        let m = self
            .normal3()
            .cross(cone.direction)
            .cross(cone.direction)
            .normalize_or_zero();
        let q = cone.apex + cone.direction * cone.height + m * cone.radius;

        self.point_behind(cone.apex) && self.point_behind(q)
    }
}
