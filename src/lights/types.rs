use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

use crate::geometry::{Cone, Sphere};

/// Kind tag of a host-provided visible light. Kinds other than the three
/// supported ones are collected as empty slots, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
    /// Anything the culling stage does not understand (area lights etc.).
    Unsupported,
}

/// One entry of the host renderer's visible-light list.
///
/// `light_to_world` follows the usual rig: column 2 is the light's forward
/// axis, column 3 its position. `spot_angle` is the full cone angle in
/// degrees; `color` is the final linear color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleLight {
    pub kind: LightKind,
    pub light_to_world: Mat4,
    pub range: f32,
    pub spot_angle: f32,
    pub color: Vec4,
}

impl VisibleLight {
    pub fn directional(light_to_world: Mat4, color: Vec4) -> Self {
        Self {
            kind: LightKind::Directional,
            light_to_world,
            range: 0.0,
            spot_angle: 0.0,
            color,
        }
    }

    pub fn point(light_to_world: Mat4, range: f32, color: Vec4) -> Self {
        Self {
            kind: LightKind::Point,
            light_to_world,
            range,
            spot_angle: 0.0,
            color,
        }
    }

    pub fn spot(light_to_world: Mat4, range: f32, spot_angle: f32, color: Vec4) -> Self {
        Self {
            kind: LightKind::Spot,
            light_to_world,
            range,
            spot_angle,
            color,
        }
    }
}

/// A collected light, immutable for the rest of the frame. Each variant
/// carries exactly the fields meaningful for its kind.
///
/// Positions and directions are stored 4-wide (`w = 1` for positions,
/// `w = 0` for directions) so they drop into the packed attribute buffer
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional {
        world_direction: Vec4,
        view_direction: Vec4,
        color: Vec4,
    },
    Point {
        world_position: Vec4,
        view_position: Vec4,
        range: f32,
        color: Vec4,
    },
    Spot {
        world_position: Vec4,
        view_position: Vec4,
        world_direction: Vec4,
        view_direction: Vec4,
        range: f32,
        /// Half cone angle, radians.
        half_angle: f32,
        /// `tan(half_angle)`: base radius per unit of cone height.
        cone_radius: f32,
        color: Vec4,
    },
}

impl Light {
    pub fn color(&self) -> Vec4 {
        match self {
            Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Spot { color, .. } => *color,
        }
    }

    /// View-space bounding sphere; `None` for directional lights, which
    /// have no spatial extent.
    pub fn bounding_sphere(&self) -> Option<Sphere> {
        match self {
            Light::Point {
                view_position,
                range,
                ..
            } => Some(Sphere::new(view_position.truncate(), *range)),
            _ => None,
        }
    }

    /// View-space bounding cone; `None` for anything but spot lights.
    pub fn bounding_cone(&self) -> Option<Cone> {
        match self {
            Light::Spot {
                view_position,
                view_direction,
                range,
                cone_radius,
                ..
            } => Some(Cone::new(
                view_position.truncate(),
                view_direction.truncate(),
                *range,
                *cone_radius,
            )),
            _ => None,
        }
    }
}
