use glam::Mat4;
use log::warn;

use crate::lights::types::{Light, LightKind, VisibleLight};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Converts one visible light into its culling representation. Directional
/// lights store the direction *toward* the light (the negated forward
/// axis); spot lights keep the forward axis and derive the cone radius as
/// `tan(spot_angle / 2)`.
pub fn collect_one(visible: &VisibleLight, world_to_view: &Mat4) -> Option<Light> {
    match visible.kind {
        LightKind::Directional => {
            let world_direction = -visible.light_to_world.col(2);
            Some(Light::Directional {
                world_direction,
                view_direction: *world_to_view * world_direction,
                color: visible.color,
            })
        }
        LightKind::Point => {
            let world_position = visible.light_to_world.col(3);
            Some(Light::Point {
                world_position,
                view_position: *world_to_view * world_position,
                range: visible.range,
                color: visible.color,
            })
        }
        LightKind::Spot => {
            let world_position = visible.light_to_world.col(3);
            let world_direction = visible.light_to_world.col(2);
            let half_angle = (visible.spot_angle * 0.5).to_radians();
            Some(Light::Spot {
                world_position,
                view_position: *world_to_view * world_position,
                world_direction,
                view_direction: *world_to_view * world_direction,
                range: visible.range,
                half_angle,
                cone_radius: half_angle.tan(),
                color: visible.color,
            })
        }
        LightKind::Unsupported => None,
    }
}

/// Per-frame collected-light storage. The backing vector is allocated once
/// at the configured capacity and reused every frame; slot `i` always
/// corresponds to visible light `i`.
#[derive(Debug, Default)]
pub struct LightSet {
    lights: Vec<Option<Light>>,
    capacity: usize,
}

impl LightSet {
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            capacity: max_lights,
        }
    }

    /// Resizes the persistent storage; used when configuration changes.
    pub fn set_capacity(&mut self, max_lights: usize) {
        self.capacity = max_lights;
        self.lights.clear();
        self.lights.reserve(max_lights);
    }

    /// Rebuilds the set from this frame's visible lights. Lights beyond
    /// capacity are silently dropped (with a log warning); unsupported
    /// kinds become empty slots so later indices stay stable.
    pub fn collect(&mut self, visible: &[VisibleLight], world_to_view: &Mat4, parallel: bool) {
        let count = visible.len().min(self.capacity);
        if visible.len() > count {
            warn!(
                "visible light list truncated: {} lights, capacity {}",
                visible.len(),
                count
            );
        }

        #[cfg(feature = "parallel")]
        if parallel {
            visible[..count]
                .par_iter()
                .map(|light| collect_one(light, world_to_view))
                .collect_into_vec(&mut self.lights);
            return;
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        self.lights.clear();
        self.lights
            .extend(visible[..count].iter().map(|light| collect_one(light, world_to_view)));
    }

    /// Number of collected slots this frame (including empty ones).
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Light> {
        self.lights.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn as_slice(&self) -> &[Option<Light>] {
        &self.lights
    }
}
