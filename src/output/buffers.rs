use glam::{IVec4, Vec4};
use serde::{Deserialize, Serialize};

use crate::config::{CullingMode, INDEX_LIST_SEGMENTS, INDEX_LIST_SLOTS_PER_SEGMENT};

/// Guard against divide-by-zero when computing attenuation for degenerate
/// light ranges.
pub(crate) const MIN_RANGE_SQUARED: f32 = 1e-5;

/// One partition's entry in the grid buffer:
/// `(index_list_start, light_count, segment, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridEntry(pub IVec4);

impl GridEntry {
    /// Marks a partition whose index data did not fit any segment; the
    /// consumer reads it as "no lights".
    pub const SENTINEL: GridEntry = GridEntry(IVec4::new(-1, 0, -1, 0));

    pub fn new(start: usize, count: usize, segment: usize) -> Self {
        Self(IVec4::new(start as i32, count as i32, segment as i32, 0))
    }

    pub fn start(&self) -> i32 {
        self.0.x
    }

    pub fn count(&self) -> i32 {
        self.0.y
    }

    pub fn segment(&self) -> i32 {
        self.0.z
    }

    pub fn is_sentinel(&self) -> bool {
        self.start() < 0
    }
}

/// Flat light attribute storage: three regions of one 4-vector per light
/// slot (direction-or-position, attenuation, color), each sized to the
/// configured light capacity.
#[derive(Debug, Clone, Default)]
pub struct LightAttributeBuffer {
    directions_or_positions: Vec<Vec4>,
    attenuations: Vec<Vec4>,
    colors: Vec<Vec4>,
}

impl LightAttributeBuffer {
    pub fn new(max_lights: usize) -> Self {
        Self {
            directions_or_positions: vec![Vec4::ZERO; max_lights],
            attenuations: vec![Vec4::ZERO; max_lights],
            colors: vec![Vec4::ZERO; max_lights],
        }
    }

    pub fn resize(&mut self, max_lights: usize) {
        self.directions_or_positions.clear();
        self.directions_or_positions.resize(max_lights, Vec4::ZERO);
        self.attenuations.clear();
        self.attenuations.resize(max_lights, Vec4::ZERO);
        self.colors.clear();
        self.colors.resize(max_lights, Vec4::ZERO);
    }

    pub fn clear(&mut self) {
        self.directions_or_positions.fill(Vec4::ZERO);
        self.attenuations.fill(Vec4::ZERO);
        self.colors.fill(Vec4::ZERO);
    }

    /// Directional slot: direction plus zero attenuation.
    pub fn write_directional(&mut self, slot: usize, direction: Vec4) {
        self.directions_or_positions[slot] = direction;
        self.attenuations[slot] = Vec4::ZERO;
    }

    /// Positional slot (point/spot): position plus inverse-square falloff.
    pub fn write_positional(&mut self, slot: usize, position: Vec4, range: f32) {
        self.directions_or_positions[slot] = position;
        self.attenuations[slot] = Vec4::new(
            1.0 / (range * range).max(MIN_RANGE_SQUARED),
            0.0,
            0.0,
            0.0,
        );
    }

    pub fn write_color(&mut self, slot: usize, color: Vec4) {
        self.colors[slot] = color;
    }

    pub fn capacity(&self) -> usize {
        self.colors.len()
    }

    pub fn directions_or_positions(&self) -> &[Vec4] {
        &self.directions_or_positions
    }

    pub fn attenuations(&self) -> &[Vec4] {
        &self.attenuations
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }
}

/// One 4-vector entry per partition; sized to the partition count at
/// rebuild time.
#[derive(Debug, Clone, Default)]
pub struct PartitionGridBuffer {
    entries: Vec<GridEntry>,
}

impl PartitionGridBuffer {
    pub fn new(partition_count: usize) -> Self {
        Self {
            entries: vec![GridEntry::SENTINEL; partition_count],
        }
    }

    pub fn resize(&mut self, partition_count: usize) {
        self.entries.clear();
        self.entries.resize(partition_count, GridEntry::SENTINEL);
    }

    pub fn set(&mut self, partition: usize, entry: GridEntry) {
        self.entries[partition] = entry;
    }

    pub fn get(&self, partition: usize) -> GridEntry {
        self.entries[partition]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GridEntry] {
        &self.entries
    }
}

/// Fixed-capacity index-list segments. Each segment is a flat array of
/// four-wide slots holding packed light indices, four per slot; multiple
/// segments push total capacity past a single buffer's size limit.
#[derive(Debug, Clone)]
pub struct IndexListSegments {
    segments: Vec<Vec<IVec4>>,
    slots_per_segment: usize,
}

impl Default for IndexListSegments {
    fn default() -> Self {
        Self::new(INDEX_LIST_SEGMENTS, INDEX_LIST_SLOTS_PER_SEGMENT)
    }
}

impl IndexListSegments {
    pub fn new(segment_count: usize, slots_per_segment: usize) -> Self {
        Self {
            segments: vec![vec![IVec4::ZERO; slots_per_segment]; segment_count],
            slots_per_segment,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Light indices one segment can hold (4 per slot).
    pub fn indices_per_segment(&self) -> usize {
        self.slots_per_segment * 4
    }

    pub fn clear(&mut self) {
        for segment in &mut self.segments {
            segment.fill(IVec4::ZERO);
        }
    }

    /// Writes one light index at `cursor` (in indices, not slots) within
    /// `segment`.
    pub fn write(&mut self, segment: usize, cursor: usize, light_index: u16) {
        let slot = &mut self.segments[segment][cursor / 4];
        slot[cursor % 4] = light_index as i32;
    }

    pub fn read(&self, segment: usize, cursor: usize) -> i32 {
        self.segments[segment][cursor / 4][cursor % 4]
    }

    pub fn segment(&self, segment: usize) -> &[IVec4] {
        &self.segments[segment]
    }
}

/// Scalar/vector uniforms handed to the shading stage next to the buffers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CullingUniforms {
    pub lights_count: u32,
    /// Partition counts along x/y/z.
    pub grid_dimensions: [u32; 3],
    /// Screen-space cell size in pixels.
    pub grid_size: u32,
    /// Tile mode (`false`) vs cluster mode (`true`).
    pub clustered: bool,
    /// Cluster depth slicing parameters; zero in tile mode.
    pub z_start_step: f32,
    pub z_step_ratio: f32,
}

impl CullingUniforms {
    pub fn mode(&self) -> CullingMode {
        if self.clustered {
            CullingMode::Cluster
        } else {
            CullingMode::Tile
        }
    }
}

/// The complete packed output of one culled frame.
#[derive(Debug, Clone, Default)]
pub struct PackedBuffers {
    pub attributes: LightAttributeBuffer,
    pub grid: PartitionGridBuffer,
    pub index_lists: IndexListSegments,
    pub uniforms: CullingUniforms,
}

impl PackedBuffers {
    pub fn new(max_lights: usize, partition_count: usize) -> Self {
        Self {
            attributes: LightAttributeBuffer::new(max_lights),
            grid: PartitionGridBuffer::new(partition_count),
            index_lists: IndexListSegments::default(),
            uniforms: CullingUniforms::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_entry_sentinel_round_trip() {
        let entry = GridEntry::new(12, 3, 1);
        assert_eq!(entry.start(), 12);
        assert_eq!(entry.count(), 3);
        assert_eq!(entry.segment(), 1);
        assert!(!entry.is_sentinel());

        assert!(GridEntry::SENTINEL.is_sentinel());
        assert_eq!(GridEntry::SENTINEL.0, IVec4::new(-1, 0, -1, 0));
    }

    #[test]
    fn index_segments_pack_four_per_slot() {
        let mut lists = IndexListSegments::new(1, 2);
        for i in 0..8 {
            lists.write(0, i, i as u16 * 10);
        }

        assert_eq!(lists.read(0, 0), 0);
        assert_eq!(lists.read(0, 3), 30);
        assert_eq!(lists.read(0, 4), 40);
        assert_eq!(lists.segment(0)[1], IVec4::new(40, 50, 60, 70));
    }

    #[test]
    fn attenuation_guards_degenerate_range() {
        let mut attributes = LightAttributeBuffer::new(1);
        attributes.write_positional(0, Vec4::W, 0.0);
        let attenuation = attributes.attenuations()[0].x;
        assert!(attenuation.is_finite());
        assert_eq!(attenuation, 1.0 / MIN_RANGE_SQUARED);
    }
}
