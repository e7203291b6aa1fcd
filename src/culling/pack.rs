use log::warn;

use crate::{
    culling::assign::AssignmentTable,
    lights::Light,
    output::buffers::{GridEntry, PackedBuffers},
};

/// What the packing pass did; feeds the profiler and overflow warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackStats {
    /// Index-list segments that received at least one index.
    pub segments_used: usize,
    /// Partitions that received the sentinel entry because every segment
    /// was exhausted.
    pub spilled_partitions: usize,
}

/// Serializes the frame's assignment results into the packed buffers.
///
/// Runs single-threaded after the assignment barrier and walks partitions
/// in index order, keeping grid entries and index lists consistent.
/// Overflow never corrupts earlier data; partitions that do not fit read
/// as empty via the sentinel.
pub fn pack_buffers(
    lights: &[Option<Light>],
    table: &AssignmentTable,
    buffers: &mut PackedBuffers,
) -> PackStats {
    fill_attributes(lights, buffers);
    let stats = fill_index_lists(table, buffers);

    if stats.spilled_partitions > 0 {
        warn!(
            "index-list segments exhausted: {} partitions packed empty",
            stats.spilled_partitions
        );
    }
    stats
}

fn fill_attributes(lights: &[Option<Light>], buffers: &mut PackedBuffers) {
    buffers.attributes.clear();

    for (slot, collected) in lights.iter().enumerate() {
        let Some(light) = collected else {
            // Unsupported kinds keep zeroed attribute slots.
            continue;
        };

        match light {
            Light::Directional {
                world_direction, ..
            } => buffers.attributes.write_directional(slot, *world_direction),
            Light::Point {
                world_position,
                range,
                ..
            }
            | Light::Spot {
                world_position,
                range,
                ..
            } => buffers
                .attributes
                .write_positional(slot, *world_position, *range),
        }
        buffers.attributes.write_color(slot, light.color());
    }
}

fn fill_index_lists(table: &AssignmentTable, buffers: &mut PackedBuffers) -> PackStats {
    buffers.index_lists.clear();

    let segment_count = buffers.index_lists.segment_count();
    let capacity = buffers.index_lists.indices_per_segment();

    let mut segment = 0usize;
    let mut cursor = 0usize;
    let mut spilled = 0usize;

    for partition in 0..table.partition_count() {
        let count = table.count(partition);

        // Advance to the next segment rather than splitting a partition's
        // indices across two buffers.
        if cursor + count > capacity {
            segment += 1;
            cursor = 0;
        }
        if segment >= segment_count {
            buffers.grid.set(partition, GridEntry::SENTINEL);
            spilled += 1;
            continue;
        }

        buffers
            .grid
            .set(partition, GridEntry::new(cursor, count, segment));
        for &light_index in table.lights_for(partition) {
            buffers.index_lists.write(segment, cursor, light_index);
            cursor += 1;
        }
    }

    PackStats {
        segments_used: segment.min(segment_count - 1) + 1,
        spilled_partitions: spilled,
    }
}
