use crate::{
    config::DEFAULT_ASSIGN_BATCH,
    geometry::Frustum,
    lights::Light,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Partition-indexed multi-map from partition to light indices.
///
/// Storage is one flat allocation of `partition_count` buckets of
/// `max_lights_per_partition` slots each, plus a per-partition count.
/// During assignment every parallel worker owns exactly one bucket, so
/// writers never alias and no synchronization is needed; the packer reads
/// after the assignment barrier. Reused across frames, resized only on
/// rebuild.
#[derive(Debug, Default)]
pub struct AssignmentTable {
    indices: Vec<u16>,
    counts: Vec<u32>,
    stride: usize,
}

impl AssignmentTable {
    pub fn new(partition_count: usize, max_lights_per_partition: usize) -> Self {
        let mut table = Self::default();
        table.resize(partition_count, max_lights_per_partition);
        table
    }

    pub fn resize(&mut self, partition_count: usize, max_lights_per_partition: usize) {
        self.stride = max_lights_per_partition;
        self.indices.clear();
        self.indices
            .resize(partition_count * max_lights_per_partition, 0);
        self.counts.clear();
        self.counts.resize(partition_count, 0);
    }

    /// Forgets all assignments without releasing storage.
    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    pub fn partition_count(&self) -> usize {
        self.counts.len()
    }

    pub fn max_lights_per_partition(&self) -> usize {
        self.stride
    }

    pub fn count(&self, partition: usize) -> usize {
        self.counts[partition] as usize
    }

    /// Light indices assigned to `partition` this frame. Order among the
    /// indices is whatever the scan produced; consumers must not rely on
    /// it.
    pub fn lights_for(&self, partition: usize) -> &[u16] {
        let start = partition * self.stride;
        &self.indices[start..start + self.count(partition)]
    }

    /// Appends one light index to a partition's bucket; returns `false`
    /// when the bucket is already at capacity. Sequential use only (tests,
    /// synthetic assignments); the parallel pass writes buckets directly.
    pub fn insert(&mut self, partition: usize, light_index: u16) -> bool {
        let count = self.count(partition);
        if count >= self.stride {
            return false;
        }
        self.indices[partition * self.stride + count] = light_index;
        self.counts[partition] += 1;
        true
    }

    /// Total assignments across all partitions.
    pub fn total_assigned(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
}

/// Scheduling knobs for the assignment pass.
#[derive(Debug, Clone, Copy)]
pub struct AssignOptions {
    /// Minimum partitions handed to one worker at a time; larger batches
    /// amortize dispatch overhead at the cost of load balance.
    pub batch_size: usize,
    pub parallel: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_ASSIGN_BATCH,
            parallel: true,
        }
    }
}

/// Tests every collected light against every partition frustum and records
/// survivors in the table. Directional lights pass unconditionally; point
/// lights are culled by bounding sphere, spot lights by bounding cone. A
/// partition stops scanning as soon as its bucket is full.
pub fn assign_lights(
    frustums: &[Frustum],
    lights: &[Option<Light>],
    table: &mut AssignmentTable,
    options: AssignOptions,
) {
    debug_assert_eq!(frustums.len(), table.partition_count());
    let stride = table.stride.max(1);

    #[cfg(feature = "parallel")]
    if options.parallel {
        table
            .indices
            .par_chunks_mut(stride)
            .zip(table.counts.par_iter_mut())
            .zip(frustums.par_iter())
            .with_min_len(options.batch_size.max(1))
            .for_each(|((bucket, count), frustum)| {
                assign_partition(frustum, lights, bucket, count);
            });
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = options;

    for ((bucket, count), frustum) in table
        .indices
        .chunks_mut(stride)
        .zip(table.counts.iter_mut())
        .zip(frustums.iter())
    {
        assign_partition(frustum, lights, bucket, count);
    }
}

fn assign_partition(
    frustum: &Frustum,
    lights: &[Option<Light>],
    bucket: &mut [u16],
    count_out: &mut u32,
) {
    let capacity = bucket.len();
    let mut count = 0usize;

    for (index, slot) in lights.iter().enumerate() {
        let Some(light) = slot else {
            continue;
        };

        let visible = match light {
            Light::Directional { .. } => true,
            Light::Point { .. } => light
                .bounding_sphere()
                .is_some_and(|sphere| frustum.contains_sphere(&sphere)),
            Light::Spot { .. } => light
                .bounding_cone()
                .is_some_and(|cone| frustum.contains_cone(&cone)),
        };

        if visible {
            bucket[count] = index as u16;
            count += 1;
            if count >= capacity {
                break;
            }
        }
    }

    *count_out = count as u32;
}
