use std::time::Duration;

/// Per-frame timing and count data for the culling stages. Attached to the
/// pipeline; reset at the start of every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct CullingProfiler {
    pub collect_time: Duration,
    pub assign_time: Duration,
    pub pack_time: Duration,
    pub total_frame_time: Duration,

    pub lights_count: usize,
    pub partition_count: usize,
    pub assigned_total: usize,
    pub spilled_partitions: usize,
}

impl CullingProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_frame_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        println!("--- Culling Profile ---");
        println!(
            "Lights: {}, Partitions: {}, Assignments: {}, Spilled: {}",
            self.lights_count, self.partition_count, self.assigned_total, self.spilled_partitions
        );

        println!(
            "Total Frame: {:.2} ms",
            self.total_frame_time.as_secs_f32() * 1000.0
        );

        println!(
            "  Collect: {:.2} ms ({:.1}%)",
            self.collect_time.as_secs_f32() * 1000.0,
            (self.collect_time.as_micros() as f32 / total_us) * 100.0
        );

        println!(
            "  Assign:  {:.2} ms ({:.1}%)",
            self.assign_time.as_secs_f32() * 1000.0,
            (self.assign_time.as_micros() as f32 / total_us) * 100.0
        );

        println!(
            "  Pack:    {:.2} ms ({:.1}%)",
            self.pack_time.as_secs_f32() * 1000.0,
            (self.pack_time.as_micros() as f32 / total_us) * 100.0
        );
        println!("-----------------------");
    }
}
