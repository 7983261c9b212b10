use cluster_monitoring_core::Record;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Generate `size` task events with non-decreasing timestamps, roughly shaped like the cluster
/// trace: small integer codes, large ids and a normally distributed cpu request around 0.02.
pub fn gen_cluster_events(size: usize, seed: u64) -> Vec<Record> {
  let mut rng = SmallRng::seed_from_u64(seed);
  let mut timestamp = 0;
  (0..size)
    .map(|_| {
      timestamp += rng.gen_range(0..1_000_000);
      let noise: f32 = StandardNormal.sample(&mut rng);
      Record {
        timestamp,
        job_id: rng.gen_range(3_418_309..6_486_631_000),
        task_id: rng.gen_range(0..10_000),
        machine_id: rng.gen_range(0..4_000_000_000),
        event_type: rng.gen_range(0..9),
        user_id: rng.gen_range(0..1000),
        category: rng.gen_range(0..4),
        priority: rng.gen_range(0..12),
        cpu: (0.02 + 0.01 * noise).abs(),
      }
    })
    .collect()
}

/// Format a record as one line of the event log.
pub fn format_event_line(record: &Record) -> String {
  format!(
    "{} {} {} {} {} {} {} {} {}",
    record.timestamp,
    record.job_id,
    record.task_id,
    record.machine_id,
    record.event_type,
    record.user_id,
    record.category,
    record.priority,
    record.cpu
  )
}

/// Generate the text of an event log with `size` lines.
pub fn gen_event_log(size: usize, seed: u64) -> String {
  gen_cluster_events(size, seed)
    .iter()
    .map(|record| format_event_line(record) + "\n")
    .collect()
}
