use std::io::Write;

use arrow::{
  array::{AsArray, Float32Array},
  datatypes::Int64Type,
};
use cluster_monitoring_core::{Record, RecordError, RECORD_SIZE};
use rstest::rstest;
use tempfile::NamedTempFile;

use crate::{
  config::DatasetConfig,
  error::DatasetError,
  loader::{dump_records, load_in_memory_data, load_with_config},
  schema::TupleSchema,
  util::{format_event_line, gen_cluster_events, gen_event_log},
};

fn write_log(contents: &str) -> NamedTempFile {
  let mut file = NamedTempFile::new().unwrap();
  file.write_all(contents.as_bytes()).unwrap();
  file.flush().unwrap();
  file
}

fn log_with_timestamps(timestamps: &[i64]) -> NamedTempFile {
  let contents: String = timestamps
    .iter()
    .enumerate()
    .map(|(idx, ts)| format!("{ts} {idx} 0 0 0 0 0 0 0.5\n"))
    .collect();
  write_log(&contents)
}

#[rstest]
#[case(&[10, 20], 3, &[10, 20, 30])]
#[case(&[10, 20, 30], 3, &[10, 20, 30])]
#[case(&[10, 20, 30, 40, 50], 3, &[10, 20, 30])]
fn test_worked_example(
  #[case] input: &[i64],
  #[case] capacity: usize,
  #[case] expected: &[i64],
) {
  let file = log_with_timestamps(input);
  let dataset = load_in_memory_data(file.path(), capacity * RECORD_SIZE).unwrap();

  let timestamps: Vec<i64> = dataset.records().map(|r| r.timestamp).collect();
  assert_eq!(timestamps, expected);
  assert_eq!(dataset.start_timestamp(), expected[0]);
  assert_eq!(dataset.end_timestamp(), *expected.last().unwrap());
}

#[rstest]
#[case(1, 1)]
#[case(5, 100)]
#[case(100, 100)]
#[case(1000, 64)]
fn test_arena_is_exactly_full(#[case] lines: usize, #[case] capacity: usize) {
  let file = write_log(&gen_event_log(lines, 7));
  // a budget that is not a multiple of the record width rounds down
  let dataset = load_in_memory_data(file.path(), capacity * RECORD_SIZE + RECORD_SIZE - 1).unwrap();

  assert_eq!(dataset.capacity(), capacity);
  assert_eq!(dataset.len(), capacity);
  assert_eq!(dataset.as_bytes().len(), capacity * RECORD_SIZE);
  assert_eq!(dataset.records_read(), lines.min(capacity));
  assert_eq!(dataset.records_replicated(), capacity - lines.min(capacity));
}

#[test]
fn test_large_file_is_truncated_verbatim() {
  let events = gen_cluster_events(500, 11);
  let contents: String = events.iter().map(|r| format_event_line(r) + "\n").collect();
  let file = write_log(&contents);

  let dataset = load_in_memory_data(file.path(), 200 * RECORD_SIZE).unwrap();

  let loaded: Vec<Record> = dataset.records().collect();
  assert_eq!(loaded, events[..200]);
  assert_eq!(dataset.records_replicated(), 0);
  assert_eq!(dataset.end_timestamp(), events[199].timestamp);
}

#[rstest]
#[case(2)]
#[case(9)]
#[case(250)]
fn test_short_file_is_replayed(#[case] lines: usize) {
  let events = gen_cluster_events(lines, 3);
  let contents: String = events.iter().map(|r| format_event_line(r) + "\n").collect();
  let file = write_log(&contents);
  let capacity = lines * 5 + 1;

  let dataset = load_in_memory_data(file.path(), capacity * RECORD_SIZE).unwrap();
  let loaded: Vec<Record> = dataset.records().collect();

  assert_eq!(loaded[..lines], events[..]);
  assert_eq!(dataset.start_timestamp(), events[0].timestamp);

  let barrier = lines - 1;
  for idx in lines..capacity {
    let source = &loaded[(idx - lines) % barrier];
    assert_eq!(
      Record {
        timestamp: source.timestamp,
        ..loaded[idx]
      },
      *source,
      "content of record {idx}"
    );
    assert!(loaded[idx].timestamp >= loaded[idx - 1].timestamp);
  }
  assert_eq!(dataset.end_timestamp(), loaded[capacity - 1].timestamp);
}

#[test]
fn test_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let err = load_in_memory_data(dir.path().join("google-cluster-data.txt"), 1024).unwrap_err();
  assert!(matches!(err, DatasetError::FileNotFound { .. }));
}

#[test]
fn test_empty_file() {
  let file = write_log("");
  let err = load_in_memory_data(file.path(), 1024).unwrap_err();
  assert!(matches!(err, DatasetError::EmptyDataset { .. }));
}

#[test]
fn test_budget_below_one_record() {
  let file = log_with_timestamps(&[10]);
  let err = load_in_memory_data(file.path(), RECORD_SIZE - 1).unwrap_err();
  assert!(matches!(
    err,
    DatasetError::ZeroCapacity {
      bundle_size: 51,
      record_size: 52
    }
  ));
}

#[rstest]
#[case("10 1 1 1 0 0 0 0 0.5\n20 2 2 2 0 0 0\n", 2)]
#[case("10 1 1 1 0 0 0 0 0.5\n\n30 2 2 2 0 0 0 0 0.5\n", 2)]
fn test_short_line_aborts_load(#[case] contents: &str, #[case] bad_line: usize) {
  let file = write_log(contents);
  match load_in_memory_data(file.path(), 10 * RECORD_SIZE).unwrap_err() {
    DatasetError::Parse { line, source, .. } => {
      assert_eq!(line, bad_line);
      assert!(matches!(source, RecordError::MissingField { .. }));
    }
    other => panic!("unexpected error {other:?}"),
  }
}

#[test]
fn test_invalid_token_aborts_load() {
  let file = write_log("10 1 1 1 0 0 0 0 0.5\n20 2 2 2 0 zero 0 0 0.5\n");
  match load_in_memory_data(file.path(), 10 * RECORD_SIZE).unwrap_err() {
    DatasetError::Parse { line, source, .. } => {
      assert_eq!(line, 2);
      assert!(matches!(
        source,
        RecordError::InvalidField {
          index: 5,
          name: "userId",
          ..
        }
      ));
    }
    other => panic!("unexpected error {other:?}"),
  }
}

#[test]
fn test_lines_past_capacity_are_not_parsed() {
  let file = write_log("10 1 1 1 0 0 0 0 0.5\n20 2 2 2 0 0 0 0 0.5\nnot a record\n");
  let dataset = load_in_memory_data(file.path(), 2 * RECORD_SIZE).unwrap();
  assert_eq!(dataset.len(), 2);
}

#[test]
fn test_dump_format() {
  let file = write_log("600026 6251812952 1761 1306108 4 70 2 9 0.0125\n");
  let dataset = load_in_memory_data(file.path(), 2 * RECORD_SIZE).unwrap();

  let mut out = Vec::new();
  dump_records(&dataset, &mut out).unwrap();
  let text = String::from_utf8(out).unwrap();
  let lines: Vec<&str> = text.lines().collect();

  assert_eq!(
    lines,
    vec![
      "timestamp jobId taskId machineId eventType userId category priority cpu",
      "[DBG] 000000000:  600026    6251812952     1761       1306108   4     70  2  9    0.013",
      "[DBG] 000000001: 1200052    6251812952     1761       1306108   4     70  2  9    0.013",
    ]
  );
}

#[test]
fn test_debug_mode_returns_same_data() {
  let file = write_log(&gen_event_log(20, 5));
  let plain = load_in_memory_data(file.path(), 30 * RECORD_SIZE).unwrap();
  let config = DatasetConfig::default()
    .with_bundle_size(30 * RECORD_SIZE)
    .with_debug(true);
  let debugged = load_with_config(file.path(), &config).unwrap();

  assert_eq!(plain.as_bytes(), debugged.as_bytes());
  assert_eq!(plain.end_timestamp(), debugged.end_timestamp());
}

#[test]
fn test_record_batch_export() {
  let file = write_log(&gen_event_log(10, 13));
  let dataset = load_in_memory_data(file.path(), 25 * RECORD_SIZE).unwrap();
  let schema = TupleSchema::cluster_monitoring();

  let batch = dataset.to_record_batch(&schema).unwrap();

  assert_eq!(batch.num_rows(), 25);
  assert_eq!(batch.num_columns(), 9);
  assert_eq!(batch.schema(), schema.arrow_schema());

  let timestamps: Vec<i64> = batch
    .column(0)
    .as_primitive::<Int64Type>()
    .values()
    .to_vec();
  let expected: Vec<i64> = dataset.records().map(|r| r.timestamp).collect();
  assert_eq!(timestamps, expected);

  let cpu = batch
    .column(8)
    .as_any()
    .downcast_ref::<Float32Array>()
    .unwrap();
  assert_eq!(cpu.value(24), dataset.record(24).unwrap().cpu);
}
