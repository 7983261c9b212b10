//! Loading the cluster event log into an in-memory arena.
//!
//! The log is parsed line by line into a [`RecordArena`] sized from the configured bundle. When
//! the log runs out before the arena is full, the remaining slots are synthesized by
//! [`replicate`], so a successfully loaded dataset is always exactly `capacity` records long.

use std::{
  fs::File,
  io::{self, BufRead, BufReader, Write},
  path::Path,
};

use cluster_monitoring_core::{replicate, Record, RecordArena, FIELD_NAMES, RECORD_SIZE};
use tracing::{debug, info};

use crate::{
  config::DatasetConfig,
  error::{DatasetError, Result},
};

/// The prepared dataset: a full arena plus the logical time range it covers.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
  arena: RecordArena,
  start_timestamp: i64,
  end_timestamp: i64,
  records_read: usize,
}

impl InMemoryDataset {
  /// The encoded records, `len() * RECORD_SIZE` bytes.
  pub fn as_bytes(&self) -> &[u8] {
    self.arena.as_bytes()
  }

  pub fn len(&self) -> usize {
    self.arena.len()
  }

  pub fn is_empty(&self) -> bool {
    self.arena.is_empty()
  }

  pub fn capacity(&self) -> usize {
    self.arena.capacity()
  }

  pub fn record(&self, index: usize) -> Option<Record> {
    self.arena.record(index)
  }

  pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
    self.arena.iter()
  }

  /// Timestamp of the first record.
  pub fn start_timestamp(&self) -> i64 {
    self.start_timestamp
  }

  /// Timestamp of the last record, replicated or not.
  pub fn end_timestamp(&self) -> i64 {
    self.end_timestamp
  }

  /// Records taken from the input file.
  pub fn records_read(&self) -> usize {
    self.records_read
  }

  /// Records synthesized by replaying the input.
  pub fn records_replicated(&self) -> usize {
    self.len() - self.records_read
  }
}

/// Load `path` into an arena of `bundle_size / RECORD_SIZE` records.
///
/// Reading stops as soon as the arena is full; a shorter file is replayed until it is.
pub fn load_in_memory_data(path: impl AsRef<Path>, bundle_size: usize) -> Result<InMemoryDataset> {
  let path = path.as_ref();
  let mut arena = RecordArena::from_byte_budget(bundle_size);
  if arena.capacity() == 0 {
    return Err(DatasetError::ZeroCapacity {
      bundle_size,
      record_size: RECORD_SIZE,
    });
  }

  let mut start_timestamp = 0;
  let mut end_timestamp = 0;

  {
    let file = File::open(path).map_err(|source| DatasetError::FileNotFound {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), capacity = arena.capacity(), "loading in-memory data");

    for (line_idx, line) in BufReader::new(file).lines().enumerate() {
      if arena.is_full() {
        break;
      }
      let line = line.map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
      })?;
      let record = Record::parse(&line).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        line: line_idx + 1,
        source,
      })?;

      if arena.push(&record)? == 0 {
        start_timestamp = record.timestamp;
      }
      end_timestamp = record.timestamp;
    }
  }

  let records_read = arena.len();
  if records_read == 0 {
    return Err(DatasetError::EmptyDataset {
      path: path.to_path_buf(),
    });
  }

  if !arena.is_full() {
    let replication = replicate(&mut arena)?;
    end_timestamp = replication.end_timestamp;
    debug!(
      records_read,
      replicated = replication.replicated,
      "input exhausted, replayed records to fill the bundle"
    );
  }

  info!(
    path = %path.display(),
    capacity = arena.capacity(),
    records_read,
    start_timestamp,
    end_timestamp,
    "in-memory data loaded"
  );

  Ok(InMemoryDataset {
    arena,
    start_timestamp,
    end_timestamp,
    records_read,
  })
}

/// Load `path` with the configured bundle size, dumping the records to stdout in debug mode.
pub fn load_with_config(path: impl AsRef<Path>, config: &DatasetConfig) -> Result<InMemoryDataset> {
  let dataset = load_in_memory_data(path, config.bundle_size)?;
  if config.debug {
    let stdout = io::stdout();
    dump_records(&dataset, &mut stdout.lock()).map_err(DatasetError::Dump)?;
  }
  Ok(dataset)
}

/// Write every record of the dataset in a fixed column format, one line per slot.
pub fn dump_records(dataset: &InMemoryDataset, out: &mut impl Write) -> io::Result<()> {
  writeln!(out, "{}", FIELD_NAMES.join(" "))?;
  for (idx, r) in dataset.records().enumerate() {
    writeln!(
      out,
      "[DBG] {:09}: {:7} {:13} {:8} {:13} {:3} {:6} {:2} {:2} {:8.3}",
      idx,
      r.timestamp,
      r.job_id,
      r.task_id,
      r.machine_id,
      r.event_type,
      r.user_id,
      r.category,
      r.priority,
      r.cpu
    )?;
  }
  out.flush()
}
