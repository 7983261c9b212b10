//! The fixed 9-field event record of the cluster monitoring dataset.
//!
//! A [`Record`] is parsed from one whitespace-delimited line of the event log and stored in the
//! arena in a portable binary layout: fields in declaration order, little-endian, no padding.
//!
//! | field     | type | offset |
//! |-----------|------|--------|
//! | timestamp | i64  | 0      |
//! | jobId     | i64  | 8      |
//! | taskId    | i64  | 16     |
//! | machineId | i64  | 24     |
//! | eventType | i32  | 32     |
//! | userId    | i32  | 36     |
//! | category  | i32  | 40     |
//! | priority  | i32  | 44     |
//! | cpu       | f32  | 48     |

use thiserror::Error;

use crate::traits::FieldValue;

pub const NUM_FIELDS: usize = 9;

/// Attribute names in declaration order.
pub const FIELD_NAMES: [&str; NUM_FIELDS] = [
  "timestamp",
  "jobId",
  "taskId",
  "machineId",
  "eventType",
  "userId",
  "category",
  "priority",
  "cpu",
];

/// Byte offset of every field inside an encoded record.
pub const FIELD_OFFSETS: [usize; NUM_FIELDS] = [0, 8, 16, 24, 32, 36, 40, 44, 48];

/// Width in bytes of one encoded record.
pub const RECORD_SIZE: usize = 52;

const TIMESTAMP_OFFSET: usize = FIELD_OFFSETS[0];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
  #[error("missing field {index} ({name}): expected 9 fields, found {found}")]
  MissingField {
    index: usize,
    name: &'static str,
    found: usize,
  },

  #[error("invalid value {token:?} for field {index} ({name})")]
  InvalidField {
    index: usize,
    name: &'static str,
    token: String,
  },
}

/// One task event of the cluster trace.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Record {
  pub timestamp: i64,
  pub job_id: i64,
  pub task_id: i64,
  pub machine_id: i64,
  pub event_type: i32,
  pub user_id: i32,
  pub category: i32,
  pub priority: i32,
  pub cpu: f32,
}

impl Record {
  /// Parse one line of the event log.
  ///
  /// The first 9 whitespace-separated tokens are converted in field order, anything after them is
  /// ignored. A line with fewer tokens, or a token that does not parse as its field type, is an
  /// error.
  pub fn parse(line: &str) -> Result<Record, RecordError> {
    let tokens: Vec<&str> = line.split_whitespace().take(NUM_FIELDS).collect();
    if tokens.len() < NUM_FIELDS {
      return Err(RecordError::MissingField {
        index: tokens.len(),
        name: FIELD_NAMES[tokens.len()],
        found: tokens.len(),
      });
    }

    Ok(Record {
      timestamp: parse_token(&tokens, 0)?,
      job_id: parse_token(&tokens, 1)?,
      task_id: parse_token(&tokens, 2)?,
      machine_id: parse_token(&tokens, 3)?,
      event_type: parse_token(&tokens, 4)?,
      user_id: parse_token(&tokens, 5)?,
      category: parse_token(&tokens, 6)?,
      priority: parse_token(&tokens, 7)?,
      cpu: parse_token(&tokens, 8)?,
    })
  }

  /// Encode the record into the first [`RECORD_SIZE`] bytes of `out`.
  ///
  /// Panics if `out` is shorter than [`RECORD_SIZE`].
  pub fn encode(&self, out: &mut [u8]) {
    let out = &mut out[..RECORD_SIZE];
    self.timestamp.write_le(&mut out[FIELD_OFFSETS[0]..]);
    self.job_id.write_le(&mut out[FIELD_OFFSETS[1]..]);
    self.task_id.write_le(&mut out[FIELD_OFFSETS[2]..]);
    self.machine_id.write_le(&mut out[FIELD_OFFSETS[3]..]);
    self.event_type.write_le(&mut out[FIELD_OFFSETS[4]..]);
    self.user_id.write_le(&mut out[FIELD_OFFSETS[5]..]);
    self.category.write_le(&mut out[FIELD_OFFSETS[6]..]);
    self.priority.write_le(&mut out[FIELD_OFFSETS[7]..]);
    self.cpu.write_le(&mut out[FIELD_OFFSETS[8]..]);
  }

  /// Decode a record from the first [`RECORD_SIZE`] bytes of `bytes`.
  ///
  /// Panics if `bytes` is shorter than [`RECORD_SIZE`].
  pub fn decode(bytes: &[u8]) -> Record {
    let bytes = &bytes[..RECORD_SIZE];
    Record {
      timestamp: i64::read_le(&bytes[FIELD_OFFSETS[0]..]),
      job_id: i64::read_le(&bytes[FIELD_OFFSETS[1]..]),
      task_id: i64::read_le(&bytes[FIELD_OFFSETS[2]..]),
      machine_id: i64::read_le(&bytes[FIELD_OFFSETS[3]..]),
      event_type: i32::read_le(&bytes[FIELD_OFFSETS[4]..]),
      user_id: i32::read_le(&bytes[FIELD_OFFSETS[5]..]),
      category: i32::read_le(&bytes[FIELD_OFFSETS[6]..]),
      priority: i32::read_le(&bytes[FIELD_OFFSETS[7]..]),
      cpu: f32::read_le(&bytes[FIELD_OFFSETS[8]..]),
    }
  }

  pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
    let mut out = [0u8; RECORD_SIZE];
    self.encode(&mut out);
    out
  }

  /// Read only the timestamp of an encoded record.
  pub fn timestamp_at(bytes: &[u8]) -> i64 {
    i64::read_le(&bytes[TIMESTAMP_OFFSET..])
  }

  /// Overwrite only the timestamp of an encoded record.
  pub fn set_timestamp_at(bytes: &mut [u8], timestamp: i64) {
    timestamp.write_le(&mut bytes[TIMESTAMP_OFFSET..]);
  }
}

fn parse_token<T: FieldValue>(tokens: &[&str], index: usize) -> Result<T, RecordError> {
  tokens[index]
    .parse::<T>()
    .map_err(|_| RecordError::InvalidField {
      index,
      name: FIELD_NAMES[index],
      token: tokens[index].to_string(),
    })
}
