use thiserror::Error;

use crate::record::{Record, RECORD_SIZE};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
  #[error("arena is full ({capacity} records)")]
  Full { capacity: usize },

  #[error("arena holds no records to replay")]
  Empty,

  #[error("record index {index} out of bounds (len {len})")]
  IndexOutOfBounds { index: usize, len: usize },

  #[error("timestamp overflow while rebasing record {index}")]
  TimestampOverflow { index: usize },
}

/// A [`RecordArena`] is a fixed-capacity, contiguous buffer of encoded [`Record`]s.
/// The whole buffer is allocated up front and filled front to back; `len` counts the slots
/// written so far. Only the filled prefix is ever visible through the accessors.
#[derive(Debug, Clone)]
pub struct RecordArena {
  data: Vec<u8>,
  capacity: usize,
  len: usize,
}

impl RecordArena {
  pub fn with_capacity(capacity: usize) -> RecordArena {
    RecordArena {
      data: vec![0; capacity * RECORD_SIZE],
      capacity,
      len: 0,
    }
  }

  /// Allocate as many record slots as fit in `byte_budget` bytes.
  pub fn from_byte_budget(byte_budget: usize) -> RecordArena {
    Self::with_capacity(byte_budget / RECORD_SIZE)
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn is_full(&self) -> bool {
    self.len == self.capacity
  }

  /// Append a record to the next free slot and return its index.
  pub fn push(&mut self, record: &Record) -> Result<usize, ArenaError> {
    if self.is_full() {
      return Err(ArenaError::Full {
        capacity: self.capacity,
      });
    }
    let index = self.len;
    record.encode(self.slot_mut(index));
    self.len += 1;
    Ok(index)
  }

  /// Append a byte-for-byte copy of slot `src` with `offset` added to its timestamp.
  /// Returns the timestamp of the appended record.
  pub fn replay(&mut self, src: usize, offset: i64) -> Result<i64, ArenaError> {
    if self.is_full() {
      return Err(ArenaError::Full {
        capacity: self.capacity,
      });
    }
    if src >= self.len {
      return Err(ArenaError::IndexOutOfBounds {
        index: src,
        len: self.len,
      });
    }

    let dst = self.len;
    let src_start = src * RECORD_SIZE;
    self
      .data
      .copy_within(src_start..src_start + RECORD_SIZE, dst * RECORD_SIZE);

    let slot = self.slot_mut(dst);
    let timestamp = Record::timestamp_at(slot)
      .checked_add(offset)
      .ok_or(ArenaError::TimestampOverflow { index: dst })?;
    Record::set_timestamp_at(slot, timestamp);

    self.len += 1;
    Ok(timestamp)
  }

  pub fn record(&self, index: usize) -> Option<Record> {
    self.slot(index).map(Record::decode)
  }

  pub fn timestamp(&self, index: usize) -> Option<i64> {
    self.slot(index).map(Record::timestamp_at)
  }

  /// Encoded bytes of a filled slot.
  pub fn slot(&self, index: usize) -> Option<&[u8]> {
    if index >= self.len {
      return None;
    }
    let start = index * RECORD_SIZE;
    Some(&self.data[start..start + RECORD_SIZE])
  }

  /// The filled prefix of the arena as raw bytes.
  pub fn as_bytes(&self) -> &[u8] {
    &self.data[..self.len * RECORD_SIZE]
  }

  pub fn iter(&self) -> impl Iterator<Item = Record> + '_ {
    self.as_bytes().chunks_exact(RECORD_SIZE).map(Record::decode)
  }

  fn slot_mut(&mut self, index: usize) -> &mut [u8] {
    let start = index * RECORD_SIZE;
    &mut self.data[start..start + RECORD_SIZE]
  }
}
