use crate::arena::{ArenaError, RecordArena};

/// Outcome of [`replicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replication {
  /// Number of records synthesized.
  pub replicated: usize,
  /// Timestamp of the last record in the arena.
  pub end_timestamp: i64,
}

/// Fill the free slots of a partially filled arena by replaying the records already in it.
///
/// With `R` records loaded, replay cycles over the first `barrier = R - 1` records. Every copy
/// gets `last_time` added to its timestamp, where `last_time` starts as the timestamp of record
/// `R - 1` and, each time a cycle completes, becomes the timestamp of the record just written.
///
/// Example: capacity 8, loaded timestamps `[1, 2, 4]` produce
/// `[1, 2, 4, 5, 6, 7, 8, 9]`.
///
/// With `R == 1` the barrier is 0 and is never reached, so each new record is a copy of its
/// predecessor shifted by the first timestamp.
pub fn replicate(arena: &mut RecordArena) -> Result<Replication, ArenaError> {
  if arena.is_empty() {
    return Err(ArenaError::Empty);
  }
  let read = arena.len();
  let mut end_timestamp = arena.timestamp(read - 1).ok_or(ArenaError::Empty)?;

  let barrier = read - 1;
  let mut last_time = end_timestamp;
  let mut iter = 0;

  while !arena.is_full() {
    end_timestamp = arena.replay(iter, last_time)?;
    iter += 1;
    if iter == barrier {
      iter = 0;
      // seed the next cycle from the record just written
      last_time = end_timestamp;
    }
  }

  Ok(Replication {
    replicated: arena.len() - read,
    end_timestamp,
  })
}
