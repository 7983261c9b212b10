//! This crate provides the core data structures and algorithms for preparing the cluster monitoring
//! benchmark dataset:
//! - The fixed 9-field [`Record`] and its portable binary layout
//! - The fixed-capacity [`RecordArena`] the dataset lives in
//! - The cyclic [`replicate`] step that stretches a short event log to fill the arena
//!
//! Nothing here touches the filesystem; file loading lives in `cluster-monitoring-eval`.

pub mod arena;
pub mod record;
pub mod replicate;
pub mod traits;

pub use arena::{ArenaError, RecordArena};
pub use record::{Record, RecordError, FIELD_NAMES, NUM_FIELDS, RECORD_SIZE};
pub use replicate::{replicate, Replication};
