//! This crate implements the benchmark-side infrastructure for the cluster monitoring workload,
//! including:
//! - Loading the event log into a fixed-size in-memory arena, replaying it when it is too short
//! - The schema descriptor handed to the query engine
//! - The [`BenchmarkQuery`](benchmark::BenchmarkQuery) surface the harness drives
//! - Other utilities (Arrow export, synthetic event logs)

#[cfg(test)]
mod test;

pub mod batch;
pub mod benchmark;
pub mod config;
pub mod error;
pub mod loader;
pub mod schema;
pub mod util;

pub use benchmark::{ApplicationBuilder, BenchmarkQuery, ClusterMonitoring};
pub use config::DatasetConfig;
pub use error::DatasetError;
pub use loader::{dump_records, load_in_memory_data, load_with_config, InMemoryDataset};
pub use schema::TupleSchema;
