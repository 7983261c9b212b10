//! Error types for dataset preparation

use std::{io, path::PathBuf};

use cluster_monitoring_core::{ArenaError, RecordError};
use thiserror::Error;

/// Every failure while preparing the dataset aborts benchmark setup; none of these are retried.
#[derive(Error, Debug)]
pub enum DatasetError {
  #[error("input file {} does not exist or cannot be opened: {source}", .path.display())]
  FileNotFound {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("{}:{line}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    line: usize,
    #[source]
    source: RecordError,
  },

  #[error("input file {} contains no records", .path.display())]
  EmptyDataset { path: PathBuf },

  #[error("bundle size of {bundle_size} bytes cannot hold a single {record_size}-byte record")]
  ZeroCapacity {
    bundle_size: usize,
    record_size: usize,
  },

  #[error("cannot determine the home directory")]
  HomeDirUnavailable,

  #[error("arena error: {0}")]
  Arena(#[from] ArenaError),

  #[error("failed to write diagnostic dump: {0}")]
  Dump(#[source] io::Error),

  #[error("unsupported operation: {0}")]
  UnsupportedOperation(&'static str),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
