use std::path::PathBuf;

use cluster_monitoring_core::RECORD_SIZE;

use crate::error::{DatasetError, Result};

/// Default arena byte budget: 64MB.
pub const DEFAULT_BUNDLE_SIZE: usize = 64 * 1024 * 1024;

/// Dataset directory, relative to the home directory.
pub const DATASET_DIR: &str = "LightSaber/resources/datasets/google-cluster-data";

pub const DATASET_FILE: &str = "google-cluster-data.txt";

/// Settings the benchmark harness hands to dataset preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
  /// Arena size in bytes. Capacity is `bundle_size / RECORD_SIZE` records.
  pub bundle_size: usize,
  /// Dump every loaded record to stdout after loading.
  pub debug: bool,
  /// Base directory of the dataset path. Falls back to the user's home directory.
  pub home_dir: Option<PathBuf>,
}

impl Default for DatasetConfig {
  fn default() -> Self {
    Self {
      bundle_size: DEFAULT_BUNDLE_SIZE,
      debug: false,
      home_dir: None,
    }
  }
}

impl DatasetConfig {
  pub fn with_bundle_size(mut self, bundle_size: usize) -> Self {
    self.bundle_size = bundle_size;
    self
  }

  pub fn with_debug(mut self, debug: bool) -> Self {
    self.debug = debug;
    self
  }

  pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
    self.home_dir = Some(home_dir.into());
    self
  }

  /// Number of record slots the configured bundle holds.
  pub fn capacity(&self) -> usize {
    self.bundle_size / RECORD_SIZE
  }

  pub fn home_dir(&self) -> Result<PathBuf> {
    self
      .home_dir
      .clone()
      .or_else(dirs::home_dir)
      .ok_or(DatasetError::HomeDirUnavailable)
  }

  /// `<home>/LightSaber/resources/datasets/google-cluster-data/google-cluster-data.txt`
  pub fn dataset_path(&self) -> Result<PathBuf> {
    Ok(self.home_dir()?.join(DATASET_DIR).join(DATASET_FILE))
  }
}
