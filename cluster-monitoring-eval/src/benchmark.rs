//! Benchmark query definitions.
//!
//! A benchmark supplies three things to the harness: the schema of its input stream, the
//! in-memory input data, and the query application built over them. How the application is
//! built is a strategy ([`ApplicationBuilder`]) composed into the benchmark rather than
//! something each benchmark re-implements.

use std::{path::Path, sync::OnceLock};

use anyhow::anyhow;

use crate::{
  config::DatasetConfig,
  error::{DatasetError, Result},
  loader::{load_with_config, InMemoryDataset},
  schema::TupleSchema,
};

/// Builds the query application of a benchmark once its schema and data are available.
pub trait ApplicationBuilder {
  type Application;

  fn build(
    &self,
    schema: &TupleSchema,
    dataset: &InMemoryDataset,
  ) -> anyhow::Result<Self::Application>;
}

impl<F, A> ApplicationBuilder for F
where
  F: Fn(&TupleSchema, &InMemoryDataset) -> anyhow::Result<A>,
{
  type Application = A;

  fn build(&self, schema: &TupleSchema, dataset: &InMemoryDataset) -> anyhow::Result<A> {
    self(schema, dataset)
  }
}

/// What the harness reads from a benchmark.
pub trait BenchmarkQuery {
  type Application;

  /// The query application, once created.
  fn application(&self) -> Option<&Self::Application>;

  /// The encoded in-memory input stream, once loaded.
  fn in_memory_data(&self) -> Option<&[u8]>;

  /// A precomputed static relation, for benchmarks that join against one.
  fn static_data(&self) -> Result<&[u8]>;

  fn schema(&self) -> &TupleSchema;
}

/// The cluster monitoring benchmark over the Google cluster trace.
pub struct ClusterMonitoring<B: ApplicationBuilder> {
  config: DatasetConfig,
  builder: B,
  schema: OnceLock<TupleSchema>,
  data: Option<InMemoryDataset>,
  application: Option<B::Application>,
}

impl<B: ApplicationBuilder> ClusterMonitoring<B> {
  pub fn new(config: DatasetConfig, builder: B) -> Self {
    Self {
      config,
      builder,
      schema: OnceLock::new(),
      data: None,
      application: None,
    }
  }

  pub fn config(&self) -> &DatasetConfig {
    &self.config
  }

  /// Load the dataset from its fixed location under the configured home directory.
  pub fn load_in_memory_data(&mut self) -> Result<&InMemoryDataset> {
    let path = self.config.dataset_path()?;
    self.load_in_memory_data_from(path)
  }

  /// Load the dataset from an explicit path.
  pub fn load_in_memory_data_from(&mut self, path: impl AsRef<Path>) -> Result<&InMemoryDataset> {
    let dataset = load_with_config(path, &self.config)?;
    Ok(&*self.data.insert(dataset))
  }

  pub fn dataset(&self) -> Option<&InMemoryDataset> {
    self.data.as_ref()
  }

  /// Build the query application over the loaded data.
  pub fn create_application(&mut self) -> anyhow::Result<&B::Application> {
    let dataset = self
      .data
      .as_ref()
      .ok_or_else(|| anyhow!("in-memory data must be loaded before creating the application"))?;
    let application = self.builder.build(self.schema(), dataset)?;
    Ok(&*self.application.insert(application))
  }
}

impl<B: ApplicationBuilder> BenchmarkQuery for ClusterMonitoring<B> {
  type Application = B::Application;

  fn application(&self) -> Option<&B::Application> {
    self.application.as_ref()
  }

  fn in_memory_data(&self) -> Option<&[u8]> {
    self.data.as_ref().map(InMemoryDataset::as_bytes)
  }

  fn static_data(&self) -> Result<&[u8]> {
    Err(DatasetError::UnsupportedOperation(
      "this benchmark does not have static data",
    ))
  }

  fn schema(&self) -> &TupleSchema {
    self.schema.get_or_init(TupleSchema::cluster_monitoring)
  }
}
