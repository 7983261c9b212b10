use std::path::PathBuf;

use anyhow::Result;
use arrow::{record_batch::RecordBatch, util::pretty::print_batches};
use clap::Parser;
use cluster_monitoring_eval::{
  config::DEFAULT_BUNDLE_SIZE, BenchmarkQuery, ClusterMonitoring, DatasetConfig, InMemoryDataset,
  TupleSchema,
};

/// Loads the cluster monitoring dataset into memory and reports what the benchmark would see.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
  #[clap(
    long,
    env = "CLUSTER_MONITORING_BUNDLE_SIZE",
    default_value_t = DEFAULT_BUNDLE_SIZE,
    help = "Arena size in bytes"
  )]
  bundle_size: usize,
  #[clap(
    long,
    env = "CLUSTER_MONITORING_DEBUG",
    help = "Dump every loaded record after loading"
  )]
  debug: bool,
  #[clap(
    long,
    env = "CLUSTER_MONITORING_HOME",
    help = "Directory the dataset path is resolved against (defaults to the home directory)"
  )]
  home: Option<PathBuf>,
  /// Load this file instead of the dataset under the home directory
  #[clap(long)]
  file: Option<PathBuf>,
  #[clap(long, default_value_t = 0, help = "Pretty-print the first N records")]
  preview: usize,
}

fn to_batch(schema: &TupleSchema, dataset: &InMemoryDataset) -> Result<RecordBatch> {
  Ok(dataset.to_record_batch(schema)?)
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    )
    .init();

  let args = Args::parse();

  let mut config = DatasetConfig::default()
    .with_bundle_size(args.bundle_size)
    .with_debug(args.debug);
  if let Some(home) = args.home {
    config = config.with_home_dir(home);
  }

  let mut benchmark = ClusterMonitoring::new(config, to_batch);
  let dataset = match args.file {
    Some(file) => benchmark.load_in_memory_data_from(file)?,
    None => benchmark.load_in_memory_data()?,
  };

  println!("records:     {}", dataset.len());
  println!("  read:      {}", dataset.records_read());
  println!("  replayed:  {}", dataset.records_replicated());
  println!("bytes:       {}", dataset.as_bytes().len());
  println!(
    "time range:  [{}, {}]",
    dataset.start_timestamp(),
    dataset.end_timestamp()
  );

  let schema = benchmark.schema();
  let attributes: Vec<String> = (0..schema.num_attributes())
    .filter_map(|idx| Some(format!("{}:{}", schema.attribute_name(idx)?, schema.attribute_type(idx)?)))
    .collect();
  println!("schema:      {} ({})", schema.name(), attributes.join(", "));

  if args.preview > 0 {
    let batch = benchmark.create_application()?;
    let preview = batch.slice(0, args.preview.min(batch.num_rows()));
    print_batches(&[preview])?;
  }

  Ok(())
}
