use std::{collections::HashMap, sync::Arc};

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use cluster_monitoring_core::{FIELD_NAMES, RECORD_SIZE};

pub const SCHEMA_NAME: &str = "ClusterMonitoring";

/// A [`TupleSchema`] describes the record layout of the in-memory dataset to the query engine:
/// attribute names and types in storage order, backed by an Arrow [`Schema`] so it can be handed
/// to Arrow-speaking consumers unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleSchema {
  name: String,
  schema: SchemaRef,
  tuple_size: usize,
}

impl TupleSchema {
  /// The 9-attribute schema of a cluster monitoring task event.
  pub fn cluster_monitoring() -> TupleSchema {
    let types = [
      DataType::Int64,
      DataType::Int64,
      DataType::Int64,
      DataType::Int64,
      DataType::Int32,
      DataType::Int32,
      DataType::Int32,
      DataType::Int32,
      DataType::Float32,
    ];

    let fields: Vec<Field> = FIELD_NAMES
      .iter()
      .zip(types)
      .map(|(name, data_type)| Field::new(*name, data_type, false))
      .collect();
    let metadata = HashMap::from([("name".to_string(), SCHEMA_NAME.to_string())]);

    TupleSchema {
      name: SCHEMA_NAME.to_string(),
      schema: Arc::new(Schema::new_with_metadata(fields, metadata)),
      tuple_size: RECORD_SIZE,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn num_attributes(&self) -> usize {
    self.schema.fields().len()
  }

  pub fn attribute_name(&self, index: usize) -> Option<&str> {
    self
      .schema
      .fields()
      .get(index)
      .map(|field| field.name().as_str())
  }

  pub fn attribute_type(&self, index: usize) -> Option<&DataType> {
    self
      .schema
      .fields()
      .get(index)
      .map(|field| field.data_type())
  }

  /// Width in bytes of one encoded tuple.
  pub fn tuple_size(&self) -> usize {
    self.tuple_size
  }

  pub fn arrow_schema(&self) -> SchemaRef {
    self.schema.clone()
  }
}
