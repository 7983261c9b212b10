//! Columnar view of the in-memory dataset as an Arrow [`RecordBatch`].

use std::sync::Arc;

use arrow::{
  array::{ArrayRef, Float32Array, Int32Array, Int64Array},
  error::ArrowError,
  record_batch::RecordBatch,
};

use crate::{loader::InMemoryDataset, schema::TupleSchema};

impl InMemoryDataset {
  /// Decode every record into one column per attribute, under `schema`.
  pub fn to_record_batch(&self, schema: &TupleSchema) -> Result<RecordBatch, ArrowError> {
    let n = self.len();
    let mut timestamp = Vec::with_capacity(n);
    let mut job_id = Vec::with_capacity(n);
    let mut task_id = Vec::with_capacity(n);
    let mut machine_id = Vec::with_capacity(n);
    let mut event_type = Vec::with_capacity(n);
    let mut user_id = Vec::with_capacity(n);
    let mut category = Vec::with_capacity(n);
    let mut priority = Vec::with_capacity(n);
    let mut cpu = Vec::with_capacity(n);

    for record in self.records() {
      timestamp.push(record.timestamp);
      job_id.push(record.job_id);
      task_id.push(record.task_id);
      machine_id.push(record.machine_id);
      event_type.push(record.event_type);
      user_id.push(record.user_id);
      category.push(record.category);
      priority.push(record.priority);
      cpu.push(record.cpu);
    }

    let columns: Vec<ArrayRef> = vec![
      Arc::new(Int64Array::from(timestamp)),
      Arc::new(Int64Array::from(job_id)),
      Arc::new(Int64Array::from(task_id)),
      Arc::new(Int64Array::from(machine_id)),
      Arc::new(Int32Array::from(event_type)),
      Arc::new(Int32Array::from(user_id)),
      Arc::new(Int32Array::from(category)),
      Arc::new(Int32Array::from(priority)),
      Arc::new(Float32Array::from(cpu)),
    ];

    RecordBatch::try_new(schema.arrow_schema(), columns)
  }
}
