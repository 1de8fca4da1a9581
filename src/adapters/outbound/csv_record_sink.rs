//! CSV Record Sink
//!
//! Implements RecordSink by materializing records as rows of a CSV table.

use crate::domain::entities::{BatchResult, GeoRecord};
use crate::domain::ports::RecordSink;
use anyhow::Context;
use serde_json::Value;
use std::path::PathBuf;

/// CSV-backed record sink.
///
/// Columns are the union of all field names observed across the batch, in
/// first-seen order. A record missing a column leaves that cell blank.
pub struct CsvRecordSink {
    path: PathBuf,
}

impl CsvRecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for CsvRecordSink {
    fn persist(&self, batch: &BatchResult) -> anyhow::Result<()> {
        let columns = column_union(batch.records());

        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("failed to create output file {}", self.path.display()))?;

        if !columns.is_empty() {
            writer.write_record(&columns)?;
            for record in batch.records() {
                let row: Vec<String> = columns
                    .iter()
                    .map(|column| record.get(column).map(render_cell).unwrap_or_default())
                    .collect();
                writer.write_record(&row)?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// Union of field names across records, in first-seen order.
fn column_union(records: &[GeoRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Render one field value as a CSV cell. Strings appear bare, null as a
/// blank cell, and anything else as its JSON text.
fn render_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
