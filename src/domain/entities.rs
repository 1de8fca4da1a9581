//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the batch geocoding domain.
//! They have no external dependencies and contain only business logic.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A geolocation record returned by the remote service.
///
/// The field set is determined entirely by the remote service and is not
/// fixed by this system. The decoded response body is carried verbatim as
/// an open name-to-value mapping, never reshaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoRecord {
    fields: Map<String, Value>,
}

impl GeoRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Look up a single field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field names in the order the service returned them.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Aggregated outcome of one batch run.
///
/// Holds the successful geolocation records in input order. Failed lookups
/// contribute nothing; there is no placeholder for a failed IP.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    records: Vec<GeoRecord>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a successful record, preserving arrival order.
    pub fn push(&mut self, record: GeoRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    /// Number of successfully resolved IPs.
    pub fn success_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
