//! Record Sink Port
//!
//! Defines the interface for persisting the aggregated batch outcome.

use crate::domain::entities::BatchResult;

/// Destination for the aggregated geolocation records.
///
/// This is an outbound port abstracting the output table. Implementations
/// materialize one row per record, with columns formed from the union of
/// observed field names.
pub trait RecordSink: Send + Sync {
    /// Persist the batch result as a table.
    fn persist(&self, batch: &BatchResult) -> anyhow::Result<()>;
}
