//! Batch Service - Main application use case
//!
//! Drives the resolver over a full input list and aggregates results.
//! This is the primary interface for the composition root.

use crate::domain::entities::BatchResult;
use crate::domain::ports::GeoResolver;
use std::sync::Arc;

/// Batch driver - main application use case.
///
/// Iterates the input list strictly in order, one IP at a time, invoking
/// the resolver for each. Successful records are appended to the result;
/// failed lookups are skipped with no placeholder. The remote service's
/// rate limit is the binding constraint, so lookups are never parallelized.
pub struct BatchService {
    resolver: Arc<dyn GeoResolver>,
}

impl BatchService {
    /// Create a new batch service.
    pub fn new(resolver: Arc<dyn GeoResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve every IP in `ips`, collecting the successful records.
    ///
    /// One IP's failure never aborts the batch; the output simply contains
    /// fewer rows than the input. Reports the final success count.
    pub async fn process(&self, ips: &[String]) -> BatchResult {
        let mut batch = BatchResult::new();

        for ip in ips {
            if let Some(record) = self.resolver.resolve(ip).await {
                batch.push(record);
            }
        }

        tracing::info!("total IPs processed successfully: {}", batch.success_count());
        batch
    }
}
