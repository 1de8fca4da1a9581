//! Geolocation Resolver Port
//!
//! Defines the interface for resolving IP addresses to geolocation records.

use crate::domain::entities::GeoRecord;
use async_trait::async_trait;

/// Resolver for one IP address to its geolocation record.
///
/// This is an outbound port that abstracts the remote geolocation service.
/// Implementations own their retry policy; callers only observe the
/// presence or absence of a record.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolve an IP address to its geolocation record.
    ///
    /// The address is passed through textually with no syntax validation;
    /// malformed input is delegated to the remote service. Returns None
    /// when no record could be obtained.
    async fn resolve(&self, ip: &str) -> Option<GeoRecord>;
}
