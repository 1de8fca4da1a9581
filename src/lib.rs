//! geoBatch Library
//!
//! This module exposes the batch geocoder components for use in integration
//! tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::outbound::{CsvIpSource, CsvRecordSink, HttpGeoResolver};
pub use application::BatchService;
pub use config::load_config;
pub use domain::entities::{BatchResult, GeoRecord};
pub use domain::ports::{GeoResolver, IpSource, RecordSink};
