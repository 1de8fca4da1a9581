//! Application Layer
//!
//! Use cases orchestrating the domain ports.

mod batch_service;

pub use batch_service::BatchService;
