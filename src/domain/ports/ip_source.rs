//! IP Source Port
//!
//! Defines the interface for supplying the batch input list.

/// Supplier of the ordered IP address list for one batch run.
///
/// This is an outbound port abstracting the input storage. Implementations
/// may read CSV files, databases, or any other ordered source.
pub trait IpSource: Send + Sync {
    /// Whether the underlying source exists and can be opened.
    ///
    /// An entirely missing source is the one fatal precondition of a run;
    /// it is probed once before any lookup starts.
    fn exists(&self) -> bool;

    /// Load the ordered sequence of IP address strings.
    fn load(&self) -> anyhow::Result<Vec<String>>;
}
