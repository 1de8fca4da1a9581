//! CSV IP Source
//!
//! Implements IpSource over a headerless CSV file, one IP per row.

use crate::domain::ports::IpSource;
use anyhow::Context;
use std::path::PathBuf;

/// CSV-backed IP source.
///
/// Reads the first column of every row as an IP address string, in file
/// order. The file carries no header row. No IP syntax validation happens
/// here; malformed entries are delegated to the remote service's response.
pub struct CsvIpSource {
    path: PathBuf,
}

impl CsvIpSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IpSource for CsvIpSource {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> anyhow::Result<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("failed to open input file {}", self.path.display()))?;

        let mut ips = Vec::new();
        for record in reader.records() {
            let record = record.with_context(|| {
                format!("failed to read input file {}", self.path.display())
            })?;

            if let Some(ip) = record.get(0) {
                if !ip.is_empty() {
                    ips.push(ip.to_string());
                }
            }
        }

        Ok(ips)
    }
}
