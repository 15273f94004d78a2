use log::debug;
use std::fs;
use std::path::PathBuf;

use crate::core::metrics::distinct_chapters;
use crate::core::Observation;
use crate::errors::AuditError;
use crate::filter::{self, FilterCriteria};

/// Supplies observation records to the aggregation pipeline.
///
/// `fetch_filtered` exists for sources that can filter closer to the
/// data. Its default implementation filters the full fetch locally
/// through [`filter::matches`]; an implementation that pushes criteria
/// down must return exactly what the default would, so filtered
/// fetches and local filtering stay interchangeable.
pub trait ObservationSource {
    fn fetch_all(&self) -> Result<Vec<Observation>, AuditError>;

    fn fetch_filtered(&self, criteria: &FilterCriteria) -> Result<Vec<Observation>, AuditError> {
        Ok(filter::filter_owned(&self.fetch_all()?, criteria))
    }

    /// Distinct chapter labels, sorted ascending.
    fn chapters(&self) -> Result<Vec<String>, AuditError> {
        let records = self.fetch_all()?;
        Ok(distinct_chapters(records.iter()))
    }
}

/// Records held in memory, mainly for hosts that fetch elsewhere and
/// for tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    records: Vec<Observation>,
}

impl MemorySource {
    pub fn new(records: Vec<Observation>) -> Self {
        Self { records }
    }
}

impl ObservationSource for MemorySource {
    fn fetch_all(&self) -> Result<Vec<Observation>, AuditError> {
        Ok(self.records.clone())
    }
}

/// Records stored as a JSON array on disk.
///
/// An unreadable file is a `SourceUnavailable` error. A file that
/// reads but does not decode (malformed date, unknown severity or
/// status, structural damage) is a `Validation` error, and the whole
/// load fails rather than dropping the bad record.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ObservationSource for JsonFileSource {
    fn fetch_all(&self) -> Result<Vec<Observation>, AuditError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            AuditError::source_unavailable(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let records: Vec<Observation> = serde_json::from_str(&raw).map_err(|e| {
            AuditError::validation(format!("undecodable record in {}: {e}", self.path.display()))
        })?;

        debug!(
            "loaded {} observations from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
