//! Country table: the in-memory dataset a session plays against.
//!
//! Loaded once from a JSON array. Names are indexed lowercased; when two records
//! share a lowercased name the earlier one wins.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::{GridError, Result};
use crate::types::CountryRecord;

#[derive(Debug, Default)]
pub struct CountryTable {
    records: Vec<CountryRecord>,
    by_name: HashMap<String, usize>,
}

impl CountryTable {
    pub fn from_records(records: Vec<CountryRecord>) -> Self {
        let mut by_name = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            by_name.entry(record.name.to_lowercase()).or_insert(idx);
        }
        Self { records, by_name }
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let records: Vec<CountryRecord> = serde_json::from_slice(bytes)?;
        Ok(Self::from_records(records))
    }

    /// Read and parse a dataset file. No retry: a failure leaves the game
    /// uninitialized and is reported to the caller.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let start_time = Instant::now();
        info!(path = %path.display(), "loading country data");

        let bytes = std::fs::read(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "country data not readable");
            GridError::load(path, e)
        })?;
        let table = Self::from_json_slice(&bytes)?;

        info!(
            countries = table.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "country data loaded"
        );
        Ok(table)
    }

    /// Case-insensitive exact match on the country name.
    pub fn find(&self, name: &str) -> Option<&CountryRecord> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
