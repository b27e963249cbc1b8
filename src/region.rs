//! Region normalization: collapse sub-regions ("Western Europe", "Eastern
//! Asia", "Caribbean") into the canonical names region predicates compare
//! against.
//!
//! Runs offline over the dataset file, never during a session.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::constants::REGION_MAPPINGS;
use crate::error::{GridError, Result};

/// Canonical region for `region`: the first [`REGION_MAPPINGS`] key contained
/// in the lowercased input, else the input unchanged.
pub fn simplify_region(region: &str) -> String {
    let lower = region.to_lowercase();
    REGION_MAPPINGS
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| region.to_string())
}

/// Rewrite the `region` string of every record in a dataset array. Other
/// fields are left untouched. Returns how many regions changed.
pub fn simplify_dataset(data: &mut Value) -> Result<usize> {
    let records = data.as_array_mut().ok_or(GridError::NotAnArray)?;
    let mut changed = 0;
    for record in records.iter_mut() {
        let Some(Value::String(region)) = record.get_mut("region") else {
            continue;
        };
        let simplified = simplify_region(region);
        if simplified != *region {
            *region = simplified;
            changed += 1;
        }
    }
    Ok(changed)
}

/// Read `path`, simplify every region, and write the file back pretty-printed.
pub fn simplify_file(path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| GridError::load(path, e))?;
    let mut data: Value = serde_json::from_str(&content)?;
    let changed = simplify_dataset(&mut data)?;

    let output = serde_json::to_string_pretty(&data)?;
    std::fs::write(path, output).map_err(|e| GridError::write(path, e))?;
    info!(path = %path.display(), changed, "regions simplified");
    Ok(changed)
}
