//! CSV neighbourhood table loader.
//!
//! # CSV format
//!
//! One row per neighbourhood.  `x`/`y` (a display centroid) may be omitted.
//!
//! ```csv
//! name,housing_quality,shops,crime,nature,expense,capacity,base_price,x,y
//! Centrum,7.1,0.9,0.6,0.12,900,52000,480000,4.895,52.372
//! Noord,6.8,0.4,0.3,0.35,750,48000,390000,,
//! ```
//!
//! Rows are validated as they are read: every numeric field must be finite,
//! `capacity`, `expense` and `base_price` non-negative, and names unique.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use hm_core::{HmError, HmResult};

use crate::NeighbourhoodRecord;

/// Load neighbourhood records from a CSV file.
pub fn load_neighbourhoods_csv(path: &Path) -> HmResult<Vec<NeighbourhoodRecord>> {
    let file = std::fs::File::open(path)?;
    load_neighbourhoods_reader(file)
}

/// Like [`load_neighbourhoods_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for embedded tables.
pub fn load_neighbourhoods_reader<R: Read>(reader: R) -> HmResult<Vec<NeighbourhoodRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    let mut names = HashSet::new();

    for (line, result) in csv_reader.deserialize::<NeighbourhoodRecord>().enumerate() {
        let record = result.map_err(|e| HmError::Parse(e.to_string()))?;
        validate(&record, line + 2)?;
        if !names.insert(record.name.clone()) {
            return Err(HmError::Parse(format!("duplicate neighbourhood {:?} on line {}", record.name, line + 2)));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(HmError::Parse("neighbourhood table is empty".into()));
    }
    Ok(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn validate(r: &NeighbourhoodRecord, line: usize) -> HmResult<()> {
    let fields = [
        ("housing_quality", r.housing_quality),
        ("shops", r.shops),
        ("crime", r.crime),
        ("nature", r.nature),
        ("expense", r.expense),
        ("capacity", r.capacity),
        ("base_price", r.base_price),
    ];
    for (name, v) in fields {
        if !v.is_finite() {
            return Err(HmError::Parse(format!("line {line}: {name} is not a finite number")));
        }
    }
    for (name, v) in [("expense", r.expense), ("capacity", r.capacity), ("base_price", r.base_price)] {
        if v < 0.0 {
            return Err(HmError::Parse(format!("line {line}: {name} must be non-negative, got {v}")));
        }
    }
    Ok(())
}
