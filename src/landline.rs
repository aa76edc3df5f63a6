//! Fixed-line area code lookup.
//!
//! Landline numbers are not in the binary index. They are resolved by
//! area code through a [`LandlineStore`], typically backed by a relational
//! table `(province, city, area_code)`. [`AreaCodeTable`] is an in-memory
//! implementation loadable from JSON.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, LookupBackendError, Result};

/// One row of the area code table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCode {
    pub province: String,
    pub city: String,
    pub area_code: String,
}

impl AreaCode {
    pub fn new(
        province: impl Into<String>,
        city: impl Into<String>,
        area_code: impl Into<String>,
    ) -> Self {
        Self {
            province: province.into(),
            city: city.into(),
            area_code: area_code.into(),
        }
    }
}

/// Source of area code data for fixed-line numbers.
///
/// `candidates` holds the number's 3- and 4-digit prefixes. An
/// implementation returns the row whose area code equals any candidate,
/// `Ok(None)` when no row matches, or an error when the store itself fails.
pub trait LandlineStore {
    fn lookup_area(
        &self,
        candidates: &[&str],
    ) -> std::result::Result<Option<AreaCode>, LookupBackendError>;
}

/// In-memory area code table.
#[derive(Debug, Clone, Default)]
pub struct AreaCodeTable {
    rows: AHashMap<String, AreaCode>,
}

impl AreaCodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows. Later rows replace earlier ones with the
    /// same area code.
    pub fn from_rows(rows: impl IntoIterator<Item = AreaCode>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.insert(row);
        }
        table
    }

    /// Parse a JSON array of `{province, city, area_code}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<AreaCode> =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self::from_rows(rows))
    }

    /// Load a JSON area code file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let table = Self::from_json(&content)?;
        log::info!("Loaded {} area codes from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn insert(&mut self, row: AreaCode) {
        self.rows.insert(row.area_code.clone(), row);
    }

    pub fn get(&self, area_code: &str) -> Option<&AreaCode> {
        self.rows.get(area_code)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl LandlineStore for AreaCodeTable {
    fn lookup_area(
        &self,
        candidates: &[&str],
    ) -> std::result::Result<Option<AreaCode>, LookupBackendError> {
        Ok(candidates.iter().find_map(|c| self.get(c)).cloned())
    }
}
