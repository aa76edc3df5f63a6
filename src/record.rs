//! Lookup results.

use serde::Serialize;
use std::fmt;

/// A decoded record from the data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub province: String,
    pub city: String,
    pub zip_code: String,
    pub area_code: String,
    /// Carrier display label
    pub card_type: &'static str,
}

/// Whether a number belongs to the caller's own area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locality {
    /// Same area as the reference area code
    Local,
    /// Elsewhere in the country
    Domestic,
}

impl Locality {
    /// Compare a resolved area code against the caller's reference.
    ///
    /// `Local` when `reference` contains `area_zone`. An empty area zone is
    /// contained in every reference and is therefore always local.
    pub fn derive(area_zone: &str, reference: &str) -> Self {
        if reference.contains(area_zone) {
            Locality::Local
        } else {
            Locality::Domestic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locality::Local => "local",
            Locality::Domestic => "domestic",
        }
    }

    /// Display label reported in lookups.
    pub fn label(&self) -> &'static str {
        match self {
            Locality::Local => "本地",
            Locality::Domestic => "国内",
        }
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of a phone number lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneRecord {
    pub phone_num: String,
    pub province: String,
    pub city: String,
    pub zip_code: String,
    pub area_zone: String,
    pub card_type: String,
    pub locality: Locality,
}

impl PhoneRecord {
    /// A record with no geographic or carrier data.
    pub fn bare(phone_num: impl Into<String>, locality: Locality) -> Self {
        Self {
            phone_num: phone_num.into(),
            province: String::new(),
            city: String::new(),
            zip_code: String::new(),
            area_zone: String::new(),
            card_type: String::new(),
            locality,
        }
    }

    /// Assemble a mobile result from a decoded record.
    pub fn from_record(phone_num: impl Into<String>, record: Record, reference: &str) -> Self {
        let locality = Locality::derive(&record.area_code, reference);
        Self {
            phone_num: phone_num.into(),
            province: record.province,
            city: record.city,
            zip_code: record.zip_code,
            area_zone: record.area_code,
            card_type: record.card_type.to_string(),
            locality,
        }
    }
}

impl fmt::Display for PhoneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PhoneNum: {}", self.phone_num)?;
        writeln!(f, "AreaZone: {}", self.area_zone)?;
        writeln!(f, "CardType: {}", self.card_type)?;
        writeln!(f, "City: {}", self.city)?;
        writeln!(f, "ZipCode: {}", self.zip_code)?;
        writeln!(f, "Province: {}", self.province)
    }
}
