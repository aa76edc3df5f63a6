//! phonedata - Phone number attribution lookup over a binary index file.
//!
//! Resolves a Chinese phone number to province, city, zip code, area code
//! and carrier using a precomputed, sorted binary data file held in memory.
//!
//! # Features
//!
//! - **Binary index**: O(log n) search over fixed 9-byte index entries
//! - **Lazy decoding**: records are decoded only for the matched entry
//! - **Immutable**: a loaded [`DataFile`] is read-only and `Send + Sync`
//! - **Fixed-line support**: landline numbers resolved through a pluggable
//!   [`LandlineStore`]
//! - **Memory-mapped or gzip-compressed** data files
//!
//! # Quick Start
//!
//! ```ignore
//! use phonedata::{find, DataFile};
//!
//! let data = DataFile::load("phone.dat")?;
//! let record = find(&data, "13800138000", "020", None)?;
//! println!("{} {} {}", record.province, record.city, record.card_type);
//! ```
//!
//! # Number Classes
//!
//! - **7 or 8 characters**: local subscriber number, no lookup performed
//! - **11 or 12 digits, mobile**: searched in the binary index by the first
//!   seven digits (one leading `0` is stripped)
//! - **11 or 12 digits, fixed-line**: resolved by 3- or 4-digit area code
//!   through a [`LandlineStore`]
//! - **Anything else**: [`Error::UnknownNumberFormat`]

mod carrier;
mod error;
mod global;
mod lookup;
mod record;

pub mod binary;
pub mod classify;
pub mod config;
pub mod landline;

// Re-export core types
pub use binary::DataFile;
pub use carrier::{card_type_label, Carrier, UNKNOWN_CARRIER_LABEL};
pub use error::{DecodeError, Error, LoadError, LookupBackendError, Result};
pub use record::{Locality, PhoneRecord, Record};

// Re-export lookup
pub use classify::{classify, NumberClass};
pub use config::Config;
pub use landline::{AreaCode, AreaCodeTable, LandlineStore};
pub use lookup::find;

// Re-export global API functions
pub use global::{
    data_file, find_phone, init_data_file, init_from_config, init_landline_store,
    is_initialized, set_data_file,
};
