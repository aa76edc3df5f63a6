//! Process-wide data file and landline store.
//!
//! Optional convenience for applications that load one data file at
//! startup. Initialization happens at most once; lookups afterwards share
//! the loaded file without locking.

use once_cell::sync::OnceCell;
use std::path::Path;

use crate::binary::DataFile;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::landline::{AreaCodeTable, LandlineStore};
use crate::lookup::find;
use crate::record::PhoneRecord;

/// Global data file.
static DATA_FILE: OnceCell<DataFile> = OnceCell::new();

/// Global landline store.
static LANDLINE_STORE: OnceCell<Box<dyn LandlineStore + Send + Sync>> = OnceCell::new();

/// Load the global data file from a path.
///
/// This should be called once at startup.
pub fn init_data_file(path: impl AsRef<Path>) -> Result<&'static DataFile> {
    let file = DataFile::load(path)?;
    set_data_file(file)
}

/// Install an already loaded data file as the global one.
pub fn set_data_file(file: DataFile) -> Result<&'static DataFile> {
    DATA_FILE
        .set(file)
        .map_err(|_| Error::AlreadyInitialized("data file"))?;
    data_file()
}

/// Install the global landline store.
pub fn init_landline_store(store: impl LandlineStore + Send + Sync + 'static) -> Result<()> {
    LANDLINE_STORE
        .set(Box::new(store))
        .map_err(|_| Error::AlreadyInitialized("landline store"))
}

/// Initialize global state from a configuration.
///
/// Loads the data file and, when configured, the area code table.
pub fn init_from_config(config: &Config) -> Result<&'static DataFile> {
    let file = init_data_file(&config.phonedata)?;
    if let Some(path) = &config.area_codes {
        init_landline_store(AreaCodeTable::load(path)?)?;
    }
    Ok(file)
}

/// Get the global data file.
pub fn data_file() -> Result<&'static DataFile> {
    DATA_FILE.get().ok_or(Error::NotInitialized("data file"))
}

/// Check if the global data file is loaded.
pub fn is_initialized() -> bool {
    DATA_FILE.get().is_some()
}

/// Look up a phone number against the global data file and landline store.
pub fn find_phone(phone: &str, reference_area_code: &str) -> Result<PhoneRecord> {
    let store = LANDLINE_STORE.get().map(|s| &**s as &dyn LandlineStore);
    find(data_file()?, phone, reference_area_code, store)
}
