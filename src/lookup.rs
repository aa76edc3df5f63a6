//! Phone number lookup.

use crate::binary::DataFile;
use crate::classify::{classify, NumberClass};
use crate::error::{Error, LookupBackendError, Result};
use crate::landline::LandlineStore;
use crate::record::{Locality, PhoneRecord};

/// Resolve a phone number to its geographic and carrier data.
///
/// - 7 or 8 digits: a bare record tagged [`Locality::Local`].
/// - Fixed-line numbers: resolved through `landline` by area code. A
///   missing row yields a record with empty geographic fields, which the
///   containment rule tags as local; a missing store is
///   [`LookupBackendError::Unavailable`].
/// - Mobile numbers: resolved through the binary index of `data`.
///
/// `reference_area_code` is the caller's own area code; a result whose area
/// code it contains is tagged [`Locality::Local`].
pub fn find(
    data: &DataFile,
    phone: &str,
    reference_area_code: &str,
    landline: Option<&dyn LandlineStore>,
) -> Result<PhoneRecord> {
    match classify(phone)? {
        NumberClass::Short { number } => Ok(PhoneRecord::bare(number, Locality::Local)),
        NumberClass::Landline { number, prefixes } => {
            let store = landline.ok_or(LookupBackendError::Unavailable)?;
            let mut record = PhoneRecord::bare(number, Locality::Domestic);
            let candidates = [prefixes[0].as_str(), prefixes[1].as_str()];
            if let Some(row) = store.lookup_area(&candidates)? {
                record.province = row.province;
                record.city = row.city;
                record.area_zone = row.area_code;
            }
            record.locality = Locality::derive(&record.area_zone, reference_area_code);
            Ok(record)
        }
        NumberClass::Mobile { number, key } => {
            let entry = data.search(key).ok_or_else(|| Error::NotFound(number.clone()))?;
            let decoded = data.decode(&entry)?;
            Ok(PhoneRecord::from_record(number, decoded, reference_area_code))
        }
    }
}
