//! Binary format constants and fixed-width readers.

/// Width of every integer field in the file.
pub const INT_LEN: usize = 4;

/// Width of the carrier code field.
pub const CHAR_LEN: usize = 1;

/// Header size in bytes: version tag + first index offset.
pub const HEADER_SIZE: usize = INT_LEN * 2;

/// Index entry size: key (4) + record offset (4) + carrier code (1).
pub const PHONE_INDEX_LENGTH: usize = INT_LEN * 2 + CHAR_LEN;

/// Default data file name.
pub const DEFAULT_DATA_FILE: &str = "phone.dat";

/// Number of leading digits that form an index key.
pub const MOBILE_KEY_DIGITS: usize = 7;

/// Record field delimiter.
pub const FIELD_DELIMITER: u8 = b'|';

/// Record terminator.
pub const RECORD_TERMINATOR: u8 = 0;

/// Gzip magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read a little-endian `u32` at `offset`.
///
/// Returns `None` if the four bytes do not fit in `buf`.
#[inline]
pub fn read_u32_le(buf: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(INT_LEN)?;
    let bytes: [u8; INT_LEN] = buf.get(offset..end)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

/// Read the opaque 4-byte tag at `offset`.
#[inline]
pub fn read_tag(buf: &[u8], offset: usize) -> Option<[u8; INT_LEN]> {
    let end = offset.checked_add(INT_LEN)?;
    buf.get(offset..end)?.try_into().ok()
}

/// Data file header (8 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Opaque format identifier, not interpreted
    pub version: [u8; INT_LEN],
    /// Byte offset where the index region begins
    pub first_index_offset: u32,
}

impl Header {
    /// Parse the header from the start of `buf`.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        Some(Self {
            version: read_tag(buf, 0)?,
            first_index_offset: read_u32_le(buf, INT_LEN)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..INT_LEN].copy_from_slice(&self.version);
        out[INT_LEN..].copy_from_slice(&self.first_index_offset.to_le_bytes());
        out
    }
}

/// Index entry (9 bytes, unaligned).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Numeric value of the first seven digits of a mobile number
    pub key: u32,
    /// Absolute offset of the record
    pub record_offset: u32,
    /// Carrier tag
    pub carrier_code: u8,
}

impl IndexEntry {
    /// Read an entry starting at `offset`.
    ///
    /// Returns `None` if the full entry does not fit in `buf`.
    pub fn read(buf: &[u8], offset: usize) -> Option<Self> {
        let end = offset.checked_add(PHONE_INDEX_LENGTH)?;
        let raw = buf.get(offset..end)?;
        Some(Self {
            key: read_u32_le(raw, 0)?,
            record_offset: read_u32_le(raw, INT_LEN)?,
            carrier_code: raw[INT_LEN * 2],
        })
    }

    pub fn to_bytes(&self) -> [u8; PHONE_INDEX_LENGTH] {
        let mut out = [0u8; PHONE_INDEX_LENGTH];
        out[..INT_LEN].copy_from_slice(&self.key.to_le_bytes());
        out[INT_LEN..INT_LEN * 2].copy_from_slice(&self.record_offset.to_le_bytes());
        out[INT_LEN * 2] = self.carrier_code;
        out
    }
}
