//! Data file reader: header, index search and record decoding.

use flate2::read::GzDecoder;
use memmap2::Mmap;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use super::format::*;
use crate::carrier::card_type_label;
use crate::error::{DecodeError, LoadError};
use crate::record::Record;

/// Backing storage for a loaded data file.
enum Buffer {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Buffer::Owned(v) => v.as_slice(),
            Buffer::Mapped(m) => &m[..],
        }
    }
}

/// An immutable, fully loaded phone data file.
///
/// The header is parsed once at construction; records are decoded on
/// demand. A `DataFile` is `Send + Sync` and can be shared by reference
/// across threads without locking.
pub struct DataFile {
    buf: Buffer,
    header: Header,
    total_entries: usize,
}

impl DataFile {
    /// Load a data file fully into memory.
    ///
    /// Gzip-compressed files are inflated transparently.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|e| io_error(path, e))?;

        let data = if raw.starts_with(&GZIP_MAGIC) {
            let mut inflated = Vec::with_capacity(raw.len() * 4);
            GzDecoder::new(raw.as_slice())
                .read_to_end(&mut inflated)
                .map_err(|e| io_error(path, e))?;
            log::debug!(
                "Inflated {:?}: {} -> {} bytes",
                path,
                raw.len(),
                inflated.len()
            );
            inflated
        } else {
            raw
        };

        let file = Self::from_bytes(data)?;
        log::info!(
            "Loaded phone data {:?}: version {}, {} index entries",
            path,
            file.version_str(),
            file.total_entries()
        );
        Ok(file)
    }

    /// Memory-map a data file instead of copying it to the heap.
    ///
    /// The file must not be modified while mapped.
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let mmap = unsafe { Mmap::map(&file).map_err(|e| io_error(path, e))? };

        let file = Self::from_buffer(Buffer::Mapped(mmap))?;
        log::info!(
            "Mapped phone data {:?}: version {}, {} index entries",
            path,
            file.version_str(),
            file.total_entries()
        );
        Ok(file)
    }

    /// Build a data file from bytes already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, LoadError> {
        Self::from_buffer(Buffer::Owned(data))
    }

    fn from_buffer(buf: Buffer) -> Result<Self, LoadError> {
        let header = Header::parse(&buf).ok_or(LoadError::InvalidHeaderSize {
            expected: HEADER_SIZE,
            actual: buf.len(),
        })?;

        let first = header.first_index_offset as usize;
        if first < HEADER_SIZE || first > buf.len() {
            return Err(LoadError::InvalidIndexOffset {
                offset: header.first_index_offset,
                len: buf.len(),
            });
        }

        let total_entries = (buf.len() - first) / PHONE_INDEX_LENGTH;
        log::debug!(
            "Header: first index offset {}, {} bytes, {} entries",
            first,
            buf.len(),
            total_entries
        );

        Ok(Self {
            buf,
            header,
            total_entries,
        })
    }

    /// Get the file header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Opaque 4-byte version tag.
    pub fn version(&self) -> [u8; INT_LEN] {
        self.header.version
    }

    /// Version tag rendered as text (lossy).
    pub fn version_str(&self) -> String {
        String::from_utf8_lossy(&self.header.version).into_owned()
    }

    /// Offset where the index region begins.
    pub fn first_index_offset(&self) -> u32 {
        self.header.first_index_offset
    }

    /// Number of complete index entries.
    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Size of the loaded buffer in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }

    /// Raw file contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// SHA-256 of the raw buffer.
    pub fn checksum(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.as_bytes());
        hasher.finalize().into()
    }

    /// Read the index entry at position `index`.
    pub fn entry(&self, index: usize) -> Option<IndexEntry> {
        if index >= self.total_entries {
            return None;
        }
        let offset = index
            .checked_mul(PHONE_INDEX_LENGTH)?
            .checked_add(self.header.first_index_offset as usize)?;
        if offset >= self.buf.len() {
            return None;
        }
        IndexEntry::read(&self.buf, offset)
    }

    /// Iterate all index entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        (0..self.total_entries).map_while(move |i| self.entry(i))
    }

    /// Binary search the index for `key`.
    ///
    /// The index must be sorted ascending by key; otherwise the result is
    /// unspecified. With duplicate keys the leftmost entry is returned, so
    /// the result always equals a linear scan's first hit.
    pub fn search(&self, key: u32) -> Option<IndexEntry> {
        // Lower bound over [left, right): first position with entry.key >= key.
        let mut left = 0usize;
        let mut right = self.total_entries;

        while left < right {
            let mid = left + (right - left) / 2;
            let entry = self.entry(mid)?;
            if entry.key < key {
                left = mid + 1;
            } else {
                right = mid;
            }
        }

        self.entry(left).filter(|e| e.key == key)
    }

    /// Decode the record referenced by an index entry.
    pub fn decode(&self, entry: &IndexEntry) -> Result<Record, DecodeError> {
        let offset = entry.record_offset;
        let tail = self
            .buf
            .get(offset as usize..)
            .filter(|t| !t.is_empty())
            .ok_or(DecodeError::OffsetOutOfBounds(offset))?;

        let end = tail
            .iter()
            .position(|&b| b == RECORD_TERMINATOR)
            .ok_or(DecodeError::MissingTerminator(offset))?;

        let text =
            std::str::from_utf8(&tail[..end]).map_err(|_| DecodeError::InvalidUtf8(offset))?;

        let mut fields = text.split(FIELD_DELIMITER as char);
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(province), Some(city), Some(zip_code), Some(area_code)) => Ok(Record {
                province: province.to_string(),
                city: city.to_string(),
                zip_code: zip_code.to_string(),
                area_code: area_code.to_string(),
                card_type: card_type_label(entry.carrier_code),
            }),
            _ => Err(DecodeError::Malformed {
                offset,
                found: text.split(FIELD_DELIMITER as char).count(),
            }),
        }
    }

    /// Search and decode in one step.
    ///
    /// Returns `Ok(None)` when the key is absent.
    pub fn lookup_key(&self, key: u32) -> Result<Option<Record>, DecodeError> {
        self.search(key).map(|e| self.decode(&e)).transpose()
    }
}

fn io_error(path: &Path, source: io::Error) -> LoadError {
    if source.kind() == io::ErrorKind::NotFound {
        LoadError::NotFound(path.to_path_buf())
    } else {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl std::fmt::Debug for DataFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataFile")
            .field("version", &self.version_str())
            .field("first_index_offset", &self.header.first_index_offset)
            .field("total_entries", &self.total_entries)
            .field("len", &self.buf.len())
            .finish()
    }
}
