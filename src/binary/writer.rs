//! Data file writer.
//!
//! Produces files readable by [`DataFile`](super::DataFile): header, record
//! region, then the index region sorted by key.

use ahash::AHashMap;
use std::io::{BufRead, BufReader, Read};

use super::format::*;
use crate::carrier::Carrier;
use crate::classify::parse_key;
use crate::{Error, Result};

/// One source row: a 7-digit prefix and its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub prefix: u32,
    pub province: String,
    pub city: String,
    pub zip_code: String,
    pub area_code: String,
    pub carrier_code: u8,
}

impl SourceRow {
    pub fn new(
        prefix: u32,
        province: impl Into<String>,
        city: impl Into<String>,
        zip_code: impl Into<String>,
        area_code: impl Into<String>,
        carrier_code: u8,
    ) -> Self {
        Self {
            prefix,
            province: province.into(),
            city: city.into(),
            zip_code: zip_code.into(),
            area_code: area_code.into(),
            carrier_code,
        }
    }

    fn fields(&self) -> [&str; 4] {
        [
            self.province.as_str(),
            self.city.as_str(),
            self.zip_code.as_str(),
            self.area_code.as_str(),
        ]
    }
}

/// Parse one line of the text source format:
/// `prefix|province|city|zip|area|carrier`.
///
/// `carrier` is a numeric code or a name such as `CMCC`. Returns `Ok(None)`
/// for blank lines and `#` comments.
pub fn parse_source_line(line: &str, line_no: usize) -> Result<Option<SourceRow>> {
    let line = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let invalid = |reason: String| Error::InvalidSource {
        line: line_no,
        reason,
    };

    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    if parts.len() != 6 {
        return Err(invalid(format!("expected 6 fields, found {}", parts.len())));
    }

    if parts[0].len() != MOBILE_KEY_DIGITS {
        return Err(invalid(format!("prefix must have 7 digits: {}", parts[0])));
    }
    let prefix = parse_key(parts[0]).map_err(|e| invalid(e.to_string()))?;

    let carrier_code = match parts[5].parse::<u8>() {
        Ok(code) => code,
        Err(_) => parts[5]
            .parse::<Carrier>()
            .map(Carrier::as_u8)
            .map_err(|_| invalid(format!("unknown carrier: {}", parts[5])))?,
    };

    Ok(Some(SourceRow::new(
        prefix,
        parts[1],
        parts[2],
        parts[3],
        parts[4],
        carrier_code,
    )))
}

/// Builder for phone data files.
pub struct DataFileWriter {
    version: [u8; INT_LEN],
    rows: Vec<SourceRow>,
}

impl DataFileWriter {
    pub fn new(version: [u8; INT_LEN]) -> Self {
        Self {
            version,
            rows: Vec::new(),
        }
    }

    /// Parse the text source format into a writer.
    pub fn from_source<R: Read>(reader: R, version: [u8; INT_LEN]) -> Result<Self> {
        let mut writer = Self::new(version);
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            if let Some(row) = parse_source_line(&line?, i + 1)? {
                writer.add(row);
            }
        }
        Ok(writer)
    }

    pub fn add(&mut self, row: SourceRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize the data file.
    ///
    /// Identical records are stored once. Index entries are sorted by key;
    /// rows sharing a key keep their insertion order.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; HEADER_SIZE];
        let mut offsets: AHashMap<[&str; 4], u32> = AHashMap::new();
        let mut entries = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let fields = row.fields();
            if fields
                .iter()
                .any(|f| f.bytes().any(|b| b == FIELD_DELIMITER || b == RECORD_TERMINATOR))
            {
                return Err(Error::Build(format!(
                    "record field contains a delimiter: {:?}",
                    fields
                )));
            }

            let record_offset = match offsets.get(&fields) {
                Some(offset) => *offset,
                None => {
                    let offset = to_offset(buffer.len())?;
                    buffer.extend_from_slice(fields.join("|").as_bytes());
                    buffer.push(RECORD_TERMINATOR);
                    offsets.insert(fields, offset);
                    offset
                }
            };

            entries.push(IndexEntry {
                key: row.prefix,
                record_offset,
                carrier_code: row.carrier_code,
            });
        }

        entries.sort_by_key(|e| e.key);

        let header = Header {
            version: self.version,
            first_index_offset: to_offset(buffer.len())?,
        };
        buffer[..HEADER_SIZE].copy_from_slice(&header.to_bytes());

        for entry in &entries {
            buffer.extend_from_slice(&entry.to_bytes());
        }
        to_offset(buffer.len())?;

        Ok(buffer)
    }
}

fn to_offset(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::Build("data file exceeds 4 GiB".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_limit() {
        assert_eq!(to_offset(HEADER_SIZE).unwrap(), HEADER_SIZE as u32);
        assert_eq!(to_offset(u32::MAX as usize).unwrap(), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            to_offset(u32::MAX as usize + 1),
            Err(Error::Build(_))
        ));
    }

    #[test]
    fn test_write_empty() {
        let data = DataFileWriter::new(*b"2301").build().unwrap();
        assert_eq!(data.len(), HEADER_SIZE);
        assert_eq!(&data[..4], b"2301");
        assert_eq!(read_u32_le(&data, 4), Some(HEADER_SIZE as u32));
    }

    #[test]
    fn test_records_are_shared() {
        let mut writer = DataFileWriter::new(*b"2301");
        writer.add(SourceRow::new(1_300_000, "北京", "北京", "100000", "010", 2));
        writer.add(SourceRow::new(1_300_001, "北京", "北京", "100000", "010", 2));
        let data = writer.build().unwrap();

        let record = "北京|北京|100000|010\0".len();
        assert_eq!(data.len(), HEADER_SIZE + record + 2 * PHONE_INDEX_LENGTH);

        let first = read_u32_le(&data, 4).unwrap() as usize;
        let a = IndexEntry::read(&data, first).unwrap();
        let b = IndexEntry::read(&data, first + PHONE_INDEX_LENGTH).unwrap();
        assert_eq!(a.record_offset, b.record_offset);
        assert_eq!(a.record_offset, HEADER_SIZE as u32);
    }

    #[test]
    fn test_index_sorted() {
        let mut writer = DataFileWriter::new(*b"2301");
        for prefix in [1_890_000, 1_300_000, 1_550_000] {
            writer.add(SourceRow::new(prefix, "p", "c", "z", "a", 1));
        }
        let data = writer.build().unwrap();
        let first = read_u32_le(&data, 4).unwrap() as usize;
        let keys: Vec<u32> = (0..3)
            .map(|i| IndexEntry::read(&data, first + i * PHONE_INDEX_LENGTH).unwrap().key)
            .collect();
        assert_eq!(keys, vec![1_300_000, 1_550_000, 1_890_000]);
    }

    #[test]
    fn test_rejects_delimiter_in_field() {
        let mut writer = DataFileWriter::new(*b"2301");
        writer.add(SourceRow::new(1_300_000, "a|b", "c", "z", "a", 1));
        assert!(matches!(writer.build(), Err(Error::Build(_))));
    }

    #[test]
    fn test_parse_source_line() {
        let row = parse_source_line("1380013|广东|广州|510000|020|1", 1)
            .unwrap()
            .unwrap();
        assert_eq!(row, SourceRow::new(1_380_013, "广东", "广州", "510000", "020", 1));

        let row = parse_source_line("1700000 | 北京 | 北京 | 100000 | 010 | CMCC_v # mvno", 2)
            .unwrap()
            .unwrap();
        assert_eq!(row.carrier_code, Carrier::CmccVirtual.as_u8());
        assert_eq!(row.area_code, "010");
    }

    #[test]
    fn test_parse_source_line_skips() {
        assert_eq!(parse_source_line("", 1).unwrap(), None);
        assert_eq!(parse_source_line("   # comment", 1).unwrap(), None);
    }

    #[test]
    fn test_parse_source_line_errors() {
        for line in [
            "1380013|广东|广州|510000|020",
            "138001|广东|广州|510000|020|1",
            "13800a3|广东|广州|510000|020|1",
            "1380013|广东|广州|510000|020|telecom",
        ] {
            assert!(
                matches!(parse_source_line(line, 7), Err(Error::InvalidSource { line: 7, .. })),
                "{}",
                line
            );
        }
    }

    #[test]
    fn test_from_source() {
        let source = "# prefix|province|city|zip|area|carrier\n\
                      1380013|广东|广州|510000|020|1\n\
                      \n\
                      1760008|北京|北京|100000|010|CUCC\n";
        let writer = DataFileWriter::from_source(source.as_bytes(), *b"2301").unwrap();
        assert_eq!(writer.len(), 2);
    }
}
