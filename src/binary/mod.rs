//! Binary phone data file format.
//!
//! A compact, immutable file: a fixed header, variable-length records, and
//! a fixed-width index sorted by the numeric 7-digit mobile prefix.
//! All integers are little-endian.
//!
//! # File Structure
//!
//! ```text
//! +------------------+
//! |     HEADER       |  8 bytes: version tag (4) + first index offset (u32)
//! +------------------+
//! |     RECORDS      |  province|city|zip|area_code\0 ...
//! +------------------+  <- first index offset
//! |      INDEX       |  9 bytes each: key (u32) + record offset (u32)
//! |                  |                + carrier code (u8), sorted by key
//! +------------------+  <- EOF
//! ```

mod format;
mod reader;
pub mod writer;


pub use format::*;
pub use reader::DataFile;
pub use writer::{parse_source_line, DataFileWriter, SourceRow};
