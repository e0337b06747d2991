//! Fixed-offset header parsing.
//!
//! The header is read exactly once, at open; after that every query works
//! from this decoded copy and never touches the header bytes again. The
//! only validation is the format byte - the format carries no checksums.

use crate::error::{Error, Result};
use crate::reader::ByteReader;

/// Format version this engine reads.
const SUPPORTED_FORMAT: u8 = 1;

/// Decoded per-family range-table description.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableMeta {
    /// Number of stored rows (excludes the terminating boundary address)
    pub rows: u32,
    /// Byte offset of the first row
    pub data_offset: u32,
    /// Byte offset of the 16-bit-bucket index table, if the file has one
    pub index_offset: Option<u32>,
    /// Width of one row in bytes
    pub row_width: u32,
}

/// Decoded DB1 header. Immutable for the lifetime of the handle.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header {
    pub columns: u8,
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub v4: TableMeta,
    pub v6: TableMeta,
}

impl Header {
    /// Parse the fixed header fields.
    ///
    /// The offset fields at 9, 17, 21 and 25 are 1-based file positions;
    /// they are converted to byte offsets here. An index offset of zero
    /// means the file carries no accelerator for that family.
    pub fn parse(r: ByteReader<'_>) -> Result<Self> {
        let format = r.read_u8(0)?;
        if format != SUPPORTED_FORMAT {
            return Err(Error::UnsupportedFormat(format));
        }

        let columns = r.read_u8(1)?;
        let year = r.read_u8(2)?;
        let month = r.read_u8(3)?;
        let day = r.read_u8(4)?;

        let v4_rows = r.read_u32(5)?;
        let v4_data = r.read_u32(9)?;
        let v6_rows = r.read_u32(13)?;
        let v6_data = r.read_u32(17)?;
        let v4_index = r.read_u32(21)?;
        let v6_index = r.read_u32(25)?;

        // All columns are 4 bytes, except the v6 address column which is 16
        let v4_width = columns as u32 * 4;
        let v6_width = 16 + (columns as u32).saturating_sub(1) * 4;

        Ok(Header {
            columns,
            year,
            month,
            day,
            v4: TableMeta {
                rows: v4_rows,
                data_offset: v4_data.saturating_sub(1),
                index_offset: v4_index.checked_sub(1),
                row_width: v4_width,
            },
            v6: TableMeta {
                rows: v6_rows,
                data_offset: v6_data.saturating_sub(1),
                index_offset: v6_index.checked_sub(1),
                row_width: v6_width,
            },
        })
    }

    /// Database version string from the raw year/month/day header bytes.
    pub fn version(&self) -> String {
        format!("{}-{}-{}", self.year, self.month, self.day)
    }
}
