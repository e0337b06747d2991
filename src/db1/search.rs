//! Index-assisted binary search over the sorted range tables.
//!
//! Rows hold only a range start; a row's exclusive upper bound is the start
//! of the row after it, so the search always reads two neighboring starts.
//! The file terminates each table with one extra boundary address, which is
//! what the final row's upper-bound read lands on.
//!
//! When the file carries an index table, the top 16 bits of the address
//! select an 8-byte entry holding the row bounds for that bucket; otherwise
//! the whole table is searched. Both cases feed the same loop.

use super::format::{Header, TableMeta};
use crate::addr::IpValue;
use crate::error::{Error, Result};
use crate::reader::ByteReader;

/// Byte offset of the country pointer within a row, just past the address.
const COUNTRY_COLUMN: u32 = 4;

/// Extra shift on v6 rows: the address column is 12 bytes wider than v4's.
const V6_COLUMN_SHIFT: u32 = 12;

/// Find the row whose range contains `ip`.
///
/// Returns the byte offset of that row's country pointer, or `NoResults`
/// when no stored range contains the address.
pub(crate) fn locate(r: ByteReader<'_>, header: &Header, ip: IpValue) -> Result<u32> {
    let (table, mut value, max, bucket_shift) = match ip {
        IpValue::V4(v) => (&header.v4, v as u128, u32::MAX as u128, 16u32),
        IpValue::V6(v) => (&header.v6, v, u128::MAX, 112u32),
    };

    // The top address of the space belongs to the last range rather than
    // falling one row past it.
    if value == max {
        value -= 1;
    }

    let (mut low, mut high) = initial_bounds(r, table, value, bucket_shift)?;

    while low <= high {
        let mid = (low + high) >> 1;
        let row = table.data_offset + mid as u32 * table.row_width;
        let next = row + table.row_width;

        let (ip_from, ip_to) = match ip {
            IpValue::V4(_) => (r.read_u32(row)? as u128, r.read_u32(next)? as u128),
            IpValue::V6(_) => (r.read_u128(row)?, r.read_u128(next)?),
        };

        if ip_from <= value && value < ip_to {
            let column = match ip {
                IpValue::V4(_) => row + COUNTRY_COLUMN,
                IpValue::V6(_) => row + V6_COLUMN_SHIFT + COUNTRY_COLUMN,
            };
            return Ok(column);
        } else if value < ip_from {
            high = mid - 1;
        } else {
            low = mid + 1;
        }
    }

    Err(Error::NoResults)
}

/// Initial row bounds: the address's index-table bucket when the file has
/// an accelerator for this family, the whole table otherwise.
fn initial_bounds(
    r: ByteReader<'_>,
    table: &TableMeta,
    value: u128,
    bucket_shift: u32,
) -> Result<(i64, i64)> {
    match table.index_offset {
        Some(base) => {
            let bucket = (value >> bucket_shift) as u32;
            let entry = base + bucket * 8;
            let low = r.read_u32(entry)?;
            let high = r.read_u32(entry + 4)?;
            Ok((low as i64, high as i64))
        }
        None => Ok((0, table.rows as i64 - 1)),
    }
}
