//! Positioned reads over the database image.
//!
//! Every read takes an absolute byte offset into the image; nothing here
//! keeps a cursor. That is what makes a single open handle safe to query
//! from many threads at once: reads never contend on shared position state.
//!
//! All multi-byte integers in the file are little-endian. 128-bit address
//! values are stored as 16 little-endian bytes and read into a `u128`, so
//! range comparisons happen on plain unsigned machine integers.

use crate::error::{Error, Result};

/// Offset-addressed reader over the raw database bytes.
///
/// Reads past the end of the image fail with `Error::Io`, the same way a
/// short positioned read against the underlying file would.
#[derive(Clone, Copy)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Borrow `len` bytes starting at `offset`, bounds-checked.
    fn slice(&self, offset: u32, len: usize) -> Result<&'a [u8]> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or_else(|| {
            Error::Io(format!("read of {} bytes at offset {} overflows", len, offset))
        })?;
        self.data.get(start..end).ok_or_else(|| {
            Error::Io(format!(
                "short read: {} bytes at offset {} past end of {}-byte database",
                len,
                offset,
                self.data.len()
            ))
        })
    }

    pub fn read_u8(&self, offset: u32) -> Result<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn read_u32(&self, offset: u32) -> Result<u32> {
        let bytes = self.slice(offset, 4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(buf))
    }

    /// Read a 128-bit address value (16 little-endian bytes).
    pub fn read_u128(&self, offset: u32) -> Result<u128> {
        let bytes = self.slice(offset, 16)?;
        let mut buf = [0u8; 16];
        buf.copy_from_slice(bytes);
        Ok(u128::from_le_bytes(buf))
    }

    /// Read a length-prefixed string: one length byte, then that many bytes.
    pub fn read_str(&self, offset: u32) -> Result<String> {
        let len = self.read_u8(offset)?;
        let bytes = self.slice(offset + 1, len as usize)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
