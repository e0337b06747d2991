//! Database handle and query API.
//!
//! Opening a database memory-maps the file and decodes the fixed header
//! once; the handle is immutable afterwards. Queries run normalize →
//! range search → string-pool resolve as a plain synchronous call chain,
//! and every read is offset-addressed, so one handle can serve concurrent
//! queries without locks. The mapping is released when the handle drops.

use crate::addr::{normalize, IpValue};
use crate::db1::{locate, Header};
use crate::error::{Error, Result};
use crate::reader::ByteReader;
use memmap2::Mmap;
use serde::Serialize;
use std::fs::File;

/// Country code and name for the range containing a queried address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    /// Two-letter country code
    pub country_code: String,
    /// Full country name
    pub country_name: String,
}

/// Storage for database data - either owned or memory-mapped
enum Storage {
    Owned(Vec<u8>),
    Mmap(Mmap),
}

impl Storage {
    fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Owned(v) => v.as_slice(),
            Storage::Mmap(m) => &m[..],
        }
    }
}

/// Read-only handle to a DB1 database.
///
/// # Examples
///
/// ```no_run
/// use ipcountry::Database;
///
/// let db = Database::open("IP-COUNTRY.BIN")?;
/// let result = db.query("8.8.8.8")?;
/// println!("{} ({})", result.country_name, result.country_code);
/// # Ok::<(), ipcountry::Error>(())
/// ```
pub struct Database {
    data: Storage,
    header: Header,
}

impl Database {
    /// Open a database file using memory mapping.
    ///
    /// The header is decoded and validated here; a bad path or an
    /// unsupported format byte fails fast and never yields a handle.
    pub fn open(path: &str) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::Io(format!("failed to open {}: {}", path, e)))?;

        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|e| Error::Io(format!("failed to mmap {}: {}", path, e)))?;

        Self::from_storage(Storage::Mmap(mmap))
    }

    /// Create a database from raw bytes (for testing)
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_storage(Storage::Owned(data))
    }

    fn from_storage(data: Storage) -> Result<Self> {
        let header = Header::parse(ByteReader::new(data.as_slice()))?;
        Ok(Self { data, header })
    }

    /// Look up the country for an IP address given as text.
    ///
    /// Accepts IPv4 and IPv6 literals, including the v4-mapped, 6to4 and
    /// Teredo v6 carrier forms of an IPv4 address. A failed query leaves
    /// the handle fully usable.
    pub fn query(&self, addr: &str) -> Result<LookupResult> {
        let ip = normalize(addr).ok_or_else(|| Error::InvalidAddress(addr.to_string()))?;
        self.query_value(ip)
    }

    /// Look up the country for an already-normalized address.
    pub fn query_value(&self, ip: IpValue) -> Result<LookupResult> {
        let r = ByteReader::new(self.data.as_slice());

        let pointer_offset = locate(r, &self.header, ip)?;
        let country_index = r.read_u32(pointer_offset)?;

        // The name record sits 3 bytes past the code record: one length
        // byte plus the two-letter code.
        let country_code = r.read_str(country_index)?;
        let country_name = r.read_str(country_index + 3)?;

        Ok(LookupResult {
            country_code,
            country_name,
        })
    }

    /// Database version string, from the header's raw date bytes.
    pub fn version(&self) -> String {
        self.header.version()
    }

    /// Number of stored IPv4 ranges.
    pub fn ipv4_count(&self) -> u32 {
        self.header.v4.rows
    }

    /// Number of stored IPv6 ranges.
    pub fn ipv6_count(&self) -> u32 {
        self.header.v6.rows
    }

    /// Whether the file carries an IPv4 index table.
    pub fn has_ipv4_index(&self) -> bool {
        self.header.v4.index_offset.is_some()
    }

    /// Whether the file carries an IPv6 index table.
    pub fn has_ipv6_index(&self) -> bool {
        self.header.v6.index_offset.is_some()
    }
}
