//! ipcountry - Fast IP-to-country lookups over DB1 binary databases
//!
//! ipcountry is a read-only lookup library for the DB1 IP-geolocation
//! binary format: given an IPv4 or IPv6 address it returns the country
//! code and name of the address range containing it.
//!
//! # Quick Start
//!
//! ```no_run
//! use ipcountry::Database;
//!
//! let db = Database::open("IP-COUNTRY.BIN")?;
//!
//! let result = db.query("8.8.8.8")?;
//! assert_eq!(result.country_code, "US");
//!
//! // v6 carrier forms of a v4 address resolve like the v4 address itself
//! let mapped = db.query("::ffff:8.8.8.8")?;
//! assert_eq!(mapped, result);
//! # Ok::<(), ipcountry::Error>(())
//! ```
//!
//! # Key Features
//!
//! - **Zero-Copy Loading**: the database file is memory-mapped at open
//! - **Lock-Free Concurrency**: every read is offset-addressed, so one
//!   handle serves concurrent queries with no shared cursor and no locks
//! - **Full Address Handling**: v4-mapped, 6to4 and Teredo v6 forms are
//!   rewritten to their embedded IPv4 address before searching
//! - **O(log n) Lookups**: indexed binary search over the sorted range
//!   tables, accelerated by the file's 16-bit bucket tables when present
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  DB1 Database File                  │
//! ├─────────────────────────────────────┤
//! │  1. Fixed header (format, offsets)  │
//! │  2. Sorted range tables (v4, v6)    │
//! │  3. Index tables (optional)         │
//! │  4. String pool (codes and names)   │
//! └─────────────────────────────────────┘
//!          ↓ mmap() at open
//!   normalize → range search → resolve
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
/// IP address normalization
pub mod addr;
/// Database handle and query API
pub mod database;
/// Error types for database operations
pub mod error;
/// Line-oriented input helpers for address lists
pub mod file_reader;

mod db1;
mod reader;

// Re-exports for consumers

pub use crate::addr::{normalize, IpValue};
pub use crate::database::{Database, LookupResult};
pub use crate::error::{Error, Result};

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
