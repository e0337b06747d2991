//! DB1 binary format reader.
//!
//! A DB1 database is a single file holding two sorted range tables (one per
//! address family), an optional pair of index tables keyed on the top 16
//! bits of an address, and a pool of length-prefixed strings for country
//! codes and names.
//!
//! - **format**: fixed-offset header parsing, done once at open
//! - **search**: index-assisted binary search over the range tables
//!
//! Header offset fields are 1-based file positions; `format` normalizes
//! them to byte offsets so everything downstream works in plain offsets.

pub(crate) mod format;
pub(crate) mod search;

pub(crate) use format::Header;
pub(crate) use search::locate;
