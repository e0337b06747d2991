//! Line-oriented input with automatic gzip decompression.
//!
//! The CLI accepts address lists from files or stdin; this module opens
//! those sources uniformly. Files ending in `.gz` (case-insensitive) are
//! decompressed transparently, and the path `-` reads from stdin.
//!
//! # Example
//!
//! ```rust,no_run
//! use ipcountry::file_reader;
//! use std::io::BufRead;
//!
//! let reader = file_reader::open("addresses.txt.gz")?;
//! for line in reader.lines() {
//!     println!("{}", line?);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader};
use std::path::Path;

/// Buffer size for file reading (128KB)
const BUFFER_SIZE: usize = 128 * 1024;

/// Open an address-list source with automatic gzip detection.
///
/// Special case: path "-" reads from stdin.
///
/// # Errors
///
/// Returns an error if the file doesn't exist, permission is denied, or
/// the gzip stream is invalid (for `.gz` files).
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();

    // Special case: "-" means stdin
    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin())));
    }

    let file = File::open(path)?;

    let is_gzip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gzip {
        let decoder = GzDecoder::new(file);
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}
