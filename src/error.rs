/// Error types for the ipcountry library
use std::fmt;

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for database operations
#[derive(Debug)]
pub enum Error {
    /// Query text does not parse as any IP address form
    InvalidAddress(String),

    /// Database header declares a format this engine does not read
    UnsupportedFormat(u8),

    /// Binary search exhausted without a range containing the address
    NoResults,

    /// I/O errors (open failures, reads past the end of the file)
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidAddress(addr) => write!(f, "Invalid IP address: {}", addr),
            Error::UnsupportedFormat(found) => write!(
                f,
                "Unsupported database format: expected 1, found {}",
                found
            ),
            Error::NoResults => write!(f, "No results found"),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
