//! Error types for kilt.

use std::fmt;
use std::io;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for editor operations.
///
/// Only unrecoverable conditions are represented here. Malformed escape
/// sequences, out-of-range edit positions and search misses are absorbed
/// where they happen and never reach this type.
#[derive(Debug)]
pub enum Error {
    /// I/O error from the terminal, the byte source or the output sink.
    Io(io::Error),
    /// The window size could not be determined by ioctl or cursor report.
    WindowSize,
    /// A configuration value from the command line or environment is invalid.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::WindowSize => write!(f, "unable to determine terminal window size"),
            Self::InvalidConfig(s) => write!(f, "invalid configuration: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfig("tab stop must be positive".to_string());
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("tab stop"));

        let err = Error::WindowSize;
        assert!(err.to_string().contains("window size"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
