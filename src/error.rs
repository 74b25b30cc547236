//! Global error handling for ctxcat
//!
//! This module provides a centralized error type for every fatal condition
//! a run can hit. Non-fatal conditions (unreadable classification samples,
//! clipboard delivery) are absorbed where they happen and never reach it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for ctxcat operations
#[derive(Error, Debug)]
pub enum CtxError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Bad or missing flag value, unknown flag, invalid size format
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// A selected file could not be read during concatenation
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized Result type for ctxcat operations
pub type Result<T> = std::result::Result<T, CtxError>;

/// Creates a CtxError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CtxError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_positive(n: i64) -> Result<i64> {
        ensure!(n > 0, InvalidArgument, "expected a positive number, got {}", n);
        Ok(n)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_positive(3).unwrap(), 3);
        let err = check_positive(-1).unwrap_err();
        assert!(matches!(err, CtxError::InvalidArgument(_)));
        assert_eq!(
            err.to_string(),
            "Invalid argument: expected a positive number, got -1"
        );
    }

    #[test]
    fn test_file_read_message() {
        let err = CtxError::FileRead {
            path: PathBuf::from("/tmp/gone.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to read /tmp/gone.txt: missing");
    }
}
