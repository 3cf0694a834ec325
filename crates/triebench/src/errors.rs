use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while averaging benchmark results
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Malformed value {token:?} in {file} at line {line}")]
    ParseError {
        file: String,
        line: usize,
        token: String,
    },

    #[error("Column count mismatch in {file} at line {line}: expected {expected}, found {found}")]
    ArityMismatch {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type for averaging operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Utility functions for working with BenchError
pub mod util {
    use super::*;
    use std::path::Path;

    /// Check if a file exists, returning a FileNotFound error if it doesn't
    pub fn ensure_file_exists<P: AsRef<Path>>(path: P) -> BenchResult<()> {
        let path_ref = path.as_ref();
        if !path_ref.is_file() {
            return Err(BenchError::FileNotFound(path_ref.to_path_buf()));
        }
        Ok(())
    }

    /// Check if a directory exists, returning a FileNotFound error if it doesn't
    pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> BenchResult<()> {
        let path_ref = path.as_ref();
        if !path_ref.is_dir() {
            return Err(BenchError::FileNotFound(path_ref.to_path_buf()));
        }
        Ok(())
    }

    /// Convert a generic error to a BenchError
    pub fn to_bench_error<E: fmt::Display>(e: E, context: &str) -> BenchError {
        BenchError::Other(format!("{}: {}", context, e))
    }
}
