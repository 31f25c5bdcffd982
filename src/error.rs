use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures raised while collecting packages, reading their metadata or
/// looking up license templates.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A required file, directory or license template does not exist.
    #[error("{what} not found: {path}")]
    NotFound { what: &'static str, path: PathBuf },

    /// A file or directory exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest could not be parsed.
    #[error("malformed manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        ScanError::NotFound {
            what,
            path: path.into(),
        }
    }

    /// Map an I/O error, turning `ErrorKind::NotFound` into [`ScanError::NotFound`].
    pub fn from_io(what: &'static str, path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ScanError::not_found(what, path)
        } else {
            ScanError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;
