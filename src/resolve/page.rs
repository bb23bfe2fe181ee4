//! resolve::page
//!
//! Deploy-artifact resolution for `page deploy`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from deploy-artifact resolution.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Directories are rejected with guidance instead of attempted.
    #[error("'{0}' is a directory; archive it first: tar cf payload.tar <dir>/ and deploy the archive")]
    IsDirectory(PathBuf),

    #[error("'{0}' is not a regular file")]
    NotAFile(PathBuf),

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read the artifact at `path` for upload.
///
/// Only regular files are deployable; the check happens before any
/// network call so a bad path never reaches the platform.
pub fn read_payload(path: &Path) -> Result<Vec<u8>, PayloadError> {
    if path.is_dir() {
        return Err(PayloadError::IsDirectory(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(PayloadError::NotAFile(path.to_path_buf()));
    }
    std::fs::read(path).map_err(|source| PayloadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
