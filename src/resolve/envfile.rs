//! resolve::envfile
//!
//! Env-file import: `KEY=value` lines into an ordered set of pairs.
//!
//! Keys are unique; a later duplicate overwrites the earlier value but
//! keeps the first-seen position, so the platform receives one update
//! per key in file order.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from env-file parsing.
#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("failed to read env file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

/// Parse an env file into ordered, deduplicated pairs.
pub fn load(path: &Path) -> Result<Vec<(String, String)>, EnvFileError> {
    let iter = dotenvy::from_path_iter(path).map_err(|source| EnvFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    for item in iter {
        let (key, value) = item.map_err(|source| EnvFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => pairs.push((key, value)),
        }
    }
    Ok(pairs)
}
