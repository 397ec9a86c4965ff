// File: src/error.rs
// Purpose: Errors returned by Mapper::map

use thiserror::Error;

/// Failure of a `map` / `map_with_options` call
///
/// Shape mismatches between domain and form are not errors; they are skipped.
#[derive(Debug, Error)]
pub enum MapError {
    /// The top-level domain or form is absent or not a record
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A registered override (or per-path converter) failed
    #[error("custom mapper for field {path} failed: {source}")]
    OverrideFailed {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

impl MapError {
    /// Field path the failure is attributed to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            MapError::InvalidArgument(_) => None,
            MapError::OverrideFailed { path, .. } => Some(path),
        }
    }
}

pub type Result<T, E = MapError> = std::result::Result<T, E>;
