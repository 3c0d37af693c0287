//! Error types for catalog and settings loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog error types
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not valid JSON
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file is not valid TOML
    #[error("Invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// JSON parsed but has the wrong structure
    #[error("Unexpected catalog shape: {0}")]
    Shape(String),
}

impl CatalogError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the underlying file simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
