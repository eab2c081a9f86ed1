//! Error types for document loading and normalization

use std::path::PathBuf;

/// Errors raised while loading an OpenAPI document
#[derive(thiserror::Error, Debug)]
pub enum SpecError {
    #[error("Failed to read OpenAPI document {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid OpenAPI document: {0}")]
    InvalidDocument(String),

    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    #[error("Unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

/// Result type for document operations
pub type SpecResult<T> = Result<T, SpecError>;
