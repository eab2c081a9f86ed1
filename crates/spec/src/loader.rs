//! OpenAPI document loading
//!
//! Reads a JSON or YAML document, resolves local references and checks that
//! the result is a structurally valid OpenAPI v3 document.

use async_trait::async_trait;
use openapiv3::OpenAPI;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{SpecError, SpecResult};
use crate::resolver::resolve_references;

/// Serialization format of a document on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// A loaded and validated document
#[derive(Debug, Clone)]
pub enum OpenApiDocument {
    /// Document carrying the `openapi` marker. `raw` is the reference-resolved
    /// JSON the typed model was read from; schemas are taken from it as written.
    V3 { api: Box<OpenAPI>, raw: Value },

    /// Document of another OpenAPI generation (e.g. Swagger 2.0)
    Unsupported { version: String },
}

impl OpenApiDocument {
    pub fn is_v3(&self) -> bool {
        matches!(self, OpenApiDocument::V3 { .. })
    }
}

/// Source of validated documents
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, path: &Path) -> SpecResult<OpenApiDocument>;
}

/// Loads documents from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FileDocumentLoader;

#[async_trait]
impl DocumentLoader for FileDocumentLoader {
    async fn load(&self, path: &Path) -> SpecResult<OpenApiDocument> {
        load_document(path).await
    }
}

/// Load, resolve and validate the document at `path`
pub async fn load_document(path: &Path) -> SpecResult<OpenApiDocument> {
    info!("Loading OpenAPI document: {:?}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SpecError::Io {
            path: PathBuf::from(path),
            source,
        })?;

    parse_document(&content, DocumentFormat::from_path(path))
}

/// Parse, resolve and validate document content
pub fn parse_document(content: &str, format: DocumentFormat) -> SpecResult<OpenApiDocument> {
    let raw = match format {
        DocumentFormat::Json => serde_json::from_str::<Value>(content)?,
        DocumentFormat::Yaml => {
            // Going through serde_yaml::Value stringifies non-string keys such as `200:`
            let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
            serde_json::to_value(yaml)?
        }
    };

    if !raw.is_object() {
        return Err(SpecError::InvalidDocument(
            "document root must be an object".to_string(),
        ));
    }

    if raw.get("openapi").is_none() {
        return match raw.get("swagger") {
            Some(version) => Ok(OpenApiDocument::Unsupported {
                version: marker_string(version),
            }),
            None => Err(SpecError::InvalidDocument(
                "missing 'openapi' version marker".to_string(),
            )),
        };
    }

    let resolved = resolve_references(&raw)?;
    let document: OpenAPI = serde_json::from_value(resolved.clone())
        .map_err(|e| SpecError::InvalidDocument(e.to_string()))?;

    debug!(
        "Loaded OpenAPI {} document '{}' with {} paths",
        document.openapi,
        document.info.title,
        document.paths.paths.len()
    );

    Ok(OpenApiDocument::V3 {
        api: Box::new(document),
        raw: resolved,
    })
}

fn marker_string(value: &Value) -> String {
    match value {
        Value::String(version) => version.clone(),
        other => other.to_string(),
    }
}
