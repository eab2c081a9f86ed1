//! `custom.openapi` section of a service file

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use sls_openapi_spec::EXT_PROP_LAMBDA;
use std::path::{Path, PathBuf};

use crate::utils;

/// OpenAPI integration settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenApiConfig {
    /// Path of the OpenAPI document, relative to the service file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,

    /// Whether request validation metadata is attached to events
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub validate: bool,

    /// Operation extension naming the bound function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl OpenApiConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(spec) = &self.spec {
            if spec.trim().is_empty() {
                return Err(anyhow!("OpenAPI spec path cannot be empty"));
            }
        }

        if let Some(extension) = &self.extension {
            if !extension.starts_with("x-") {
                return Err(anyhow!(
                    "OpenAPI extension must start with 'x-': {}",
                    extension
                ));
            }
        }
        Ok(())
    }

    /// Resolved document path, if one is configured
    pub fn spec_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.spec
            .as_deref()
            .filter(|spec| !spec.trim().is_empty())
            .map(|spec| utils::resolve_path(base_dir, spec))
    }

    /// Extension key to read bindings from
    pub fn extension_key(&self) -> &str {
        self.extension.as_deref().unwrap_or(EXT_PROP_LAMBDA)
    }
}
