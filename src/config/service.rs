//! Service file (functions and custom settings)

use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::OpenApiConfig;

/// A serverless service definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// Top-level keys this tool does not interpret (provider, plugins, ...)
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,

    #[serde(default, skip_serializing_if = "CustomConfig::is_empty")]
    pub custom: CustomConfig,

    /// Function definitions, keyed by function name
    #[serde(default)]
    pub functions: IndexMap<String, FunctionDefinition>,
}

/// The `custom` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi: Option<OpenApiConfig>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl CustomConfig {
    pub fn is_empty(&self) -> bool {
        self.openapi.is_none() && self.extra.is_empty()
    }
}

/// A function of the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    #[serde(default)]
    pub events: Vec<serde_yaml::Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FunctionDefinition {
    pub fn new(handler: impl Into<String>) -> Self {
        Self {
            handler: Some(handler.into()),
            ..Default::default()
        }
    }
}

impl ServiceConfig {
    /// Load a service file; `.json` files are read as JSON, anything else as YAML
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read service file {:?}: {}", path, e))?;
        let config: ServiceConfig = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Write the service file back, in the format implied by its extension
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            self.to_yaml()?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self.functions.keys().find(|name| name.trim().is_empty()) {
            return Err(anyhow!("Function name cannot be empty: {:?}", name));
        }

        if let Some(openapi) = &self.custom.openapi {
            openapi.validate()?;
        }

        Ok(())
    }

    /// OpenAPI settings, defaulted when the section is absent
    pub fn openapi(&self) -> OpenApiConfig {
        self.custom.openapi.clone().unwrap_or_default()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
