//! Serverless OpenAPI integration
//!
//! Reads the OpenAPI v3 document configured under `custom.openapi` of a
//! service file, derives one API Gateway `http` event per operation bound to
//! a function through the `x-serverless-lambda` extension, and attaches the
//! events to the matching function definitions.

pub mod cli;
pub mod config;
pub mod utils;

pub use config::{FunctionDefinition, OpenApiConfig, ServiceConfig};
pub use sls_openapi_events::{
    apply_request_validation, lambda_http_events_from, make_http_event_request, EventMap,
    HttpEvent, DEFAULT_SCHEMA_KEY,
};
pub use sls_openapi_spec::{
    api_spec_from, load_document, ApiSpec, DocumentLoader, FileDocumentLoader, OpenApiDocument,
    SpecError, SpecNormalizer,
};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Host lifecycle events that trigger [`ServerlessOpenApi::apply_api_spec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// Local emulation is about to start
    OfflineStartInit,

    /// Deployment artifacts are about to be packaged
    PackageCreateDeploymentArtifacts,
}

impl Hook {
    pub const ALL: [Hook; 2] = [Hook::OfflineStartInit, Hook::PackageCreateDeploymentArtifacts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::OfflineStartInit => "before:offline:start:init",
            Hook::PackageCreateDeploymentArtifacts => "before:package:createDeploymentArtifacts",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hook {
    type Err = SlsOpenApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hook::ALL
            .iter()
            .copied()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| SlsOpenApiError::Config(format!("Unknown hook: {s}")))
    }
}

/// Non-fatal conditions reported by an apply run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyWarning {
    /// `custom.openapi.spec` is not set; nothing was applied
    MissingSpecConfiguration,

    /// Events are bound to a function the service does not define
    UnresolvedFunctionReference(String),
}

impl fmt::Display for ApplyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyWarning::MissingSpecConfiguration => write!(f, "No openapi spec specified."),
            ApplyWarning::UnresolvedFunctionReference(name) => {
                write!(f, "No such function: {name}")
            }
        }
    }
}

/// Routes attached to one function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRoutes {
    pub function: String,
    pub routes: Vec<String>,
}

/// Outcome of an apply run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Document the events were derived from
    pub spec_path: Option<PathBuf>,

    /// Functions whose events were replaced, in document order
    pub updated: Vec<FunctionRoutes>,

    pub warnings: Vec<ApplyWarning>,
}

impl ApplyReport {
    pub fn route_count(&self) -> usize {
        self.updated.iter().map(|function| function.routes.len()).sum()
    }
}

/// Applies an OpenAPI document to a service definition
pub struct ServerlessOpenApi<L = FileDocumentLoader> {
    service: ServiceConfig,
    base_dir: PathBuf,
    loader: L,
}

impl ServerlessOpenApi<FileDocumentLoader> {
    /// `base_dir` is the directory relative spec paths are resolved against
    pub fn new(service: ServiceConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self::with_loader(service, base_dir, FileDocumentLoader)
    }

    /// Load the service file at `path`
    pub fn from_service_file(path: &Path) -> anyhow::Result<Self> {
        let service = ServiceConfig::from_file(path)?;
        Ok(Self::new(service, utils::parent_dir(path)))
    }
}

impl<L: DocumentLoader> ServerlessOpenApi<L> {
    pub fn with_loader(service: ServiceConfig, base_dir: impl Into<PathBuf>, loader: L) -> Self {
        Self {
            service,
            base_dir: base_dir.into(),
            loader,
        }
    }

    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    pub fn into_service(self) -> ServiceConfig {
        self.service
    }

    /// Run the handler registered for a lifecycle hook
    pub async fn run_hook(&mut self, hook: &str) -> SlsOpenApiResult<ApplyReport> {
        let hook: Hook = hook.parse()?;
        debug!("Running hook {}", hook);
        match hook {
            Hook::OfflineStartInit | Hook::PackageCreateDeploymentArtifacts => {
                self.apply_api_spec().await
            }
        }
    }

    /// Derive the post-processed events, or `None` when no document is configured
    pub async fn derive_events(&self) -> SlsOpenApiResult<Option<(PathBuf, EventMap)>> {
        let openapi = self.service.openapi();
        let Some(spec_path) = openapi.spec_path(&self.base_dir) else {
            return Ok(None);
        };

        let document = self.loader.load(&spec_path).await?;
        let normalizer = SpecNormalizer::new(openapi.extension_key());
        let api_spec = api_spec_from(&document, &normalizer)?;
        let events = lambda_http_events_from(&api_spec);

        Ok(Some((spec_path, apply_request_validation(events, openapi.validate))))
    }

    /// Replace the events of every function bound in the configured document
    pub async fn apply_api_spec(&mut self) -> SlsOpenApiResult<ApplyReport> {
        let start_time = Instant::now();
        let mut report = ApplyReport::default();

        let Some((spec_path, events)) = self.derive_events().await? else {
            warn!("OpenAPI - WARNING: No openapi spec specified.");
            report.warnings.push(ApplyWarning::MissingSpecConfiguration);
            return Ok(report);
        };
        report.spec_path = Some(spec_path);

        for (function_name, events) in events {
            let Some(function) = self.service.functions.get_mut(&function_name) else {
                let warning = ApplyWarning::UnresolvedFunctionReference(function_name);
                warn!("OpenAPI - WARNING: {}", warning);
                report.warnings.push(warning);
                continue;
            };

            let routes: Vec<String> = events.iter().map(HttpEvent::route).collect();
            function.events = events
                .iter()
                .map(serde_yaml::to_value)
                .collect::<Result<_, _>>()?;

            info!("OpenAPI - added route to {}: {}", function_name, routes.join(","));
            report.updated.push(FunctionRoutes {
                function: function_name,
                routes,
            });
        }

        info!(
            "OpenAPI - attached {} routes to {} functions in {}",
            report.route_count(),
            report.updated.len(),
            utils::format_duration(start_time.elapsed())
        );
        Ok(report)
    }
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum SlsOpenApiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("OpenAPI document error: {0}")]
    Spec(#[from] SpecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),
}

/// Result type for the main application
pub type SlsOpenApiResult<T> = Result<T, SlsOpenApiError>;
