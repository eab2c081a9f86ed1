//! Service file configuration

pub mod openapi;
pub mod service;


pub use openapi::OpenApiConfig;
pub use service::{CustomConfig, FunctionDefinition, ServiceConfig};
