//! HTTP event derivation from a normalized API specification
//!
//! [`lambda_http_events_from`] walks an [`ApiSpec`](sls_openapi_spec::ApiSpec)
//! and groups one gateway HTTP event per bound operation under the name of
//! its function. [`apply_request_validation`] then shapes the request
//! validation metadata for the deployment framework.

pub mod aggregator;
pub mod request;
pub mod types;
pub mod validation;

pub use aggregator::lambda_http_events_from;
pub use request::make_http_event_request;
pub use types::{EventMap, HttpEvent, HttpEventRequest, HttpEventSpec, RequestParameters};
pub use validation::{apply_request_validation, DEFAULT_SCHEMA_KEY};
