//! Gateway HTTP event descriptors

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sls_openapi_spec::HttpMethod;

/// Function name -> events bound to it, in declaration order
pub type EventMap = IndexMap<String, Vec<HttpEvent>>;

/// A single `http` event attached to a function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpEvent {
    pub http: HttpEventSpec,
}

impl HttpEvent {
    /// `"<method> <path>"`, as shown in route listings
    pub fn route(&self) -> String {
        format!("{} {}", self.http.method, self.http.path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpEventSpec {
    pub path: String,

    pub method: HttpMethod,

    /// Extension parameters, serialized alongside `path` and `method`
    #[serde(flatten)]
    pub params: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<HttpEventRequest>,
}

/// Request validation metadata of an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<RequestParameters>,

    /// Media type (or `$default`) -> body schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<IndexMap<String, Value>>,

    /// Mirror of `schemas` for older consumers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<IndexMap<String, Value>>,
}

/// Required-flags of request parameters, bucketed by transport location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub querystrings: Option<IndexMap<String, bool>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, bool>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<IndexMap<String, bool>>,
}

impl RequestParameters {
    pub fn is_empty(&self) -> bool {
        self.querystrings.is_none() && self.headers.is_none() && self.paths.is_none()
    }
}
