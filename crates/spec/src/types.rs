//! Normalized API specification model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// HTTP methods an operation can be declared under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// Every method, in the order path items are walked
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .iter()
            .copied()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown HTTP method: {s}"))
    }
}

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// A path-level or operation-level parameter declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub required: bool,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, location: ParameterLocation, required: bool) -> Self {
        Self {
            name: name.into(),
            location,
            required,
        }
    }
}

/// One media type entry of a request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaTypeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Request body declared by an operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBodySpec {
    /// Media type -> schema-bearing entry, in declaration order
    pub content: IndexMap<String, MediaTypeSpec>,

    #[serde(default)]
    pub required: bool,
}

/// Binding of an operation to a backend function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaSpec {
    /// Target function name
    pub name: String,

    /// Remaining extension keys, passed through to the event verbatim
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// A single operation under a path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<LambdaSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterSpec>>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodySpec>,
}

impl OperationSpec {
    /// The binding, if it names a function
    pub fn bound_lambda(&self) -> Option<&LambdaSpec> {
        self.lambda.as_ref().filter(|lambda| !lambda.name.is_empty())
    }
}

/// A path item: shared parameters plus per-method operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterSpec>>,

    #[serde(flatten)]
    pub operations: IndexMap<HttpMethod, OperationSpec>,
}

impl PathSpec {
    pub fn operation(&self, method: HttpMethod) -> Option<&OperationSpec> {
        self.operations.get(&method)
    }
}

/// Normalized API specification keyed by path template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiSpec {
    paths: IndexMap<String, PathSpec>,
}

impl ApiSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path item, replacing any previous item for the same path
    pub fn insert(&mut self, path: impl Into<String>, item: PathSpec) {
        self.paths.insert(path.into(), item);
    }

    pub fn get(&self, path: &str) -> Option<&PathSpec> {
        self.paths.get(path)
    }

    /// Paths in document order
    pub fn paths(&self) -> impl Iterator<Item = (&str, &PathSpec)> {
        self.paths.iter().map(|(path, item)| (path.as_str(), item))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of operations bound to a function
    pub fn bound_operation_count(&self) -> usize {
        self.paths
            .values()
            .flat_map(|item| item.operations.values())
            .filter(|operation| operation.bound_lambda().is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_round_trip_names() {
        for method in HttpMethod::ALL {
            assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), method);
        }
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!("trace".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_bound_lambda_requires_name() {
        let operation = OperationSpec {
            lambda: Some(LambdaSpec {
                name: String::new(),
                params: Map::new(),
            }),
            ..Default::default()
        };
        assert!(operation.bound_lambda().is_none());
    }

    #[test]
    fn test_api_spec_keeps_insertion_order() {
        let mut spec = ApiSpec::new();
        spec.insert("/b", PathSpec::default());
        spec.insert("/a", PathSpec::default());

        let paths: Vec<&str> = spec.paths().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["/b", "/a"]);
    }

    #[test]
    fn test_path_spec_serializes_methods_inline() {
        let mut item = PathSpec::default();
        item.operations.insert(HttpMethod::Get, OperationSpec::default());

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, serde_json::json!({ "get": {} }));
    }
}
