//! Conversion of OpenAPI v3 documents into the normalized [`ApiSpec`]

use indexmap::IndexMap;
use openapiv3::{OpenAPI, Operation, Parameter, PathItem, ReferenceOr, RequestBody};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{SpecError, SpecResult};
use crate::loader::OpenApiDocument;
use crate::types::{
    ApiSpec, HttpMethod, LambdaSpec, MediaTypeSpec, OperationSpec, ParameterLocation,
    ParameterSpec, PathSpec, RequestBodySpec,
};

/// Operation extension naming the backend function
pub const EXT_PROP_LAMBDA: &str = "x-serverless-lambda";

/// Key of the extension object holding the function name
const FUNCTION_KEY: &str = "function";

/// Builds an [`ApiSpec`] from a v3 document
#[derive(Debug, Clone)]
pub struct SpecNormalizer {
    extension_key: String,
}

impl Default for SpecNormalizer {
    fn default() -> Self {
        Self::new(EXT_PROP_LAMBDA)
    }
}

impl SpecNormalizer {
    pub fn new(extension_key: impl Into<String>) -> Self {
        Self {
            extension_key: extension_key.into(),
        }
    }

    /// Normalize every defined path item of the document, in document order.
    ///
    /// `raw` is the resolved JSON `api` was read from. Body schemas are copied
    /// from it so keywords the typed model does not know survive unchanged.
    pub fn normalize(&self, api: &OpenAPI, raw: &Value) -> SpecResult<ApiSpec> {
        let mut spec = ApiSpec::new();

        for (path, item) in &api.paths.paths {
            let item = match item {
                ReferenceOr::Item(item) => item,
                ReferenceOr::Reference { reference } => {
                    debug!("Skipping unresolved path item {}: {}", path, reference);
                    continue;
                }
            };

            let raw_item = raw.get("paths").and_then(|paths| paths.get(path));
            spec.insert(path.clone(), self.path_spec(path, item, raw_item));
        }

        info!(
            "Normalized {} paths, {} operations bound to functions",
            spec.len(),
            spec.bound_operation_count()
        );
        Ok(spec)
    }

    fn path_spec(&self, path: &str, item: &PathItem, raw_item: Option<&Value>) -> PathSpec {
        let mut path_spec = PathSpec {
            parameters: parameters(&item.parameters),
            operations: IndexMap::new(),
        };

        for method in HttpMethod::ALL {
            let Some(operation) = operation_for(item, method) else {
                continue;
            };

            let raw_body = raw_item
                .and_then(|item| item.get(method.as_str()))
                .and_then(|operation| operation.get("requestBody"));
            let operation_spec = OperationSpec {
                lambda: self.lambda_spec(path, method, operation),
                parameters: parameters(&operation.parameters),
                request_body: request_body(operation.request_body.as_ref(), raw_body),
            };
            path_spec.operations.insert(method, operation_spec);
        }

        path_spec
    }

    fn lambda_spec(&self, path: &str, method: HttpMethod, operation: &Operation) -> Option<LambdaSpec> {
        let extension = operation.extensions.get(&self.extension_key)?;

        let Value::Object(fields) = extension else {
            warn!(
                "Ignoring {} on {} {}: expected an object",
                self.extension_key, method, path
            );
            return None;
        };

        let name = match fields.get(FUNCTION_KEY) {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => {
                warn!(
                    "Ignoring {} on {} {}: '{}' must be a non-empty string",
                    self.extension_key, method, path, FUNCTION_KEY
                );
                return None;
            }
        };

        let params: Map<String, Value> = fields
            .iter()
            .filter(|(key, _)| key.as_str() != FUNCTION_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(LambdaSpec { name, params })
    }
}

/// Normalize a loaded document, treating other OpenAPI generations as empty
pub fn api_spec_from(document: &OpenApiDocument, normalizer: &SpecNormalizer) -> SpecResult<ApiSpec> {
    match try_api_spec_from(document, normalizer) {
        Err(SpecError::UnsupportedVersion(version)) => {
            warn!("OpenAPI {} documents are not supported, no routes derived", version);
            Ok(ApiSpec::new())
        }
        other => other,
    }
}

/// Normalize a loaded document, rejecting anything but v3
pub fn try_api_spec_from(
    document: &OpenApiDocument,
    normalizer: &SpecNormalizer,
) -> SpecResult<ApiSpec> {
    match document {
        OpenApiDocument::V3 { api, raw } => normalizer.normalize(api, raw),
        OpenApiDocument::Unsupported { version } => {
            Err(SpecError::UnsupportedVersion(version.clone()))
        }
    }
}

fn operation_for(item: &PathItem, method: HttpMethod) -> Option<&Operation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Options => item.options.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
    }
}

/// Inline parameters only; references left after resolution carry no name
fn parameters(parameters: &[ReferenceOr<Parameter>]) -> Option<Vec<ParameterSpec>> {
    if parameters.is_empty() {
        return None;
    }

    let specs = parameters
        .iter()
        .filter_map(|parameter| match parameter {
            ReferenceOr::Item(parameter) => Some(parameter_spec(parameter)),
            ReferenceOr::Reference { reference } => {
                debug!("Skipping unresolved parameter: {}", reference);
                None
            }
        })
        .collect();

    Some(specs)
}

fn parameter_spec(parameter: &Parameter) -> ParameterSpec {
    let (data, location) = match parameter {
        Parameter::Query { parameter_data, .. } => (parameter_data, ParameterLocation::Query),
        Parameter::Header { parameter_data, .. } => (parameter_data, ParameterLocation::Header),
        Parameter::Path { parameter_data, .. } => (parameter_data, ParameterLocation::Path),
        Parameter::Cookie { parameter_data, .. } => (parameter_data, ParameterLocation::Cookie),
    };

    ParameterSpec::new(data.name.clone(), location, data.required)
}

fn request_body(
    body: Option<&ReferenceOr<RequestBody>>,
    raw_body: Option<&Value>,
) -> Option<RequestBodySpec> {
    let body = match body {
        Some(ReferenceOr::Item(body)) => body,
        Some(ReferenceOr::Reference { reference }) => {
            debug!("Skipping unresolved request body: {}", reference);
            return None;
        }
        None => return None,
    };

    let raw_content = raw_body.and_then(|body| body.get("content"));
    let content = body
        .content
        .keys()
        .map(|media| {
            let schema = raw_content
                .and_then(|content| content.get(media))
                .and_then(|media_type| media_type.get("schema"))
                .cloned();
            (media.clone(), MediaTypeSpec { schema })
        })
        .collect();

    Some(RequestBodySpec {
        content,
        required: body.required,
    })
}
