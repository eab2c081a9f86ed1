//! Request validation metadata for a single operation

use indexmap::IndexMap;
use serde_json::Value;
use sls_openapi_spec::{HttpMethod, ParameterLocation, ParameterSpec, PathSpec, RequestBodySpec};

use crate::types::{HttpEventRequest, RequestParameters};

/// Build the request descriptor for `method` under `item`.
///
/// Operation-level parameters, when any are declared, replace the path-level
/// list instead of being merged with it. Returns `None` when the operation
/// contributes neither parameters nor body schemas.
pub fn make_http_event_request(item: &PathSpec, method: HttpMethod) -> Option<HttpEventRequest> {
    let operation = item.operation(method);

    let operation_parameters = operation
        .and_then(|operation| operation.parameters.as_deref())
        .filter(|parameters| !parameters.is_empty());
    let parameters = operation_parameters
        .or(item.parameters.as_deref())
        .map(request_parameters)
        .filter(|parameters| !parameters.is_empty());

    let schemas = operation
        .and_then(|operation| operation.request_body.as_ref())
        .map(request_schemas)
        .filter(|schemas| !schemas.is_empty());

    if parameters.is_none() && schemas.is_none() {
        return None;
    }

    Some(HttpEventRequest {
        parameters,
        schemas,
        schema: None,
    })
}

fn request_parameters(parameters: &[ParameterSpec]) -> RequestParameters {
    let mut querystrings = IndexMap::new();
    let mut headers = IndexMap::new();
    let mut paths = IndexMap::new();

    for parameter in parameters {
        let bucket = match parameter.location {
            ParameterLocation::Query => &mut querystrings,
            ParameterLocation::Header => &mut headers,
            ParameterLocation::Path => &mut paths,
            ParameterLocation::Cookie => continue,
        };
        bucket.insert(parameter.name.clone(), parameter.required);
    }

    RequestParameters {
        querystrings: non_empty(querystrings),
        headers: non_empty(headers),
        paths: non_empty(paths),
    }
}

fn request_schemas(body: &RequestBodySpec) -> IndexMap<String, Value> {
    body.content
        .iter()
        .filter_map(|(media, entry)| {
            entry
                .schema
                .as_ref()
                .map(|schema| (media.clone(), schema.clone()))
        })
        .collect()
}

fn non_empty<K, V>(map: IndexMap<K, V>) -> Option<IndexMap<K, V>> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}
