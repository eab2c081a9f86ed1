//! Request validation shaping for the deployment framework

use crate::types::{EventMap, HttpEvent, HttpEventRequest};

/// Schema key the framework applies regardless of the request content type
pub const DEFAULT_SCHEMA_KEY: &str = "$default";

/// Shape request metadata of every event according to `validate`.
///
/// Without validation no event keeps a `request`. With validation, a schema
/// set holding a single media type is re-keyed to [`DEFAULT_SCHEMA_KEY`] and
/// every schema set is mirrored into the legacy `schema` field.
pub fn apply_request_validation(events: EventMap, validate: bool) -> EventMap {
    events
        .into_iter()
        .map(|(function, events)| {
            let events = events
                .into_iter()
                .map(|event| validated_event(event, validate))
                .collect();
            (function, events)
        })
        .collect()
}

fn validated_event(mut event: HttpEvent, validate: bool) -> HttpEvent {
    event.http.request = if validate {
        event.http.request.map(validated_request)
    } else {
        None
    };
    event
}

fn validated_request(mut request: HttpEventRequest) -> HttpEventRequest {
    if let Some(schemas) = request.schemas.take() {
        let schemas = if schemas.len() == 1 {
            schemas
                .into_iter()
                .map(|(_, schema)| (DEFAULT_SCHEMA_KEY.to_string(), schema))
                .collect()
        } else {
            schemas
        };
        request.schema = Some(schemas.clone());
        request.schemas = Some(schemas);
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HttpEventSpec, RequestParameters};
    use indexmap::IndexMap;
    use serde_json::{json, Map, Value};
    use sls_openapi_spec::HttpMethod;

    fn event_with(request: Option<HttpEventRequest>) -> EventMap {
        let mut events = EventMap::new();
        events.insert(
            "updateUser".to_string(),
            vec![HttpEvent {
                http: HttpEventSpec {
                    path: "/user".to_string(),
                    method: HttpMethod::Post,
                    params: Map::new(),
                    request,
                },
            }],
        );
        events
    }

    fn schemas(entries: Vec<(&str, Value)>) -> Option<IndexMap<String, Value>> {
        Some(
            entries
                .into_iter()
                .map(|(media, schema)| (media.to_string(), schema))
                .collect(),
        )
    }

    fn user_schema() -> Value {
        json!({ "type": "object", "properties": { "id": { "type": "string" } } })
    }

    #[test]
    fn test_single_media_type_becomes_default() {
        let events = event_with(Some(HttpEventRequest {
            schemas: schemas(vec![("application/json", user_schema())]),
            ..Default::default()
        }));

        let events = apply_request_validation(events, true);
        assert_eq!(
            serde_json::to_value(&events["updateUser"][0]).unwrap(),
            json!({
                "http": {
                    "path": "/user",
                    "method": "post",
                    "request": {
                        "schemas": { "$default": user_schema() },
                        "schema": { "$default": user_schema() }
                    }
                }
            })
        );
    }

    #[test]
    fn test_multiple_media_types_keep_their_keys() {
        let events = event_with(Some(HttpEventRequest {
            schemas: schemas(vec![
                ("application/json", user_schema()),
                ("text/plain", json!({ "type": "string" })),
            ]),
            ..Default::default()
        }));

        let events = apply_request_validation(events, true);
        let request = events["updateUser"][0].http.request.as_ref().unwrap();
        let keys: Vec<&str> = request
            .schemas
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["application/json", "text/plain"]);
        assert_eq!(request.schema, request.schemas);
    }

    #[test]
    fn test_parameters_only_request_is_untouched() {
        let parameters = RequestParameters {
            paths: Some(IndexMap::from([("userId".to_string(), true)])),
            ..Default::default()
        };
        let events = event_with(Some(HttpEventRequest {
            parameters: Some(parameters.clone()),
            ..Default::default()
        }));

        let events = apply_request_validation(events, true);
        let request = events["updateUser"][0].http.request.as_ref().unwrap();
        assert_eq!(request.parameters.as_ref(), Some(&parameters));
        assert!(request.schemas.is_none());
        assert!(request.schema.is_none());
    }

    #[test]
    fn test_disabled_validation_strips_request() {
        let events = event_with(Some(HttpEventRequest {
            parameters: Some(RequestParameters {
                headers: Some(IndexMap::from([("x-api-key".to_string(), true)])),
                ..Default::default()
            }),
            schemas: schemas(vec![("application/json", user_schema())]),
            schema: None,
        }));

        let events = apply_request_validation(events, false);
        assert!(events["updateUser"][0].http.request.is_none());
        assert_eq!(
            serde_json::to_value(&events["updateUser"][0]).unwrap(),
            json!({ "http": { "path": "/user", "method": "post" } })
        );
    }

    #[test]
    fn test_applying_twice_is_stable() {
        let events = event_with(Some(HttpEventRequest {
            schemas: schemas(vec![("application/json", user_schema())]),
            ..Default::default()
        }));

        let once = apply_request_validation(events, true);
        let twice = apply_request_validation(once.clone(), true);
        assert_eq!(once, twice);
    }
}
