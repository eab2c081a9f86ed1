//! Grouping of HTTP events by bound function

use serde_json::Map;
use sls_openapi_spec::{ApiSpec, HttpMethod};
use tracing::{debug, warn};

use crate::request::make_http_event_request;
use crate::types::{EventMap, HttpEvent, HttpEventSpec};

/// Event keys owned by the descriptor itself
const RESERVED_KEYS: [&str; 3] = ["path", "method", "request"];

/// Collect one HTTP event per bound operation, keyed by function name.
///
/// Functions appear in the order they are first bound; each function's
/// events follow path order, then method order.
pub fn lambda_http_events_from(api: &ApiSpec) -> EventMap {
    let mut events = EventMap::new();

    for (path, item) in api.paths() {
        for method in HttpMethod::ALL {
            let Some(lambda) = item
                .operation(method)
                .and_then(|operation| operation.bound_lambda())
            else {
                continue;
            };

            let mut params = Map::with_capacity(lambda.params.len());
            for (key, value) in &lambda.params {
                if RESERVED_KEYS.contains(&key.as_str()) {
                    warn!(
                        "Ignoring extension parameter '{}' on {} {}: reserved event key",
                        key, method, path
                    );
                    continue;
                }
                params.insert(key.clone(), value.clone());
            }

            let event = HttpEvent {
                http: HttpEventSpec {
                    path: path.to_string(),
                    method,
                    params,
                    request: make_http_event_request(item, method),
                },
            };

            debug!("Bound {} to function {}", event.route(), lambda.name);
            events.entry(lambda.name.clone()).or_default().push(event);
        }
    }

    events
}
