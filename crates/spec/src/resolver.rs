//! Local `$ref` resolution over a raw document tree

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{SpecError, SpecResult};

/// Return a copy of `document` with every local `$ref` replaced by its target.
///
/// References that would recurse into themselves are left in place at the
/// point where the cycle closes.
pub fn resolve_references(document: &Value) -> SpecResult<Value> {
    let mut stack = Vec::new();
    resolve_value(document, document, &mut stack)
}

fn resolve_value(value: &Value, root: &Value, stack: &mut Vec<String>) -> SpecResult<Value> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                if stack.iter().any(|seen| seen == reference) {
                    debug!("Leaving circular reference unresolved: {}", reference);
                    return Ok(value.clone());
                }

                let target = lookup(root, reference)?;
                stack.push(reference.clone());
                let resolved = resolve_value(target, root, stack);
                stack.pop();
                return resolved;
            }

            let mut resolved = Map::with_capacity(map.len());
            for (key, child) in map {
                resolved.insert(key.clone(), resolve_value(child, root, stack)?);
            }
            Ok(Value::Object(resolved))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_value(item, root, stack))
            .collect::<SpecResult<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

fn lookup<'a>(root: &'a Value, reference: &str) -> SpecResult<&'a Value> {
    let fragment = reference.strip_prefix('#').ok_or_else(|| {
        SpecError::UnresolvedReference(format!("external reference not supported: {reference}"))
    })?;

    let pointer = percent_decode_str(fragment).decode_utf8_lossy();
    root.pointer(&pointer)
        .ok_or_else(|| SpecError::UnresolvedReference(reference.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolves_nested_references() {
        let document = json!({
            "paths": {
                "/users/{userId}": {
                    "parameters": [{ "$ref": "#/components/parameters/UserId" }]
                }
            },
            "components": {
                "parameters": {
                    "UserId": {
                        "name": "userId",
                        "in": "path",
                        "required": true,
                        "schema": { "$ref": "#/components/schemas/Id" }
                    }
                },
                "schemas": { "Id": { "type": "integer" } }
            }
        });

        let resolved = resolve_references(&document).unwrap();
        assert_eq!(
            resolved["paths"]["/users/{userId}"]["parameters"][0],
            json!({
                "name": "userId",
                "in": "path",
                "required": true,
                "schema": { "type": "integer" }
            })
        );
    }

    #[test]
    fn test_decodes_pointer_escapes() {
        let document = json!({
            "components": { "schemas": { "a/b": { "type": "string" }, "c d": { "type": "integer" } } },
            "x": { "$ref": "#/components/schemas/a~1b" },
            "y": { "$ref": "#/components/schemas/c%20d" }
        });

        let resolved = resolve_references(&document).unwrap();
        assert_eq!(resolved["x"], json!({ "type": "string" }));
        assert_eq!(resolved["y"], json!({ "type": "integer" }));
    }

    #[test]
    fn test_circular_reference_is_left_in_place() {
        let document = json!({
            "components": {
                "schemas": {
                    "Node": {
                        "type": "object",
                        "properties": { "next": { "$ref": "#/components/schemas/Node" } }
                    }
                }
            },
            "root": { "$ref": "#/components/schemas/Node" }
        });

        let resolved = resolve_references(&document).unwrap();
        assert_eq!(
            resolved["root"]["properties"]["next"],
            json!({ "$ref": "#/components/schemas/Node" })
        );
    }

    #[test]
    fn test_dangling_reference_is_an_error() {
        let document = json!({ "x": { "$ref": "#/components/schemas/Missing" } });
        let err = resolve_references(&document).unwrap_err();
        assert!(matches!(err, SpecError::UnresolvedReference(_)));
    }

    #[test]
    fn test_external_reference_is_an_error() {
        let document = json!({ "x": { "$ref": "other.yaml#/components/schemas/User" } });
        let err = resolve_references(&document).unwrap_err();
        assert!(err.to_string().contains("external reference"));
    }

    #[test]
    fn test_property_named_ref_is_not_a_reference() {
        let document = json!({ "properties": { "$ref": { "type": "string" } } });
        let resolved = resolve_references(&document).unwrap();
        assert_eq!(resolved, document);
    }
}
