use serde_json::json;
use serverless_openapi::{
    api_spec_from, apply_request_validation, lambda_http_events_from, load_document, HttpEvent,
    SpecNormalizer,
};
use sls_openapi_spec::{HttpMethod, ParameterLocation, ParameterSpec};
use std::path::Path;

const TEST_API: &str = "test-data/v3/test-api.yaml";

#[tokio::test]
async fn test_api_spec_from_v3_document() {
    let document = load_document(Path::new(TEST_API)).await.unwrap();
    let spec = api_spec_from(&document, &SpecNormalizer::default()).unwrap();

    let paths: Vec<&str> = spec.paths().map(|(path, _)| path).collect();
    assert_eq!(paths, vec!["/users/{userId}", "/user", "/health"]);
    assert_eq!(spec.bound_operation_count(), 3);

    let user = spec.get("/users/{userId}").unwrap();
    assert_eq!(
        user.parameters,
        Some(vec![ParameterSpec::new("userId", ParameterLocation::Path, true)])
    );

    let get = user.operation(HttpMethod::Get).unwrap();
    let lambda = get.lambda.as_ref().unwrap();
    assert_eq!(lambda.name, "getUser");
    assert_eq!(lambda.params.get("authorizer"), Some(&json!("aws_iam")));
    assert!(get.parameters.is_none());
    assert!(get.request_body.is_none());

    let post = spec
        .get("/user")
        .and_then(|item| item.operation(HttpMethod::Post))
        .unwrap();
    let body = post.request_body.as_ref().unwrap();
    assert!(!body.required);
    let schema = body.content["application/json"].schema.as_ref().unwrap();
    assert_eq!(
        schema["required"],
        json!(["firstName", "lastName", "email", "dateOfBirth"])
    );
    assert_eq!(schema["properties"]["dateOfBirth"]["format"], json!("date"));

    let body_schema = |method: HttpMethod| {
        spec.get("/users/{userId}")
            .and_then(|item| item.operation(method))
            .and_then(|operation| operation.request_body.as_ref())
            .and_then(|body| body.content["application/json"].schema.clone())
    };
    assert_eq!(
        body_schema(HttpMethod::Patch),
        Some(json!({
            "title": "User",
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "firstName": { "type": "string" }
            },
            "required": ["id"]
        }))
    );
    assert_eq!(
        *schema,
        json!({
            "type": "object",
            "properties": {
                "firstName": { "type": "string" },
                "lastName": { "type": "string" },
                "email": { "type": "string" },
                "dateOfBirth": { "type": "string", "format": "date" }
            },
            "required": ["firstName", "lastName", "email", "dateOfBirth"]
        })
    );
}

#[tokio::test]
async fn test_events_without_validation() {
    let document = load_document(Path::new(TEST_API)).await.unwrap();
    let spec = api_spec_from(&document, &SpecNormalizer::default()).unwrap();
    let events = apply_request_validation(lambda_http_events_from(&spec), false);

    assert_eq!(
        serde_json::to_value(&events).unwrap(),
        json!({
            "getUser": [
                { "http": { "path": "/users/{userId}", "method": "get", "authorizer": "aws_iam" } }
            ],
            "updateUser": [
                { "http": { "path": "/users/{userId}", "method": "patch" } }
            ],
            "createUser": [
                { "http": { "path": "/user", "method": "post" } }
            ]
        })
    );
}

#[tokio::test]
async fn test_events_with_validation() {
    let document = load_document(Path::new(TEST_API)).await.unwrap();
    let spec = api_spec_from(&document, &SpecNormalizer::default()).unwrap();
    let events = apply_request_validation(lambda_http_events_from(&spec), true);

    let functions: Vec<&str> = events.keys().map(String::as_str).collect();
    assert_eq!(functions, vec!["getUser", "updateUser", "createUser"]);

    let get_user = serde_json::to_value(&events["getUser"][0]).unwrap();
    assert_eq!(
        get_user,
        json!({
            "http": {
                "path": "/users/{userId}",
                "method": "get",
                "authorizer": "aws_iam",
                "request": { "parameters": { "paths": { "userId": true } } }
            }
        })
    );

    // Operation-level parameters replace the path-level userId
    let update_user = serde_json::to_value(&events["updateUser"][0]).unwrap();
    let request = &update_user["http"]["request"];
    assert_eq!(
        request["parameters"],
        json!({ "headers": { "X-Request-Id": false } })
    );
    let media: Vec<&String> = request["schemas"].as_object().unwrap().keys().collect();
    assert_eq!(media, vec!["application/json", "text/plain"]);
    assert_eq!(request["schema"], request["schemas"]);
    assert_eq!(request["schemas"]["application/json"]["title"], json!("User"));

    let create_user = serde_json::to_value(&events["createUser"][0]).unwrap();
    let request = &create_user["http"]["request"];
    assert!(request.get("parameters").is_none());
    let schemas = request["schemas"].as_object().unwrap();
    assert_eq!(schemas.len(), 1);
    assert_eq!(schemas["$default"]["type"], json!("object"));
    assert_eq!(request["schema"], request["schemas"]);
}

#[tokio::test]
async fn test_routes_follow_declaration_order() {
    let document = load_document(Path::new(TEST_API)).await.unwrap();
    let spec = api_spec_from(&document, &SpecNormalizer::default()).unwrap();
    let events = lambda_http_events_from(&spec);

    let routes: Vec<String> = events
        .values()
        .flat_map(|events| events.iter().map(HttpEvent::route))
        .collect();
    assert_eq!(
        routes,
        vec!["get /users/{userId}", "patch /users/{userId}", "post /user"]
    );
}
