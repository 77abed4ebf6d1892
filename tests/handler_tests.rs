use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use feedback_store::api::handler::{Operation, Resource, dispatch, function_handler, resolve_route};
use feedback_store::api::AppState;
use feedback_store::store::InMemoryStore;
use lambda_runtime::{Context, LambdaEvent};
use serde_json::{Value, json};

fn state() -> AppState<InMemoryStore> {
    AppState::new(InMemoryStore::new("feedback"), InMemoryStore::new("app-info"))
}

fn event(method: &str, path: &str, body: Option<Value>) -> Value {
    let mut event = json!({ "httpMethod": method, "path": path });
    if let Some(body) = body {
        event["body"] = json!(body.to_string());
    }
    event
}

/// Status code and decoded body of a response envelope.
fn unpack(response: &Value) -> (u64, Value) {
    let status = response["statusCode"].as_u64().unwrap();
    let body = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
    (status, body)
}

#[test]
fn test_route_table() {
    let route = resolve_route("POST", "/feedback").unwrap();
    assert_eq!((route.resource, route.operation), (Resource::Feedback, Operation::Create));

    let route = resolve_route("GET", "/prod/app-info/ext-id-1").unwrap();
    assert_eq!((route.resource, route.operation), (Resource::AppInfo, Operation::Get));
    assert_eq!(route.path_id.as_deref(), Some("ext-id-1"));

    let route = resolve_route("PATCH", "/feedback/abc/").unwrap();
    assert_eq!(route.operation, Operation::Update);

    assert!(resolve_route("DELETE", "/feedback").is_none());
    assert!(resolve_route("GET", "/unknown/abc").is_none());
    assert!(resolve_route("GET", "/").is_none());
    assert!(resolve_route("GET", "/appInfo").is_none());
    assert!(resolve_route("GET", "/appinfo/abc").is_none());
}

#[tokio::test]
async fn test_feedback_lifecycle_through_router() {
    let state = state();

    let response = dispatch(
        &state,
        &event(
            "POST",
            "/feedback",
            Some(json!({"rating": 3, "selectedOptions": ["slow"], "customMessages": {"en": "too slow"}})),
        ),
    )
    .await;
    let (status, body) = unpack(&response);
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Successfully added feedback.");
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["selectedOptions"], json!(["slow"]));
    assert!(body["data"]["createdAt"].is_string());

    let (status, body) = unpack(&dispatch(&state, &event("GET", &format!("/feedback/{id}"), None)).await);
    assert_eq!(status, 200);
    assert_eq!(body["customMessages"], json!({"en": "too slow"}));

    let (status, body) = unpack(
        &dispatch(&state, &event("PUT", &format!("/feedback/{id}"), Some(json!({"rating": 4})))).await,
    );
    assert_eq!(status, 200);
    assert_eq!(body["data"]["rating"], 4);
    assert_eq!(body["data"]["selectedOptions"], json!(["slow"]));
    assert!(body["data"]["updatedAt"].is_string());

    let (status, body) = unpack(&dispatch(&state, &event("GET", "/feedback", None)).await);
    assert_eq!(status, 200);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) = unpack(&dispatch(&state, &event("DELETE", &format!("/feedback/{id}"), None)).await);
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "id": id }));

    let (status, body) = unpack(&dispatch(&state, &event("GET", &format!("/feedback/{id}"), None)).await);
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Post not found"}));
}

#[tokio::test]
async fn test_float_rating_update_keeps_record_readable() {
    let state = state();
    let (_, body) = unpack(&dispatch(&state, &event("POST", "/feedback", Some(json!({"rating": 2})))).await);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = unpack(
        &dispatch(&state, &event("PUT", &format!("/feedback/{id}"), Some(json!({"rating": 4.0})))).await,
    );
    assert_eq!(status, 200);
    assert_eq!(body["data"]["rating"], 4);

    let (status, body) = unpack(&dispatch(&state, &event("GET", &format!("/feedback/{id}"), None)).await);
    assert_eq!(status, 200);
    assert_eq!(body["rating"], 4);
}

#[tokio::test]
async fn test_feedback_error_envelopes() {
    let state = state();

    let (status, body) = unpack(&dispatch(&state, &event("POST", "/feedback", Some(json!({"rating": 6})))).await);
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Rating must be a number between 1 and 5."}));

    let (status, body) = unpack(
        &dispatch(&state, &event("PUT", "/feedback/unknown-id", Some(json!({"rating": 4})))).await,
    );
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Post not found."}));

    let (status, body) = unpack(&dispatch(&state, &event("DELETE", "/feedback/never-existed", None)).await);
    assert_eq!(status, 200);
    assert_eq!(body, json!({"id": "never-existed"}));
}

#[tokio::test]
async fn test_path_parameters_take_precedence() {
    let state = state();
    let created = state.feedback.create(&json!({"rating": 2})).await.unwrap();

    let mut request = event("GET", "/feedback/ignored", None);
    request["pathParameters"] = json!({ "id": created.id });

    let (status, body) = unpack(&dispatch(&state, &request).await);
    assert_eq!(status, 200);
    assert_eq!(body["id"], json!(created.id));
}

#[tokio::test]
async fn test_base64_body_is_decoded() {
    let state = state();
    let raw = json!({"rating": 5}).to_string();
    let request = json!({
        "requestContext": { "http": { "method": "POST" } },
        "rawPath": "/feedback",
        "isBase64Encoded": true,
        "body": STANDARD.encode(raw),
    });

    let (status, body) = unpack(&dispatch(&state, &request).await);
    assert_eq!(status, 201);
    assert_eq!(body["data"]["rating"], 5);
}

#[tokio::test]
async fn test_app_info_lifecycle_through_router() {
    let state = state();
    let payload = json!({
        "name": "reader",
        "title": "Reader Mode",
        "description": "Strips clutter",
        "locale": "en",
        "pre_message": "Why are you leaving?",
        "pre_action": "open_survey"
    });

    let (status, body) = unpack(&dispatch(&state, &event("POST", "/app-info", Some(payload))).await);
    assert_eq!(status, 201);
    assert_eq!(body["message"], "AppInfo created successfully");
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("ext-id-"));

    let (status, body) = unpack(
        &dispatch(&state, &event("PUT", &format!("/app-info/{id}"), Some(json!({"title": "Reader"})))).await,
    );
    assert_eq!(status, 200);
    assert_eq!(body["title"], "Reader");
    assert_eq!(body["name"], "reader");

    let (status, body) = unpack(&dispatch(&state, &event("GET", "/app-info", None)).await);
    assert_eq!(status, 200);
    assert_eq!(body[0]["id"], json!(id));

    let (status, body) = unpack(&dispatch(&state, &event("DELETE", &format!("/app-info/{id}"), None)).await);
    assert_eq!(status, 200);
    assert_eq!(body, json!({"message": "AppInfo deleted successfully"}));

    let (status, body) = unpack(&dispatch(&state, &event("GET", &format!("/app-info/{id}"), None)).await);
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "AppInfo not found"}));
}

#[tokio::test]
async fn test_app_info_error_envelopes() {
    let state = state();

    let (status, body) = unpack(&dispatch(&state, &event("POST", "/app-info", Some(json!({"name": "x"})))).await);
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "Missing required fields"}));

    let (status, body) = unpack(&dispatch(&state, &event("PATCH", "/app-info/ext-id-x", Some(json!({})))).await);
    assert_eq!(status, 400);
    assert_eq!(body, json!({"error": "No valid fields to update"}));

    let (status, _) = unpack(
        &dispatch(&state, &event("PATCH", "/app-info/ext-id-x", Some(json!({"title": "t"})))).await,
    );
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_unknown_route_and_missing_method() {
    let state = state();

    let (status, body) = unpack(&dispatch(&state, &event("GET", "/nothing-here", None)).await);
    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Route not found"}));

    let (status, _) = unpack(&dispatch(&state, &json!({"path": "/feedback"})).await);
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_function_handler_wraps_dispatch() {
    let state = state();
    let lambda_event = LambdaEvent::new(event("GET", "/feedback", None), Context::default());

    let response = function_handler(&state, lambda_event).await.unwrap();
    let (status, body) = unpack(&response);
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
    assert_eq!(response["headers"]["Content-Type"], "application/json");
}
