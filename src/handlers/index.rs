use axum::Json;
use serde_json::{Value, json};

/// Landing endpoint.
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the online exam platform backend!" }))
}
