use axum::Json;
use serde_json::{json, Value};

/// GET / - Plain-text banner.
pub async fn banner() -> &'static str {
    "🚀 Servidor de personajes activo (MongoDB + SQL)"
}

/// GET /test - Smoke-test endpoint.
pub async fn server_check() -> Json<Value> {
    Json(json!({ "message": "Server is working" }))
}
