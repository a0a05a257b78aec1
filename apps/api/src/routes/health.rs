use axum::Json;
use serde_json::{json, Value};

/// GET /health, GET /vxh
/// Liveness check with a fixed body.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
