//! Liveness endpoint.

use axum::Json;
use serde_json::json;

/// GET /health
///
/// Returns 200 while the process is serving requests. Does not touch the
/// database; use it for load-balancer liveness checks.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
