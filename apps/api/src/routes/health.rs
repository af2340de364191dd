use axum::Json;
use serde_json::{json, Value};

/// GET /api/health
/// Liveness probe. Does not touch the analysis pipeline.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Resume Analyzer API is running"
    }))
}
