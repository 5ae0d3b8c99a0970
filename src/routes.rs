use axum::{
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Value};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // The translate handler owns method dispatch: authentication has to
        // run before method validation, so every verb lands on it.
        .route("/api/translate", any(handlers::handle_translate))
        // Health check
        .route("/api/health", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
