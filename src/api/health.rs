use axum::extract::State;
use axum::Json;

use super::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the catalog is loaded; also reports where the restore flow stands.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let restore = state.session.lock().await.restore_state().status();
    Json(serde_json::json!({
        "status": "ready",
        "catalogItems": state.catalog.len(),
        "restore": restore,
    }))
}
