use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{selection_response, AppState, ItemRef, SelectionResponse};
use crate::domain::Side;
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStartResponse {
    pub active: String,
}

pub async fn drag_start(
    State(state): State<AppState>,
    Json(item): Json<ItemRef>,
) -> Result<Json<DragStartResponse>, AppError> {
    let instance = item.instance(&state.catalog)?;
    let active = instance.identity().to_string();

    state.session.lock().await.drag_start(instance);
    Ok(Json(DragStartResponse { active }))
}

#[derive(Debug, Deserialize)]
pub struct DragEndRequest {
    pub zone: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEndResponse {
    pub landed_on: Option<Side>,
    pub selection: SelectionResponse,
}

pub async fn drag_end(
    State(state): State<AppState>,
    Json(request): Json<DragEndRequest>,
) -> Result<Json<DragEndResponse>, AppError> {
    let mut session = state.session.lock().await;
    let landed_on = session.drag_end(request.zone.as_deref()).await?;
    Ok(Json(DragEndResponse {
        landed_on,
        selection: selection_response(&session),
    }))
}
