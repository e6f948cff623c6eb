use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::{selection_response, AppState, SelectionResponse};
use crate::error::AppError;
use crate::persistence::RestoreStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResponse {
    pub status: RestoreStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offering_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requesting_count: Option<usize>,
}

pub async fn get_restore(State(state): State<AppState>) -> Json<RestoreResponse> {
    let session = state.session.lock().await;
    let restore = session.restore_state();
    let offered = restore.offered();

    Json(RestoreResponse {
        status: restore.status(),
        offering_count: offered.map(|s| s.offering.len()),
        requesting_count: offered.map(|s| s.requesting.len()),
    })
}

pub async fn confirm(State(state): State<AppState>) -> Result<Json<SelectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.confirm_restore()?;
    Ok(Json(selection_response(&session)))
}

pub async fn decline(State(state): State<AppState>) -> Result<Json<SelectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.decline_restore().await?;
    Ok(Json(selection_response(&session)))
}
