use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::{parse_side, selection_response, AppState, ItemRef, SelectionResponse};
use crate::domain::{IdentityKey, ItemId, Side, ValuationBasis};
use crate::error::AppError;

pub async fn get_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let session = state.session.lock().await;
    Json(selection_response(&session))
}

pub async fn add_item(
    Path(side): Path<String>,
    State(state): State<AppState>,
    Json(item): Json<ItemRef>,
) -> Result<Json<SelectionResponse>, AppError> {
    let side = parse_side(&side)?;
    let instance = item.instance(&state.catalog)?;

    let mut session = state.session.lock().await;
    session.add_item(instance, side).await?;
    Ok(Json(selection_response(&session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveQuery {
    pub id: i64,
    pub sub_name: Option<String>,
    pub all: Option<bool>,
}

pub async fn remove_item(
    Path(side): Path<String>,
    Query(params): Query<RemoveQuery>,
    State(state): State<AppState>,
) -> Result<Json<SelectionResponse>, AppError> {
    let side = parse_side(&side)?;
    let identity = IdentityKey::new(ItemId::new(params.id), params.sub_name);

    let mut session = state.session.lock().await;
    if params.all.unwrap_or(false) {
        session.remove_all(&identity, side).await?;
    } else {
        session.remove_one(&identity, side).await?;
    }
    Ok(Json(selection_response(&session)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBasisRequest {
    pub id: i64,
    pub sub_name: Option<String>,
    pub basis: ValuationBasis,
}

pub async fn set_basis(
    Path(side): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetBasisRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let side = parse_side(&side)?;
    let identity = IdentityKey::new(ItemId::new(request.id), request.sub_name);

    let mut session = state.session.lock().await;
    session.set_basis(&identity, side, request.basis).await?;
    Ok(Json(selection_response(&session)))
}

pub async fn toggle_basis(
    Path(side): Path<String>,
    State(state): State<AppState>,
    Json(item): Json<ItemRef>,
) -> Result<Json<SelectionResponse>, AppError> {
    let side = parse_side(&side)?;

    let mut session = state.session.lock().await;
    session.toggle_basis(&item.identity(), side).await?;
    Ok(Json(selection_response(&session)))
}

pub async fn swap_sides(
    State(state): State<AppState>,
) -> Result<Json<SelectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.swap_sides().await?;
    Ok(Json(selection_response(&session)))
}

#[derive(Debug, Deserialize)]
pub struct MirrorRequest {
    pub from: Side,
}

pub async fn mirror(
    State(state): State<AppState>,
    Json(request): Json<MirrorRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.mirror(request.from).await?;
    Ok(Json(selection_response(&session)))
}

pub async fn clear_side(
    Path(side): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SelectionResponse>, AppError> {
    let side = parse_side(&side)?;

    let mut session = state.session.lock().await;
    session.clear_side(side).await?;
    Ok(Json(selection_response(&session)))
}

pub async fn clear_all(
    State(state): State<AppState>,
) -> Result<Json<SelectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.clear_all().await?;
    Ok(Json(selection_response(&session)))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<SelectionResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.start_new().await?;
    Ok(Json(selection_response(&session)))
}
