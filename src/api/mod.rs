pub mod drag;
pub mod health;
pub mod restore;
pub mod selection;
pub mod similar;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::domain::{format_value, IdentityKey, ItemId, ItemInstance, Side};
use crate::engine::{value_of, BucketTotal, GroupedEntry};
use crate::error::AppError;
use crate::orchestration::CalculatorSession;
use axum::{
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<CalculatorSession>>,
    pub catalog: Arc<Catalog>,
    pub config: Config,
}

impl AppState {
    pub fn new(session: CalculatorSession, catalog: Catalog, config: Config) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            catalog: Arc::new(catalog),
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/selection", get(selection::get_selection))
        .route(
            "/v1/selection/:side/items",
            post(selection::add_item).delete(selection::remove_item),
        )
        .route("/v1/selection/:side/basis", put(selection::set_basis))
        .route(
            "/v1/selection/:side/basis/toggle",
            post(selection::toggle_basis),
        )
        .route("/v1/selection/:side/clear", post(selection::clear_side))
        .route("/v1/selection/swap", post(selection::swap_sides))
        .route("/v1/selection/mirror", post(selection::mirror))
        .route("/v1/selection/clear", post(selection::clear_all))
        .route("/v1/selection/reset", post(selection::reset))
        .route("/v1/restore", get(restore::get_restore))
        .route("/v1/restore/confirm", post(restore::confirm))
        .route("/v1/restore/decline", post(restore::decline))
        .route("/v1/similar", get(similar::get_similar))
        .route("/v1/drag/start", post(drag::drag_start))
        .route("/v1/drag/end", post(drag::drag_end))
        .layer(cors)
        .with_state(state)
}

/// Reference to a catalog item, optionally one of its variants.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub id: i64,
    pub sub_name: Option<String>,
}

impl ItemRef {
    pub fn identity(&self) -> IdentityKey {
        IdentityKey::new(ItemId::new(self.id), self.sub_name.clone())
    }

    fn instance(&self, catalog: &Catalog) -> Result<ItemInstance, AppError> {
        catalog
            .instance(ItemId::new(self.id), self.sub_name.as_deref())
            .ok_or_else(|| AppError::NotFound(format!("item {}", self.identity())))
    }
}

fn parse_side(side: &str) -> Result<Side, AppError> {
    side.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid side: {}", side)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub offering: SideView,
    pub requesting: SideView,
    pub difference: String,
    pub difference_formatted: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideView {
    pub items: Vec<GroupedDto>,
    pub count: usize,
    pub total: String,
    pub total_formatted: String,
    pub clean: BucketDto,
    pub duped: BucketDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedDto {
    pub key: String,
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
    pub count: usize,
    pub basis: String,
    pub unit_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDto {
    pub count: usize,
    pub sum: String,
}

impl From<BucketTotal> for BucketDto {
    fn from(bucket: BucketTotal) -> Self {
        BucketDto {
            count: bucket.count,
            sum: bucket.sum.to_canonical_string(),
        }
    }
}

fn side_view(session: &CalculatorSession, side: Side) -> SideView {
    let totals = session.totals(side);
    let items = session
        .grouped(side)
        .into_iter()
        .map(|entry| grouped_dto(session, side, entry))
        .collect();

    SideView {
        items,
        count: totals.instance_count(),
        total: totals.total.to_canonical_string(),
        total_formatted: format_value(totals.total),
        clean: totals.breakdown.clean.into(),
        duped: totals.breakdown.duped.into(),
    }
}

fn grouped_dto(session: &CalculatorSession, side: Side, entry: GroupedEntry) -> GroupedDto {
    let identity = entry.identity();
    let basis = session.store().basis_for(side, &identity);
    let unit_value = value_of(&entry.item, basis);
    let item = entry.item;

    GroupedDto {
        key: identity.to_string(),
        id: item.id.as_i64(),
        name: item.name,
        item_type: item.item_type,
        sub_name: item.sub_name,
        count: entry.count,
        basis: basis.to_string(),
        unit_value: unit_value.to_canonical_string(),
        demand: item.demand,
        trend: item.trend,
    }
}

pub(crate) fn selection_response(session: &CalculatorSession) -> SelectionResponse {
    let comparison = session.comparison();
    SelectionResponse {
        offering: side_view(session, Side::Offering),
        requesting: side_view(session, Side::Requesting),
        difference: comparison.difference.to_canonical_string(),
        difference_formatted: format_value(comparison.difference),
    }
}
