use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{parse_side, AppState};
use crate::domain::{format_value, parse_value_str, DemandTier, Side};
use crate::engine::{preferred_basis, SimilarityResult};
use crate::error::AppError;

const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarQuery {
    pub side: Option<String>,
    pub tolerance: Option<String>,
    pub baseline_demand: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarResponse {
    pub side: Side,
    pub target: String,
    pub target_formatted: String,
    pub basis: String,
    pub results: Vec<SimilarDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
    pub value: String,
    pub value_formatted: String,
    pub delta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

impl From<SimilarityResult> for SimilarDto {
    fn from(result: SimilarityResult) -> Self {
        SimilarDto {
            id: result.candidate.id.as_i64(),
            name: result.candidate.name,
            item_type: result.candidate.item_type,
            sub_name: result.candidate.sub_name,
            value: result.value.to_canonical_string(),
            value_formatted: format_value(result.value),
            delta: result.delta.to_canonical_string(),
            demand: result.demand.map(|d| d.label().to_string()),
            trend: result.trend.map(|t| t.label().to_string()),
        }
    }
}

pub async fn get_similar(
    Query(params): Query<SimilarQuery>,
    State(state): State<AppState>,
) -> Result<Json<SimilarResponse>, AppError> {
    let side = match params.side.as_deref() {
        Some("") | None => Side::Offering,
        Some(s) => parse_side(s)?,
    };

    let tolerance = match params.tolerance.as_deref() {
        Some("") | None => state.config.similarity_tolerance,
        Some(t) => parse_value_str(t)
            .ok()
            .filter(|v| !v.is_negative())
            .ok_or_else(|| AppError::BadRequest(format!("Invalid tolerance: {}", t)))?,
    };

    let baseline_demand = parse_baseline_demand(params.baseline_demand.as_deref())?;
    let limit = params.limit.map(|l| l.min(MAX_LIMIT));

    let session = state.session.lock().await;
    let target = session.totals(side).total;
    let basis = preferred_basis(
        session.store().side(side),
        side,
        session.store().basis_map(),
    );
    let results = session
        .similar_to_side(side, state.catalog.items(), tolerance, baseline_demand, limit)
        .into_iter()
        .map(SimilarDto::from)
        .collect();

    Ok(Json(SimilarResponse {
        side,
        target: target.to_canonical_string(),
        target_formatted: format_value(target),
        basis: basis.to_string(),
        results,
    }))
}

fn parse_baseline_demand(label: Option<&str>) -> Result<Option<DemandTier>, AppError> {
    match label.map(str::trim) {
        None | Some("") => Ok(None),
        Some(l) if l.eq_ignore_ascii_case("n/a") => Ok(None),
        Some(l) => DemandTier::parse(l)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown demand tier: {}", l))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_baseline_demand() {
        assert_eq!(parse_baseline_demand(None).unwrap(), None);
        assert_eq!(parse_baseline_demand(Some("N/A")).unwrap(), None);
        assert_eq!(
            parse_baseline_demand(Some("Very High")).unwrap(),
            Some(DemandTier::VeryHigh)
        );
        assert!(parse_baseline_demand(Some("legendary")).is_err());
    }
}
