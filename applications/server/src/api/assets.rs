/// Asset API routes
use crate::{
    api::{ApiResult, LimitQuery},
    error::Endpoint,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use warden_core::Asset;

/// GET /api/assets?limit=
pub async fn list_assets(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<(StatusCode, Json<Vec<Asset>>)> {
    let assets = app_state
        .assets
        .list_assets(query.limit())
        .await
        .map_err(|e| e.at(Endpoint::ListAssets))?;

    Ok((StatusCode::CREATED, Json(assets)))
}
