use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use common::CaptchaKey;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShopQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category: String,
    pub page: Option<u32>,
}

/// Provider failures degrade to an empty list.
#[utoipa::path(
    get, path = "/api/naver/search", tag = "search",
    params(SearchQuery),
    responses((status = 200, description = "Provider items, or [] on failure"))
)]
pub async fn naver_search(
    State(state): State<ServerState>,
    Query(q): Query<SearchQuery>,
) -> Json<Vec<Value>> {
    let Some(query) = q.query.filter(|s| !s.trim().is_empty()) else {
        return Json(Vec::new());
    };
    match state.provider.search(&query).await {
        Ok(items) => Json(items),
        Err(e) => {
            warn!(err = %e, %query, "search provider failed, returning no results");
            Json(Vec::new())
        }
    }
}

#[utoipa::path(
    get, path = "/api/shop/search", tag = "search",
    params(ShopQuery),
    responses(
        (status = 200, description = "Raw provider response"),
        (status = 502, description = "Provider failed")
    )
)]
pub async fn shop_search(
    State(state): State<ServerState>,
    Query(q): Query<ShopQuery>,
) -> Result<Json<Value>, JsonApiError> {
    state
        .provider
        .brand_scoped_search(&q.query, &q.category, q.page.unwrap_or(1))
        .await
        .map(Json)
        .map_err(|e| {
            JsonApiError::new(StatusCode::BAD_GATEWAY, "Provider Error", Some(e.to_string()))
        })
}

#[utoipa::path(
    get, path = "/api/captcha/key", tag = "search",
    responses(
        (status = 200, description = "Captcha key and image URL"),
        (status = 500, description = "Captcha issue failed")
    )
)]
pub async fn captcha_key(
    State(state): State<ServerState>,
) -> Result<Json<CaptchaKey>, JsonApiError> {
    state.provider.issue_captcha().await.map(Json).map_err(|e| {
        let detail = format!("captcha issue failed: {e}");
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Captcha Error", Some(detail))
    })
}
