pub mod accounts;
pub mod catalog;
pub mod orders;
pub mod search;
pub mod slots;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{errors::JsonApiError, openapi::ApiDoc, state::ServerState};

/// Profile images larger than this are rejected before reaching the handler.
pub const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "OK", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Integer body field that may arrive as a number or a numeric string.
pub(crate) fn int_field(v: &Option<Value>, name: &str) -> Result<i64, JsonApiError> {
    service::orders::ingest::coerce_int(v)
        .ok_or_else(|| JsonApiError::bad_request(format!("{name} is required")))
}

/// Build the full application router: API routes, uploaded files and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let uploads = ServeDir::new(state.accounts.config().upload_dir.clone());

    let account_routes = Router::new()
        .route("/api/check_id", get(accounts::check_id))
        .route("/api/register", post(accounts::register))
        .route("/api/login", post(accounts::login))
        .route("/api/user/update", post(accounts::update_profile))
        .route(
            "/api/user/upload_image",
            post(accounts::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        );

    let catalog_routes = Router::new()
        .route("/api/products", get(catalog::list))
        .route("/api/product/add", post(catalog::add))
        .route("/api/product/update_stock", post(catalog::update_stock))
        .route("/api/product/delete", post(catalog::delete));

    let order_routes = Router::new()
        .route("/api/orders", get(orders::list))
        .route("/api/order/my_list", get(orders::my_list))
        .route("/api/order/add", post(orders::add))
        .route("/api/order/update_status", post(orders::update_status))
        .route("/api/order/delete", post(orders::delete))
        .route("/api/payment/complete", post(orders::complete_payment))
        .route("/api/process_order", post(orders::process_order))
        .route("/api/get_orders", get(orders::recent));

    let slot_routes = Router::new()
        .route("/api/slots", get(slots::list))
        .route("/api/slots/save", post(slots::save))
        .route("/api/slots/delete", post(slots::delete));

    let search_routes = Router::new()
        .route("/api/naver/search", get(search::naver_search))
        .route("/api/shop/search", get(search::shop_search))
        .route("/api/captcha/key", get(search::captcha_key));

    Router::new()
        .route("/health", get(health))
        .merge(account_routes)
        .merge(catalog_routes)
        .merge(order_routes)
        .merge(slot_routes)
        .merge(search_routes)
        .nest_service("/uploads", uploads)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
