use axum::{extract::State, Json};
use common::types::ActionResult;
use serde::Deserialize;
use serde_json::Value;
use service::catalog::{self, NewProduct};
use tracing::info;

use crate::{errors::JsonApiError, routes::int_field, state::ServerState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StockUpdate {
    pub item_code: String,
    pub new_stock: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemCode {
    pub item_code: String,
}

#[utoipa::path(
    get, path = "/api/products", tag = "catalog",
    responses((status = 200, description = "All products"))
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::product::Model>>, JsonApiError> {
    Ok(Json(catalog::list_products(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/product/add", tag = "catalog",
    request_body = crate::openapi::NewProductRequest,
    responses(
        (status = 200, description = "Added"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Duplicate item code")
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    Json(input): Json<NewProduct>,
) -> Result<Json<ActionResult>, JsonApiError> {
    catalog::add_product(&state.db, input).await?;
    Ok(Json(ActionResult::ok()))
}

#[utoipa::path(
    post, path = "/api/product/update_stock", tag = "catalog",
    request_body = crate::openapi::StockUpdateRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn update_stock(
    State(state): State<ServerState>,
    Json(input): Json<StockUpdate>,
) -> Result<Json<ActionResult>, JsonApiError> {
    let stock = int_field(&input.new_stock, "new_stock")?;
    let stock = i32::try_from(stock)
        .map_err(|_| JsonApiError::bad_request("new_stock out of range"))?;
    catalog::update_stock(&state.db, &input.item_code, stock).await?;
    info!(item_code = %input.item_code, stock, "stock_updated");
    Ok(Json(ActionResult::ok()))
}

#[utoipa::path(
    post, path = "/api/product/delete", tag = "catalog",
    request_body = crate::openapi::ItemCodeRequest,
    responses((status = 200, description = "Deleted or already absent"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Json(input): Json<ItemCode>,
) -> Result<Json<ActionResult>, JsonApiError> {
    if catalog::delete_product(&state.db, &input.item_code).await? {
        info!(item_code = %input.item_code, "product_deleted");
    }
    Ok(Json(ActionResult::ok()))
}
