use axum::{
    extract::{Query, State},
    Json,
};
use common::types::ActionResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::orders::{self, CartItem, IngestSource, NewOrderInput, OrderLogEntry};
use tracing::info;

use crate::{errors::JsonApiError, routes::int_field, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyListQuery {
    /// Matched against the order contact field.
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusUpdate {
    pub id: Option<Value>,
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderId {
    pub id: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentRequest {
    pub user_id: Option<String>,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FactoryRequest {
    pub user_id: Option<String>,
    pub orders: Vec<CartItem>,
}

#[derive(Serialize)]
pub struct FactoryOutput {
    pub status: &'static str,
    pub message: String,
    pub command: String,
}

#[derive(Serialize)]
pub struct RecentOrders {
    pub status: &'static str,
    pub total_count: u64,
    pub latest_orders: Vec<OrderLogEntry>,
}

fn order_id(v: &Option<Value>) -> Result<i32, JsonApiError> {
    let id = int_field(v, "id")?;
    i32::try_from(id).map_err(|_| JsonApiError::bad_request("id out of range"))
}

#[utoipa::path(
    get, path = "/api/orders", tag = "orders",
    responses((status = 200, description = "All orders, newest first"))
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::order::Model>>, JsonApiError> {
    Ok(Json(orders::list_all_orders(&state.db).await?))
}

#[utoipa::path(
    get, path = "/api/order/my_list", tag = "orders",
    params(MyListQuery),
    responses((status = 200, description = "Orders for one contact, newest first"))
)]
pub async fn my_list(
    State(state): State<ServerState>,
    Query(q): Query<MyListQuery>,
) -> Result<Json<Vec<models::order::Model>>, JsonApiError> {
    let rows = orders::list_orders_by_contact(&state.db, q.user_id.as_deref()).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/order/add", tag = "orders",
    request_body = crate::openapi::NewOrderRequest,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    Json(input): Json<NewOrderInput>,
) -> Result<Json<ActionResult>, JsonApiError> {
    orders::add_order(&state.db, input).await?;
    Ok(Json(ActionResult::ok()))
}

#[utoipa::path(
    post, path = "/api/payment/complete", tag = "orders",
    request_body = crate::openapi::CartRequest,
    responses(
        (status = 200, description = "Orders recorded"),
        (status = 400, description = "Empty cart"),
        (status = 500, description = "Nothing recorded")
    )
)]
pub async fn complete_payment(
    State(state): State<ServerState>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<ActionResult>, JsonApiError> {
    let out = orders::ingest_cart_orders(
        &state.db,
        &state.order_log,
        req.user_id.as_deref(),
        &req.items,
        IngestSource::Payment,
    )
    .await?;
    info!(rows = out.orders.len(), "payment_recorded");
    Ok(Json(ActionResult::with_message("order complete")))
}

#[utoipa::path(
    post, path = "/api/order/update_status", tag = "orders",
    request_body = crate::openapi::StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn update_status(
    State(state): State<ServerState>,
    Json(input): Json<StatusUpdate>,
) -> Result<Json<ActionResult>, JsonApiError> {
    let id = order_id(&input.id)?;
    orders::update_order_status(&state.db, id, &input.status).await?;
    Ok(Json(ActionResult::ok()))
}

#[utoipa::path(
    post, path = "/api/order/delete", tag = "orders",
    responses((status = 200, description = "Deleted or already absent"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Json(input): Json<OrderId>,
) -> Result<Json<ActionResult>, JsonApiError> {
    let id = order_id(&input.id)?;
    orders::delete_order(&state.db, id).await?;
    Ok(Json(ActionResult::with_message("deleted")))
}

#[utoipa::path(
    post, path = "/api/process_order", tag = "factory",
    request_body = crate::openapi::FactoryRequestDoc,
    responses(
        (status = 200, description = "Accepted"),
        (status = 400, description = "Empty order list")
    )
)]
pub async fn process_order(
    State(state): State<ServerState>,
    Json(req): Json<FactoryRequest>,
) -> Result<Json<FactoryOutput>, JsonApiError> {
    let out = orders::ingest_cart_orders(
        &state.db,
        &state.order_log,
        req.user_id.as_deref(),
        &req.orders,
        IngestSource::Factory,
    )
    .await?;
    Ok(Json(FactoryOutput {
        status: "success",
        message: format!("{} order(s) accepted", out.orders.len()),
        command: out.command,
    }))
}

#[utoipa::path(
    get, path = "/api/get_orders", tag = "factory",
    responses((status = 200, description = "Recent cart submissions"))
)]
pub async fn recent(State(state): State<ServerState>) -> Json<RecentOrders> {
    Json(RecentOrders {
        status: "success",
        total_count: state.order_log.total_count().await,
        latest_orders: state.order_log.recent(state.recent_limit).await,
    })
}
