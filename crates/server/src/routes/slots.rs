use axum::{extract::State, Json};
use common::types::ActionResult;
use serde::Deserialize;
use service::slots::{self, SlotInput};

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlotId {
    pub slot_id: String,
}

#[utoipa::path(
    get, path = "/api/slots", tag = "slots",
    responses((status = 200, description = "All slots"))
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::slot::Model>>, JsonApiError> {
    Ok(Json(slots::list_slots(&state.db).await?))
}

#[utoipa::path(
    post, path = "/api/slots/save", tag = "slots",
    request_body = crate::openapi::SlotRequest,
    responses(
        (status = 200, description = "Saved"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn save(
    State(state): State<ServerState>,
    Json(input): Json<SlotInput>,
) -> Result<Json<ActionResult>, JsonApiError> {
    slots::save_slot(&state.db, input).await?;
    Ok(Json(ActionResult::ok()))
}

#[utoipa::path(
    post, path = "/api/slots/delete", tag = "slots",
    responses((status = 200, description = "Deleted or already absent"))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Json(input): Json<SlotId>,
) -> Result<Json<ActionResult>, JsonApiError> {
    slots::delete_slot(&state.db, &input.slot_id).await?;
    Ok(Json(ActionResult::ok()))
}
