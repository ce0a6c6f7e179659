use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use common::types::ActionResult;
use serde::{Deserialize, Serialize};
use service::accounts::domain::{
    IdAvailability, LoginInput, ProfileUpdate, RegisterInput, UserInfo,
};
use tracing::info;

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckIdQuery {
    pub id: Option<String>,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub success: bool,
    pub message: String,
    #[serde(rename = "userInfo")]
    pub user_info: UserInfo,
}

#[derive(Serialize)]
pub struct UploadOutput {
    pub success: bool,
    pub url: String,
}

#[utoipa::path(
    get, path = "/api/check_id", tag = "accounts",
    params(CheckIdQuery),
    responses(
        (status = 200, description = "Availability"),
        (status = 400, description = "Missing id")
    )
)]
pub async fn check_id(
    State(state): State<ServerState>,
    Query(q): Query<CheckIdQuery>,
) -> Result<Json<IdAvailability>, JsonApiError> {
    let id = q.id.unwrap_or_default();
    Ok(Json(state.accounts.check_id_availability(&id).await?))
}

#[utoipa::path(
    post, path = "/api/register", tag = "accounts",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<ActionResult>), JsonApiError> {
    state.accounts.register(input).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::with_message("registered"))))
}

#[utoipa::path(
    post, path = "/api/login", tag = "accounts",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginOutput>, JsonApiError> {
    let user_info = state.accounts.login(input).await?;
    info!(user_id = %user_info.id, "login");
    Ok(Json(LoginOutput { success: true, message: "login ok".into(), user_info }))
}

#[utoipa::path(
    post, path = "/api/user/update", tag = "accounts",
    request_body = crate::openapi::ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn update_profile(
    State(state): State<ServerState>,
    Json(input): Json<ProfileUpdate>,
) -> Result<Json<ActionResult>, JsonApiError> {
    state.accounts.update_profile(input).await?;
    Ok(Json(ActionResult::with_message("updated")))
}

/// Multipart form with a `file` part and a `user_id` text part.
#[utoipa::path(
    post, path = "/api/user/upload_image", tag = "accounts",
    responses(
        (status = 200, description = "Stored"),
        (status = 400, description = "Missing file or user_id"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn upload_image(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<Json<UploadOutput>, JsonApiError> {
    let mut user_id: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(bad_part)?
    {
        match field.name() {
            Some("user_id") => {
                let text = field.text().await.map_err(bad_part)?;
                user_id = Some(text);
            }
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_part)?;
                file = Some((name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(user_id), Some((name, bytes))) = (user_id, file) else {
        return Err(JsonApiError::bad_request("file and user_id are required"));
    };
    let url = state.accounts.upload_profile_image(&user_id, &name, &bytes).await?;
    Ok(Json(UploadOutput { success: true, url }))
}

fn bad_part(e: axum::extract::multipart::MultipartError) -> JsonApiError {
    JsonApiError::bad_request(e.to_string())
}
