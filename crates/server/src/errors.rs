use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{accounts::errors::AccountError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// Error body shared by every endpoint: `{"success": false, "message": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = self.status.as_u16(),
                title = self.title,
                detail = ?self.detail,
                "request failed"
            );
        }
        let message = self.detail.unwrap_or_else(|| self.title.to_string());
        let body = serde_json::json!({"success": false, "error": self.title, "message": message});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(m))
            }
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, "Conflict", Some(m)),
            ServiceError::Db(m) | ServiceError::Internal(m) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", Some(m))
            }
        }
    }
}

impl From<AccountError> for JsonApiError {
    fn from(e: AccountError) -> Self {
        let status = match e {
            AccountError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountError::Conflict => StatusCode::CONFLICT,
            AccountError::NotFound => StatusCode::NOT_FOUND,
            AccountError::Unauthorized => StatusCode::UNAUTHORIZED,
            AccountError::HashError(_)
            | AccountError::Captcha(_)
            | AccountError::Storage(_)
            | AccountError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let title = match status {
            StatusCode::BAD_REQUEST => "Validation Error",
            StatusCode::CONFLICT => "Conflict",
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::UNAUTHORIZED => "Unauthorized",
            _ => "Internal Error",
        };
        if status.is_server_error() {
            error!(code = e.code(), err = %e, "account operation failed");
        }
        Self::new(status, title, Some(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServiceError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn login_failure_is_401() {
        let e = JsonApiError::from(AccountError::Unauthorized);
        assert_eq!(e.status, StatusCode::UNAUTHORIZED);
        assert_eq!(e.detail.as_deref(), Some("invalid id or password"));
    }
}
