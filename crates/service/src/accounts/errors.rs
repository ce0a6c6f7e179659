use thiserror::Error;

/// Business errors for account workflows
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user already exists")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("invalid id or password")]
    Unauthorized,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("captcha service error: {0}")]
    Captcha(String),
    #[error("file storage error: {0}")]
    Storage(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AccountError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AccountError::Validation(_) => 1001,
            AccountError::Conflict => 1002,
            AccountError::NotFound => 1003,
            AccountError::Unauthorized => 1004,
            AccountError::HashError(_) => 1101,
            AccountError::Captcha(_) => 1102,
            AccountError::Storage(_) => 1103,
            AccountError::Repository(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for AccountError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Validation(m) => AccountError::Validation(m),
            ModelError::Conflict(_) => AccountError::Conflict,
            ModelError::Db(m) => AccountError::Repository(m),
        }
    }
}
