use serde::{Deserialize, Serialize};

/// Registration payload. Every profile field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub id: String,
    pub pw: String,
    pub name: String,
    pub nickname: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub birthdate: String,
    pub captcha_key: Option<String>,
    pub captcha_val: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub id: String,
    pub pw: String,
}

/// Profile overwrite; `new_password` is applied only when non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub phone: String,
    pub birthdate: String,
    pub new_password: Option<String>,
}

/// Stored account (business view, includes the hash).
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub password_hash: String,
    pub name: String,
    pub nickname: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub birthdate: String,
    pub profile_image: Option<String>,
}

/// Profile returned by a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub birthdate: String,
    /// Absolute URL, or empty when no image was uploaded.
    pub profile_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdAvailability {
    pub available: bool,
    pub message: String,
}
