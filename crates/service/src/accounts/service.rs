use std::{path::PathBuf, sync::Arc};

use common::ShopProvider;
use models::user::{NewUser, ProfileFields};
use tracing::{debug, info, instrument, warn};

use super::domain::{Account, IdAvailability, LoginInput, ProfileUpdate, RegisterInput, UserInfo};
use super::errors::AccountError;
use super::password::{hash_password, verify_password};
use super::repository::AccountRepository;
use super::upload::{profile_image_name, sanitize_filename};

/// Account service configuration
#[derive(Clone, Debug)]
pub struct AccountConfig {
    /// Prefix for profile image URLs, without trailing slash.
    pub public_base_url: String,
    pub upload_dir: PathBuf,
}

impl AccountConfig {
    pub fn image_url(&self, file_name: &str) -> String {
        format!("{}/uploads/{}", self.public_base_url, file_name)
    }
}

/// Account business service independent of web framework
pub struct AccountService<R: AccountRepository> {
    repo: Arc<R>,
    captcha: Arc<dyn ShopProvider>,
    cfg: AccountConfig,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: Arc<R>, captcha: Arc<dyn ShopProvider>, cfg: AccountConfig) -> Self {
        Self { repo, captcha, cfg }
    }

    pub fn config(&self) -> &AccountConfig {
        &self.cfg
    }

    #[instrument(skip(self))]
    pub async fn check_id_availability(&self, id: &str) -> Result<IdAvailability, AccountError> {
        if id.trim().is_empty() {
            return Err(AccountError::Validation("id is required".into()));
        }
        let taken = self.repo.find_account(id).await?.is_some();
        let message = if taken { "id is already taken" } else { "id is available" };
        Ok(IdAvailability { available: !taken, message: message.into() })
    }

    /// Register a new account with a hashed password.
    ///
    /// A non-empty `captcha_key` makes the captcha check mandatory.
    #[instrument(skip(self, input), fields(id = %input.id))]
    pub async fn register(&self, input: RegisterInput) -> Result<Account, AccountError> {
        if let Some(key) = input.captcha_key.as_deref().filter(|k| !k.trim().is_empty()) {
            let value = input.captcha_val.as_deref().unwrap_or("");
            let ok = self
                .captcha
                .verify_captcha(key, value)
                .await
                .map_err(|e| AccountError::Captcha(e.to_string()))?;
            if !ok {
                debug!("captcha rejected");
                return Err(AccountError::Validation("captcha mismatch".into()));
            }
        }
        if input.id.trim().is_empty() || input.pw.is_empty() {
            return Err(AccountError::Validation("id and pw are required".into()));
        }

        let hash = hash_password(&input.pw)?;
        let account = self
            .repo
            .create_account(NewUser {
                id: input.id,
                password_hash: hash,
                name: input.name,
                nickname: input.nickname,
                role: input.role,
                email: input.email,
                phone: input.phone,
                birthdate: input.birthdate,
            })
            .await?;
        info!(user_id = %account.id, role = %account.role, "user_registered");
        Ok(account)
    }

    /// Check credentials. Unknown ids and wrong passwords fail identically.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::repository::mock::MockAccountRepository;
    /// use service::accounts::{AccountConfig, AccountService};
    /// use service::accounts::domain::{RegisterInput, LoginInput};
    /// use common::{CaptchaKey, ProviderError, ShopProvider};
    /// use std::sync::Arc;
    ///
    /// struct NoCaptcha;
    /// #[async_trait::async_trait]
    /// impl ShopProvider for NoCaptcha {
    ///     async fn search(&self, _: &str) -> Result<Vec<serde_json::Value>, ProviderError> {
    ///         Ok(vec![])
    ///     }
    ///     async fn issue_captcha(&self) -> Result<CaptchaKey, ProviderError> {
    ///         Err(ProviderError::Status(503))
    ///     }
    ///     async fn verify_captcha(&self, _: &str, _: &str) -> Result<bool, ProviderError> {
    ///         Ok(false)
    ///     }
    ///     async fn brand_scoped_search(
    ///         &self,
    ///         _: &str,
    ///         _: &str,
    ///         _: u32,
    ///     ) -> Result<serde_json::Value, ProviderError> {
    ///         Ok(serde_json::Value::Null)
    ///     }
    /// }
    ///
    /// let cfg = AccountConfig {
    ///     public_base_url: "http://localhost:5000".into(),
    ///     upload_dir: "uploads".into(),
    /// };
    /// let repo = Arc::new(MockAccountRepository::default());
    /// let svc = AccountService::new(repo, Arc::new(NoCaptcha), cfg);
    /// let input = RegisterInput { id: "kim".into(), pw: "pa55".into(), ..Default::default() };
    /// tokio_test::block_on(svc.register(input)).unwrap();
    /// let login = LoginInput { id: "kim".into(), pw: "pa55".into() };
    /// let info = tokio_test::block_on(svc.login(login)).unwrap();
    /// assert_eq!(info.role, "STAFF");
    /// assert_eq!(info.profile_image, "");
    /// ```
    #[instrument(skip(self, input), fields(id = %input.id))]
    pub async fn login(&self, input: LoginInput) -> Result<UserInfo, AccountError> {
        let account = self
            .repo
            .find_account(&input.id)
            .await?
            .ok_or(AccountError::Unauthorized)?;
        if !verify_password(&input.pw, &account.password_hash)? {
            return Err(AccountError::Unauthorized);
        }

        let profile_image = account
            .profile_image
            .as_deref()
            .filter(|f| !f.is_empty())
            .map(|f| self.cfg.image_url(f))
            .unwrap_or_default();
        Ok(UserInfo {
            id: account.id,
            name: account.name,
            nickname: account.nickname,
            role: account.role,
            email: account.email,
            phone: account.phone,
            birthdate: account.birthdate,
            profile_image,
        })
    }

    /// Overwrite profile fields; last writer wins.
    #[instrument(skip(self, update), fields(id = %update.id))]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<(), AccountError> {
        if update.id.trim().is_empty() {
            return Err(AccountError::Validation("id is required".into()));
        }
        if let Some(pw) = update.new_password.as_deref().filter(|p| !p.is_empty()) {
            let hash = hash_password(pw)?;
            self.repo.set_password(&update.id, hash).await?;
        }
        let touched = self
            .repo
            .update_profile(
                &update.id,
                ProfileFields {
                    name: update.name,
                    nickname: update.nickname,
                    email: update.email,
                    phone: update.phone,
                    birthdate: update.birthdate,
                },
            )
            .await?;
        if !touched {
            debug!("profile update matched no user");
        }
        Ok(())
    }

    /// Store an uploaded image as `<id>_<sanitized name>` and return its public URL.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_profile_image(
        &self,
        user_id: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, AccountError> {
        if user_id.trim().is_empty() {
            return Err(AccountError::Validation("user_id is required".into()));
        }
        if sanitize_filename(user_id) != user_id {
            return Err(AccountError::Validation("user_id is not usable in a file name".into()));
        }
        let file_name = profile_image_name(user_id, original_name)
            .ok_or_else(|| AccountError::Validation("file name is empty after sanitizing".into()))?;
        if self.repo.find_account(user_id).await?.is_none() {
            return Err(AccountError::NotFound);
        }

        tokio::fs::create_dir_all(&self.cfg.upload_dir)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?;
        let path = self.cfg.upload_dir.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?;

        if !self.repo.set_profile_image(user_id, &file_name).await? {
            warn!(%user_id, "user vanished during image upload");
        }
        info!(%user_id, file = %file_name, "profile_image_saved");
        Ok(self.cfg.image_url(&file_name))
    }
}
