use async_trait::async_trait;
use models::user::{NewUser, ProfileFields};

use super::domain::Account;
use super::errors::AccountError;

/// Repository abstraction for account persistence.
///
/// Update methods return whether a row was touched.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_account(&self, id: &str) -> Result<Option<Account>, AccountError>;
    /// Fails with `AccountError::Conflict` when the id is taken.
    async fn create_account(&self, new: NewUser) -> Result<Account, AccountError>;
    async fn update_profile(&self, id: &str, fields: ProfileFields) -> Result<bool, AccountError>;
    async fn set_password(&self, id: &str, password_hash: String) -> Result<bool, AccountError>;
    async fn set_profile_image(&self, id: &str, file_name: &str) -> Result<bool, AccountError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccountRepository {
        accounts: Mutex<HashMap<String, Account>>,
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find_account(&self, id: &str) -> Result<Option<Account>, AccountError> {
            let accounts = self.accounts.lock().unwrap();
            Ok(accounts.get(id).cloned())
        }

        async fn create_account(&self, new: NewUser) -> Result<Account, AccountError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(&new.id) {
                return Err(AccountError::Conflict);
            }
            let role = models::user::Role::parse(&new.role)?;
            let account = Account {
                id: new.id.clone(),
                password_hash: new.password_hash,
                name: new.name,
                nickname: new.nickname,
                role: role.as_str().to_string(),
                email: new.email,
                phone: new.phone,
                birthdate: new.birthdate,
                profile_image: None,
            };
            accounts.insert(new.id, account.clone());
            Ok(account)
        }

        async fn update_profile(
            &self,
            id: &str,
            fields: ProfileFields,
        ) -> Result<bool, AccountError> {
            let mut accounts = self.accounts.lock().unwrap();
            Ok(match accounts.get_mut(id) {
                Some(a) => {
                    a.name = fields.name;
                    a.nickname = fields.nickname;
                    a.email = fields.email;
                    a.phone = fields.phone;
                    a.birthdate = fields.birthdate;
                    true
                }
                None => false,
            })
        }

        async fn set_password(
            &self,
            id: &str,
            password_hash: String,
        ) -> Result<bool, AccountError> {
            let mut accounts = self.accounts.lock().unwrap();
            Ok(accounts.get_mut(id).map(|a| a.password_hash = password_hash).is_some())
        }

        async fn set_profile_image(&self, id: &str, file_name: &str) -> Result<bool, AccountError> {
            let mut accounts = self.accounts.lock().unwrap();
            let found = accounts.get_mut(id).map(|a| a.profile_image = Some(file_name.to_string()));
            Ok(found.is_some())
        }
    }
}
