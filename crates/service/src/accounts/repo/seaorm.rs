use models::user::{self, NewUser, ProfileFields};
use sea_orm::DatabaseConnection;

use crate::accounts::domain::Account;
use crate::accounts::errors::AccountError;
use crate::accounts::repository::AccountRepository;

#[derive(Clone)]
pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_account(u: user::Model) -> Account {
    Account {
        id: u.id,
        password_hash: u.password,
        name: u.name,
        nickname: u.nickname,
        role: u.role,
        email: u.email,
        phone: u.phone,
        birthdate: u.birthdate,
        profile_image: u.profile_image,
    }
}

#[async_trait::async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find_account(&self, id: &str) -> Result<Option<Account>, AccountError> {
        let found = user::find(&self.db, id).await?;
        Ok(found.map(to_account))
    }

    async fn create_account(&self, new: NewUser) -> Result<Account, AccountError> {
        let created = user::create(&self.db, new).await?;
        Ok(to_account(created))
    }

    async fn update_profile(&self, id: &str, fields: ProfileFields) -> Result<bool, AccountError> {
        Ok(user::update_profile(&self.db, id, fields).await? > 0)
    }

    async fn set_password(&self, id: &str, password_hash: String) -> Result<bool, AccountError> {
        Ok(user::set_password(&self.db, id, password_hash).await? > 0)
    }

    async fn set_profile_image(&self, id: &str, file_name: &str) -> Result<bool, AccountError> {
        Ok(user::set_profile_image(&self.db, id, file_name).await? > 0)
    }
}
