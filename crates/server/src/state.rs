use std::sync::Arc;

use common::ShopProvider;
use sea_orm::DatabaseConnection;
use service::accounts::{repo::SeaOrmAccountRepository, AccountConfig, AccountService};
use service::orders::OrderLog;

pub type Accounts = AccountService<SeaOrmAccountRepository>;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub accounts: Arc<Accounts>,
    pub provider: Arc<dyn ShopProvider>,
    pub order_log: Arc<OrderLog>,
    /// Entries returned by `/api/get_orders`.
    pub recent_limit: usize,
}

impl ServerState {
    pub fn new(
        db: DatabaseConnection,
        provider: Arc<dyn ShopProvider>,
        accounts_cfg: AccountConfig,
        log_capacity: usize,
        recent_limit: usize,
    ) -> Self {
        let repo = Arc::new(SeaOrmAccountRepository::new(db.clone()));
        let accounts = Arc::new(AccountService::new(repo, Arc::clone(&provider), accounts_cfg));
        Self {
            db,
            accounts,
            provider,
            order_log: Arc::new(OrderLog::new(log_capacity)),
            recent_limit,
        }
    }
}
