use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::account::{AccountService, SeaOrmAccountRepository};

/// Context built once at startup and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService<SeaOrmAccountRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmAccountRepository::new(db));
        Self { accounts: Arc::new(AccountService::new(repo)) }
    }
}
