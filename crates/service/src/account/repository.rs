use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::account::{self, AccountFields};
use crate::errors::ServiceError;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<account::Model>, ServiceError>;
    async fn create(&self, fields: AccountFields) -> Result<account::Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<account::Model>, ServiceError>;
    async fn update(&self, id: i32, fields: AccountFields) -> Result<account::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn list(&self) -> Result<Vec<account::Model>, ServiceError> {
        Ok(account::all(&self.db).await?)
    }

    async fn create(&self, fields: AccountFields) -> Result<account::Model, ServiceError> {
        Ok(account::create(&self.db, fields).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<account::Model>, ServiceError> {
        Ok(account::find(&self.db, id).await?)
    }

    async fn update(&self, id: i32, fields: AccountFields) -> Result<account::Model, ServiceError> {
        Ok(account::update(&self.db, id, fields).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(account::delete(&self.db, id).await?)
    }
}
