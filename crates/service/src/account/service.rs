use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use models::account::{self, AccountFields};
use crate::account::repository::AccountRepository;
use crate::errors::ServiceError;

/// Application service for the account resource.
/// Payloads are validated here, before the repository is touched.
pub struct AccountService<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<account::Model>, ServiceError> {
        let rows = self.repo.list().await?;
        info!(count = rows.len(), "list accounts");
        Ok(rows)
    }

    #[instrument(skip_all)]
    pub async fn create(&self, payload: &Value) -> Result<account::Model, ServiceError> {
        let fields = AccountFields::deserialize(payload)?;
        let created = self.repo.create(fields).await?;
        info!(id = created.id, "created account");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<account::Model, ServiceError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::account_not_found(id))
    }

    /// Unknown ids surface as `NotFound` from the repository write, so callers
    /// that skip their own lookup still get a 404 and nothing is inserted.
    /// Callers that must report 404 ahead of a bad payload look the id up first.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i32, payload: &Value) -> Result<account::Model, ServiceError> {
        let fields = AccountFields::deserialize(payload)?;
        let updated = self.repo.update(id, fields).await?;
        info!(id = updated.id, "updated account");
        Ok(updated)
    }

    /// Idempotent: deleting an unknown id succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let existed = self.repo.delete(id).await?;
        info!(id, existed, "deleted account");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    use crate::account::SeaOrmAccountRepository;
    use crate::test_support::get_db;

    /// Vec-backed repository that records how many writes reached it.
    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<Vec<account::Model>>,
        writes: Mutex<usize>,
    }

    impl MemoryRepo {
        fn writes(&self) -> usize { *self.writes.lock().unwrap() }
        fn bump(&self) { *self.writes.lock().unwrap() += 1; }
    }

    #[async_trait]
    impl AccountRepository for MemoryRepo {
        async fn list(&self) -> Result<Vec<account::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create(&self, fields: AccountFields) -> Result<account::Model, ServiceError> {
            self.bump();
            let mut rows = self.rows.lock().unwrap();
            let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let m = account::Model { id, name: fields.name, attributes: Value::Object(fields.attributes) };
            rows.push(m.clone());
            Ok(m)
        }

        async fn get(&self, id: i32) -> Result<Option<account::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }

        async fn update(&self, id: i32, fields: AccountFields) -> Result<account::Model, ServiceError> {
            self.bump();
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|r| r.id == id).ok_or_else(|| ServiceError::account_not_found(id))?;
            row.name = fields.name;
            row.attributes = Value::Object(fields.attributes);
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            self.bump();
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() != before)
        }
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_repository() {
        let repo = Arc::new(MemoryRepo::default());
        let svc = AccountService::new(Arc::clone(&repo));

        let err = svc.create(&json!({"email": "no-name@example.com"})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(repo.writes(), 0);

        let a = svc.create(&json!({"name": "Alice"})).await.unwrap();
        let err = svc.update(a.id, &json!({"name": ["x"]})).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(repo.writes(), 1);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_inserts_nothing() {
        let repo = Arc::new(MemoryRepo::default());
        let svc = AccountService::new(Arc::clone(&repo));

        let err = svc.update(9, &json!({"name": "Ghost"})).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Account with id [9] was not found"));
        assert!(svc.list().await.unwrap().is_empty());

        let err = svc.update(9, &json!("garbage")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(repo.writes(), 1);
    }

    #[tokio::test]
    async fn delete_missing_account_is_ok() {
        let svc = AccountService::new(Arc::new(MemoryRepo::default()));
        svc.delete(1).await.unwrap();
        assert!(matches!(svc.get(1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn account_lifecycle_against_sqlite() -> Result<(), anyhow::Error> {
        let repo = Arc::new(SeaOrmAccountRepository::new(get_db().await?));
        let svc = AccountService::new(repo);

        let created = svc.create(&json!({"id": 500, "name": "Alice", "email": "alice@example.com"})).await?;
        assert_ne!(created.id, 500);
        assert_eq!(svc.get(created.id).await?, created);

        let updated = svc.update(created.id, &json!({"name": "Alice B"})).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.serialize(), json!({"id": created.id, "name": "Alice B"}));

        svc.create(&json!({"name": "Bob"})).await?;
        assert_eq!(svc.list().await?.len(), 2);

        svc.delete(created.id).await?;
        svc.delete(created.id).await?;
        assert_eq!(svc.list().await?.len(), 1);
        assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
