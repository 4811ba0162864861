use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn account_not_found(id: i32) -> Self {
        Self::NotFound(ModelError::NotFound(id).to_string())
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::NotFound(id) => Self::account_not_found(id),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_kind() {
        let e: ServiceError = ModelError::NotFound(5).into();
        assert_eq!(e.to_string(), "Account with id [5] was not found");
        assert!(matches!(ServiceError::from(ModelError::Validation("bad".into())), ServiceError::Validation(m) if m == "bad"));
        assert!(matches!(ServiceError::from(ModelError::Db("down".into())), ServiceError::Db(_)));
    }
}
