use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::outcome::status;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Status code a failure built from this error should carry.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(_) => status::BAD_REQUEST,
            ServiceError::NotFound(_) => status::NOT_FOUND,
            ServiceError::Conflict(_) => status::CONFLICT,
            ServiceError::Db(_) | ServiceError::Internal(_) => status::INTERNAL,
        }
    }

    /// Message safe to hand to a client: validation text is kept, store details are not.
    pub fn client_message(&self) -> Option<String> {
        match self {
            ServiceError::Validation(msg) => Some(msg.clone()),
            ServiceError::Model(models::errors::ModelError::Validation(msg)) => Some(msg.clone()),
            _ => None,
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        // unique and foreign-key violations come back with driver-specific text
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => ServiceError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => ServiceError::NotFound(msg),
            _ => ServiceError::Db(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(ServiceError::Validation("x".into()).status(), 400);
        assert_eq!(ServiceError::not_found("vehicle").status(), 404);
        assert_eq!(ServiceError::Conflict("x".into()).status(), 409);
        assert_eq!(ServiceError::Db("x".into()).status(), 500);
        assert_eq!(ServiceError::Internal("x".into()).status(), 500);
    }

    #[test]
    fn plain_db_errors_stay_db() {
        let err: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ServiceError::Db(_)));
        assert!(err.client_message().is_none());
    }
}
