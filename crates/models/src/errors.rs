use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0} already exists")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Map a storage error from an insert, turning a unique-index violation
    /// into a conflict on the named field. Uniqueness lives in the schema, so
    /// the insert itself is the duplicate check.
    pub fn from_insert(field: &str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ModelError::Conflict(field.to_string()),
            _ => ModelError::Db(err.to_string()),
        }
    }
}
