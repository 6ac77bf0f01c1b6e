//! Storage errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("subscription #{0} does not exist")]
    NotFound(i64),

    #[error("malformed subscription: {0}")]
    Malformed(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
