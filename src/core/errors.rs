//! Errors raised while handling a single chat event.

use crate::infrastructure::errors::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("user {0} is not the owner")]
    Unauthorized(i64),

    #[error("invalid action: {0}")]
    Validation(&'static str),

    #[error("no pending data for this step")]
    NothingPending,

    #[error("subscription #{0} does not exist")]
    NotFound(i64),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => EngineError::NotFound(id),
            error => EngineError::Store(error),
        }
    }
}
