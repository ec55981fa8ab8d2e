//! Domain error types.

use store::StoreError;
use thiserror::Error;

use crate::forms::ValidationError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in a store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Submitted form input was rejected. Nothing was written.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A record looked up by name or id does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },
}

impl DomainError {
    pub(crate) fn menu_item_not_found(key: impl ToString) -> Self {
        DomainError::NotFound {
            kind: "Menu item",
            key: key.to_string(),
        }
    }
}
