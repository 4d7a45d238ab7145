//! Purchase outcome taxonomy.

use thiserror::Error;

use bazaar_core::{DomainError, ItemId};

/// Why a purchase did not complete.
///
/// `Validation`, `NotFound` and `AlreadySold` are expected rejections and are
/// never retried. `TransactionFailed` is an infrastructure fault; the whole
/// purchase was rolled back, so the call may be retried as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// Malformed or missing identifiers (caught before the coordinator runs).
    #[error("invalid purchase request: {0}")]
    Validation(String),

    #[error("item {0} does not exist")]
    NotFound(ItemId),

    /// Another buyer got there first.
    #[error("item {0} is already sold out")]
    AlreadySold(ItemId),

    /// Lock timeout, connectivity loss, constraint violation or commit failure.
    #[error("purchase transaction failed: {0}")]
    TransactionFailed(String),
}

impl PurchaseError {
    pub fn transaction_failed(msg: impl Into<String>) -> Self {
        Self::TransactionFailed(msg.into())
    }

    /// Outcome of asking an item's status to move to `SOLD_OUT`.
    ///
    /// A conflict means someone else already bought it.
    pub fn from_transition(item_id: ItemId, err: DomainError) -> Self {
        match err {
            DomainError::Conflict(_) => PurchaseError::AlreadySold(item_id),
            other => other.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, PurchaseError::TransactionFailed(_))
    }

    /// Short machine-readable code used in logs and HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            PurchaseError::Validation(_) => "validation_error",
            PurchaseError::NotFound(_) => "not_found",
            PurchaseError::AlreadySold(_) => "already_sold",
            PurchaseError::TransactionFailed(_) => "transaction_failed",
        }
    }
}

impl From<DomainError> for PurchaseError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                PurchaseError::Validation(msg)
            }
            other => PurchaseError::Validation(other.to_string()),
        }
    }
}
