use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur while writing or reading orders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderStoreError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order has no items")]
    NoItems,
    #[error("Order total {total} does not match its items ({items_total:?})")]
    TotalMismatch { total: u64, items_total: Option<u64> },
    #[error("Authorized amount {authorized} does not match order total {total}")]
    PaymentMismatch { total: u64, authorized: u64 },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderStoreError>> for OrderStoreError {
    fn from(error: FrameworkError<OrderStoreError>) -> Self {
        match error {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => OrderStoreError::NotFound(id),
            other => OrderStoreError::ActorCommunicationError(other.to_string()),
        }
    }
}
