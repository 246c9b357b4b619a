use thiserror::Error;

use crate::assembler::AssemblyError;
use crate::consumption_rules::RuleError;
use crate::domain::{AuthorizationHandle, CartError};
use crate::inventory::InventoryError;
use crate::payment::PaymentError;

/// Why a checkout did not produce an order.
///
/// Every variant except `PersistenceFault` guarantees that stock is exactly
/// as it was before the call and that no charge is outstanding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("invalid cart: {0}")]
    InvalidCart(String),
    #[error("ticket category not found: {0}")]
    CategoryNotFound(String),
    #[error("insufficient inventory for {category_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        category_id: String,
        requested: u32,
        available: u32,
    },
    #[error("payment declined: {0}")]
    PaymentDeclined(String),
    #[error("payment provider error: {0}")]
    PaymentProviderError(String),
    /// The charge was authorized but the order could not be written. Stock has
    /// been released; the caller must void `authorization`.
    #[error("order could not be persisted after payment was authorized: {reason}")]
    PersistenceFault {
        authorization: AuthorizationHandle,
        reason: String,
    },
    /// A store could not be reached before any charge was made.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CheckoutError {
    /// Whether re-running the same checkout might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::PaymentProviderError(_) | CheckoutError::StoreUnavailable(_)
        )
    }
}

impl From<CartError> for CheckoutError {
    fn from(error: CartError) -> Self {
        CheckoutError::InvalidCart(error.to_string())
    }
}

impl From<AssemblyError> for CheckoutError {
    fn from(error: AssemblyError) -> Self {
        CheckoutError::InvalidCart(error.to_string())
    }
}

impl From<RuleError> for CheckoutError {
    fn from(error: RuleError) -> Self {
        match error {
            RuleError::LinkedCategoryMissing { linked_title, event_id, .. } => {
                CheckoutError::CategoryNotFound(format!("{linked_title} (event {event_id})"))
            }
            ambiguous @ RuleError::AmbiguousLinkedCategory { .. } => {
                CheckoutError::InvalidCart(ambiguous.to_string())
            }
        }
    }
}

impl From<InventoryError> for CheckoutError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::CategoryNotFound(id) => CheckoutError::CategoryNotFound(id),
            InventoryError::InsufficientInventory { category_id, requested, available } => {
                CheckoutError::InsufficientInventory { category_id, requested, available }
            }
            InventoryError::InvalidQuantity(quantity) => {
                CheckoutError::InvalidCart(format!("invalid quantity {quantity}"))
            }
            other @ (InventoryError::ReleaseExceedsCapacity { .. }
            | InventoryError::ActorCommunicationError(_)) => {
                CheckoutError::StoreUnavailable(other.to_string())
            }
        }
    }
}

impl From<PaymentError> for CheckoutError {
    fn from(error: PaymentError) -> Self {
        match error {
            PaymentError::Declined { reason } => CheckoutError::PaymentDeclined(reason),
            PaymentError::Provider { message } => CheckoutError::PaymentProviderError(message),
        }
    }
}
