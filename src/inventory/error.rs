use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Ticket category not found: {0}")]
    CategoryNotFound(String),
    #[error("Insufficient inventory for {category_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        category_id: String,
        requested: u32,
        available: u32,
    },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Release of {quantity} for {category_id} would exceed capacity {capacity} (available {available})")]
    ReleaseExceedsCapacity {
        category_id: String,
        quantity: u32,
        available: u32,
        capacity: u32,
    },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<InventoryError>> for InventoryError {
    fn from(error: FrameworkError<InventoryError>) -> Self {
        match error {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => InventoryError::CategoryNotFound(id),
            other => InventoryError::ActorCommunicationError(other.to_string()),
        }
    }
}
