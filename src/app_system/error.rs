use thiserror::Error;

use crate::inventory::InventoryError;
use crate::orders::OrderStoreError;

/// Failures while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Inventory actor: {0}")]
    Inventory(#[from] InventoryError),
    #[error("Order actor: {0}")]
    Orders(#[from] OrderStoreError),
    #[error("Actor task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
