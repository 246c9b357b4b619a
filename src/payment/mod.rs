//! Contract for the external payment processor.
//!
//! The checkout core asks for exactly one authorization per checkout. Anything
//! beyond that (capture, refunds, webhooks) belongs to the processor
//! integration, not here.

mod mock;

pub use mock::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AuthorizationHandle, CategoryId};

pub type PaymentResult<T> = Result<T, PaymentError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The processor refused the charge. Retrying the same charge will not help.
    #[error("payment declined: {reason}")]
    Declined { reason: String },
    /// Processor or network fault, including timeouts.
    #[error("payment provider error: {message}")]
    Provider { message: String },
}

impl PaymentError {
    pub fn is_transient(&self) -> bool {
        matches!(self, PaymentError::Provider { .. })
    }
}

/// What the processor is told about a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationMetadata {
    pub user_id: String,
    pub lines: Vec<(CategoryId, u32)>,
}

#[async_trait]
pub trait PaymentAuthorizer: Send + Sync {
    /// Authorize a charge of `amount` minor units.
    ///
    /// # Errors
    ///
    /// `Declined` when the processor rejects the charge, `Provider` on
    /// processor or transport faults.
    async fn authorize(&self, amount: u64, metadata: &AuthorizationMetadata) -> PaymentResult<AuthorizationHandle>;

    /// Cancel a live authorization so held funds are released.
    async fn void(&self, handle: &AuthorizationHandle) -> PaymentResult<()>;
}
