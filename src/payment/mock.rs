use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};

use super::{AuthorizationMetadata, PaymentAuthorizer, PaymentError, PaymentResult};
use crate::domain::AuthorizationHandle;

/// How the mock answers the next authorization requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    Approve,
    Decline(String),
    ProviderError(String),
    /// Sleeps before approving; used to exercise the checkout timeout.
    Delay(Duration),
    /// Approves, but for this amount rather than the one requested.
    ApproveAmount(u64),
}

#[derive(Debug, Default)]
struct MockState {
    behavior: Option<MockBehavior>,
    requests: Vec<(u64, AuthorizationMetadata)>,
    voided: Vec<String>,
}

/// In-process stand-in for a card processor.
///
/// Approves by default. Records every request so tests can assert on the
/// amounts that were sent.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentAuthorizer {
    state: Arc<Mutex<MockState>>,
}

impl MockPaymentAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        let mock = Self::new();
        mock.set_behavior(behavior);
        mock
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        self.lock().behavior = Some(behavior);
    }

    /// Amounts and metadata of every authorization attempt, in call order.
    pub fn requests(&self) -> Vec<(u64, AuthorizationMetadata)> {
        self.lock().requests.clone()
    }

    pub fn voided(&self) -> Vec<String> {
        self.lock().voided.clone()
    }

    // A panic while holding the lock can only come from a test assertion.
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PaymentAuthorizer for MockPaymentAuthorizer {
    async fn authorize(&self, amount: u64, metadata: &AuthorizationMetadata) -> PaymentResult<AuthorizationHandle> {
        let behavior = {
            let mut state = self.lock();
            state.requests.push((amount, metadata.clone()));
            state.behavior.clone().unwrap_or(MockBehavior::Approve)
        };

        let approved = match behavior {
            MockBehavior::Approve => amount,
            MockBehavior::ApproveAmount(approved) => approved,
            MockBehavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                amount
            }
            MockBehavior::Decline(reason) => {
                warn!(amount, reason = %reason, "Mock authorization declined");
                return Err(PaymentError::Declined { reason });
            }
            MockBehavior::ProviderError(message) => {
                warn!(amount, message = %message, "Mock provider failure");
                return Err(PaymentError::Provider { message });
            }
        };

        let id = format!("mock_auth_{}", uuid::Uuid::new_v4());
        info!(amount, approved, authorization_id = %id, user_id = %metadata.user_id, "Mock authorization approved");
        Ok(AuthorizationHandle {
            client_secret: format!("{id}_secret"),
            id,
            amount: approved,
        })
    }

    async fn void(&self, handle: &AuthorizationHandle) -> PaymentResult<()> {
        info!(authorization_id = %handle.id, "Mock authorization voided");
        self.lock().voided.push(handle.id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> AuthorizationMetadata {
        AuthorizationMetadata {
            user_id: "user_1".into(),
            lines: vec![("category_1".into(), 2)],
        }
    }

    #[tokio::test]
    async fn test_mock_authorization_success() {
        let mock = MockPaymentAuthorizer::new();
        let handle = mock.authorize(200, &metadata()).await.unwrap();

        assert_eq!(handle.amount, 200);
        assert!(handle.id.starts_with("mock_auth_"));
        assert_eq!(mock.requests(), vec![(200, metadata())]);

        mock.void(&handle).await.unwrap();
        assert_eq!(mock.voided(), vec![handle.id]);
    }

    #[tokio::test]
    async fn test_mock_scripted_failures() {
        let mock = MockPaymentAuthorizer::with_behavior(MockBehavior::Decline("card declined".into()));
        let declined = mock.authorize(100, &metadata()).await.unwrap_err();
        assert!(!declined.is_transient());

        mock.set_behavior(MockBehavior::ProviderError("gateway timeout".into()));
        let provider = mock.authorize(100, &metadata()).await.unwrap_err();
        assert!(provider.is_transient());
        assert_eq!(mock.requests().len(), 2);
    }
}
