//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_action`] to assert behavior.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

pub type Responder<R, E> = oneshot::Sender<Result<R, FrameworkError<E>>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The test plays the actor: it reads each request off `receiver` and answers
/// through the embedded responder, so ordering and failures are scripted
/// deterministically.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Responder<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Responder<Vec<T>, T::Error>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InventoryLedger;
    use crate::domain::TicketCategory;
    use crate::inventory::{InventoryAction, InventoryActionResult, InventoryError};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<TicketCategory>(10);
        let ledger = InventoryLedger::new(client);

        let reserve_task = tokio::spawn(async move { ledger.reserve("category_1".to_string(), 2).await });

        let (id, action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, "category_1");
        assert_eq!(action, InventoryAction::Reserve(2));
        responder
            .send(Ok(InventoryActionResult::Reserved { unit_price: 100, remaining: 3 }))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap(), Ok(100));
    }

    #[tokio::test]
    async fn test_mock_client_maps_framework_errors() {
        let (client, mut receiver) = create_mock_client::<TicketCategory>(10);
        let ledger = InventoryLedger::new(client);

        let release_task = tokio::spawn(async move { ledger.release("category_9".to_string(), 1).await });

        let (_, _, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        responder.send(Err(FrameworkError::NotFound("category_9".into()))).unwrap();

        assert_eq!(
            release_task.await.unwrap(),
            Err(InventoryError::CategoryNotFound("category_9".into()))
        );
    }
}
