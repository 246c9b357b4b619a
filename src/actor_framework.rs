use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Trait that any stored record must implement to be managed by [`ResourceActor`].
///
/// The actor owns every value of the type and applies one request at a time,
/// so `handle_action` runs as a single uninterrupted step against the record.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Construct the full record from the assigned ID and creation params.
    fn from_create(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    /// Runs before the record is stored; an error discards it.
    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    // --- Action Handler ---

    /// Handle a domain-specific action against the stored record.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Failures seen by callers of a [`ResourceClient`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Entity(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    name: &'static str,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        name: &'static str,
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            name,
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", fields(store = self.name), skip(self))]
    pub async fn run(mut self) {
        info!("Actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
                ResourceRequest::Shutdown => {
                    info!("Actor shutting down");
                    break;
                }
            }
        }

        info!(items = self.store.len(), "Actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create(id.clone(), params).map_err(FrameworkError::Entity)?;
        if let Err(e) = item.on_create() {
            warn!(id = %id, error = %e, "Create rejected");
            return Err(FrameworkError::Entity(e));
        }
        debug!(id = %item.id(), "Item created");
        self.store.insert(id, item.clone());
        Ok(item)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_update(patch).map_err(FrameworkError::Entity)?;
        Ok(item.clone())
    }

    fn handle_action(
        &mut self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.handle_action(action).map_err(FrameworkError::Entity)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Derive would demand `T: Clone` bounds on the message type as well.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError<T::Error>> {
        self.sender
            .send(ResourceRequest::Shutdown)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: String,
        value: u32,
        limit: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        limit: u32,
    }

    #[derive(Debug)]
    enum CounterAction {
        Bump,
    }

    #[derive(Debug, Clone, Error, PartialEq)]
    enum CounterError {
        #[error("limit reached")]
        LimitReached,
    }

    impl Entity for Counter {
        type Id = String;
        type CreateParams = CounterCreate;
        type Patch = u32;
        type Action = CounterAction;
        type ActionResult = u32;
        type Error = CounterError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create(id: String, params: CounterCreate) -> Result<Self, CounterError> {
            Ok(Self { id, value: 0, limit: params.limit })
        }

        fn on_update(&mut self, patch: u32) -> Result<(), CounterError> {
            self.limit = patch;
            Ok(())
        }

        fn handle_action(&mut self, action: CounterAction) -> Result<u32, CounterError> {
            match action {
                CounterAction::Bump if self.value < self.limit => {
                    self.value += 1;
                    Ok(self.value)
                }
                CounterAction::Bump => Err(CounterError::LimitReached),
            }
        }
    }

    fn spawn_counters() -> ResourceClient<Counter> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("counter_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new("counters", 10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_counters();

        let counter = client.create(CounterCreate { limit: 1 }).await.unwrap();
        assert_eq!(counter.id, "counter_1");

        assert_eq!(client.perform_action(counter.id.clone(), CounterAction::Bump).await, Ok(1));
        assert_eq!(
            client.perform_action(counter.id.clone(), CounterAction::Bump).await,
            Err(FrameworkError::Entity(CounterError::LimitReached))
        );

        let updated = client.update(counter.id.clone(), 5).await.unwrap();
        assert_eq!(updated.limit, 5);
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_item_and_shutdown() {
        let client = spawn_counters();

        assert_eq!(
            client.perform_action("nope".to_string(), CounterAction::Bump).await,
            Err(FrameworkError::NotFound("nope".to_string()))
        );
        assert_eq!(client.get("nope".to_string()).await, Ok(None));

        client.shutdown().await.unwrap();
        // The actor drops its receiver once the shutdown message is handled.
        let result = client.get("counter_1".to_string()).await;
        assert!(matches!(
            result,
            Err(FrameworkError::ActorClosed) | Err(FrameworkError::ActorDropped)
        ));
    }
}
