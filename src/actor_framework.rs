use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Payloads, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    /// Domain error returned by hooks and actions.
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Failures seen by a [`ResourceClient`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the response")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Entity(E),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id, T::Error>,
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
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    /// Ids in creation order, so `List` is stable.
    order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.order.iter().filter_map(|id| self.store.get(id).cloned()).collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action).map_err(FrameworkError::Entity),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        debug!(id = %item.id(), "Item created");
        self.store.insert(id.clone(), item);
        self.order.push(id.clone());
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        // Hooks see a scratch copy so a rejected patch leaves the stored item untouched.
        let mut updated = item.clone();
        updated.on_update(patch).map_err(FrameworkError::Entity)?;
        *item = updated.clone();
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        if let Err(e) = item.on_delete() {
            warn!(id = %id, error = %e, "Delete rejected");
            return Err(FrameworkError::Entity(e));
        }
        self.store.remove(&id);
        self.order.retain(|existing| existing != &id);
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Derived Clone would require `T: Clone` on the sender's message type.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    #[cfg(test)]
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
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

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
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

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
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

    // --- Domain Definition ---

    #[derive(Debug, Clone, Error, PartialEq)]
    enum BinError {
        #[error("bin is full")]
        Full,
        #[error("bin is not empty")]
        NotEmpty,
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Bin {
        id: String,
        label: String,
        items: u32,
        capacity: u32,
    }

    #[derive(Debug)]
    struct BinCreate {
        label: String,
        capacity: u32,
    }

    #[derive(Debug)]
    struct BinPatch {
        capacity: Option<u32>,
    }

    #[derive(Debug)]
    enum BinAction {
        Put(u32),
    }

    impl Entity for Bin {
        type Id = String;
        type CreatePayload = BinCreate;
        type Patch = BinPatch;
        type Action = BinAction;
        type ActionResult = u32;
        type Error = BinError;

        fn id(&self) -> &String { &self.id }

        fn from_create(id: String, payload: BinCreate) -> Result<Self, BinError> {
            Ok(Self { id, label: payload.label, items: 0, capacity: payload.capacity })
        }

        fn on_update(&mut self, patch: BinPatch) -> Result<(), BinError> {
            if let Some(capacity) = patch.capacity {
                self.capacity = capacity;
            }
            if self.items > self.capacity {
                return Err(BinError::Full);
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), BinError> {
            if self.items > 0 { Err(BinError::NotEmpty) } else { Ok(()) }
        }

        fn handle_action(&mut self, action: BinAction) -> Result<u32, BinError> {
            match action {
                BinAction::Put(n) => {
                    if self.items + n > self.capacity {
                        return Err(BinError::Full);
                    }
                    self.items += n;
                    Ok(self.items)
                }
            }
        }
    }

    fn spawn_bins() -> ResourceClient<Bin> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("bin_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_lifecycle() {
        let client = spawn_bins();

        let a = client.create(BinCreate { label: "a".into(), capacity: 3 }).await.unwrap();
        let b = client.create(BinCreate { label: "b".into(), capacity: 1 }).await.unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("bin_1", "bin_2"));

        assert_eq!(client.perform_action(a.clone(), BinAction::Put(2)).await.unwrap(), 2);
        assert_eq!(
            client.perform_action(a.clone(), BinAction::Put(2)).await,
            Err(FrameworkError::Entity(BinError::Full))
        );

        let labels: Vec<_> = client.list().await.unwrap().into_iter().map(|bin| bin.label).collect();
        assert_eq!(labels, vec!["a", "b"]);

        assert_eq!(client.delete(a.clone()).await, Err(FrameworkError::Entity(BinError::NotEmpty)));
        client.delete(b.clone()).await.unwrap();
        assert_eq!(client.get(b.clone()).await.unwrap(), None);
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_item_untouched() {
        let client = spawn_bins();
        let id = client.create(BinCreate { label: "a".into(), capacity: 5 }).await.unwrap();
        client.perform_action(id.clone(), BinAction::Put(4)).await.unwrap();

        let result = client.update(id.clone(), BinPatch { capacity: Some(2) }).await;
        assert_eq!(result, Err(FrameworkError::Entity(BinError::Full)));
        assert_eq!(client.get(id.clone()).await.unwrap().unwrap().capacity, 5);
    }

    #[tokio::test]
    async fn test_missing_items_report_not_found() {
        let client = spawn_bins();
        assert_eq!(
            client.perform_action("bin_9".into(), BinAction::Put(1)).await,
            Err(FrameworkError::NotFound("bin_9".into()))
        );
        assert_eq!(client.delete("bin_9".into()).await, Err(FrameworkError::NotFound("bin_9".into())));
    }
}
