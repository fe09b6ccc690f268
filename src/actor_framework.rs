use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and DTOs)
// =============================================================================

/// Trait that any record must implement to be served by a ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the create payload.
    ///
    /// Records in this store carry their own key, so the ID comes from the payload.
    fn from_create(payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the request")]
    ActorDropped,
    #[error("Request rejected: {0}")]
    Rejected(String),
}

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Serves one collection of records over a channel.
///
/// Listing returns records in insertion order.
pub struct ResourceActor<T: Entity> {
    name: &'static str,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(name: &'static str, buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_items(name, buffer_size, Vec::new())
    }

    /// Creates an actor whose store is pre-populated with `items`.
    pub fn with_items(
        name: &'static str,
        buffer_size: usize,
        items: Vec<T>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut actor = Self {
            name,
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
        };
        for item in items {
            actor.insert(item);
        }
        let client = ResourceClient { sender };
        (actor, client)
    }

    fn insert(&mut self, item: T) {
        let id = item.id().clone();
        if self.store.insert(id.clone(), item).is_none() {
            self.order.push(id);
        }
    }

    fn remove(&mut self, id: &T::Id) {
        self.store.remove(id);
        self.order.retain(|existing| existing != id);
    }

    pub async fn run(mut self) {
        info!(resource = self.name, "ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let items = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Create { payload, respond_to } => {
                    let mut item = match T::from_create(payload) {
                        Ok(item) => item,
                        Err(e) => {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                            continue;
                        }
                    };
                    if self.store.contains_key(item.id()) {
                        let msg = format!("Item already exists: {}", item.id());
                        let _ = respond_to.send(Err(FrameworkError::Rejected(msg)));
                        continue;
                    }
                    if let Err(e) = item.on_create() {
                        let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                        continue;
                    }
                    debug!(resource = self.name, id = %item.id(), "Record created");
                    self.insert(item.clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        // Hooks work on a copy so a rejected patch leaves the record intact.
                        let mut updated = item.clone();
                        if let Err(e) = updated.on_update(patch) {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                            continue;
                        }
                        *item = updated.clone();
                        let _ = respond_to.send(Ok(updated));
                    } else {
                        let msg = format!("Item not found: {}", id);
                        let _ = respond_to.send(Err(FrameworkError::Rejected(msg)));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete() {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                            continue;
                        }
                        self.remove(&id);
                        debug!(resource = self.name, id = %id, "Record deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let msg = format!("Item not found: {}", id);
                        let _ = respond_to.send(Err(FrameworkError::Rejected(msg)));
                    }
                }
            }
        }
        info!(resource = self.name, "ResourceActor stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::List { respond_to }).await
    }

    #[allow(dead_code)]
    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: String,
        locked: bool,
    }

    #[derive(Debug)]
    struct NoteCreate {
        id: u32,
        text: String,
    }

    #[derive(Debug)]
    struct NotePatch {
        text: String,
    }

    impl Entity for Note {
        type Id = u32;
        type CreatePayload = NoteCreate;
        type Patch = NotePatch;

        fn id(&self) -> &u32 { &self.id }

        fn from_create(payload: NoteCreate) -> Result<Self, String> {
            if payload.text.is_empty() {
                return Err("text must not be empty".to_string());
            }
            Ok(Self { id: payload.id, text: payload.text, locked: false })
        }

        fn on_update(&mut self, patch: NotePatch) -> Result<(), String> {
            if patch.text.is_empty() {
                return Err("text must not be empty".to_string());
            }
            self.text = patch.text;
            Ok(())
        }

        fn on_delete(&self) -> Result<(), String> {
            if self.locked {
                Err("note is locked".to_string())
            } else {
                Ok(())
            }
        }
    }

    fn note(id: u32, text: &str) -> NoteCreate {
        NoteCreate { id, text: text.to_string() }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_crud() {
        let (actor, client) = ResourceActor::<Note>::new("notes", 10);
        tokio::spawn(actor.run());

        // 1. Create keeps insertion order
        client.create(note(2, "second")).await.unwrap();
        client.create(note(1, "first")).await.unwrap();
        let ids: Vec<u32> = client.list().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 1]);

        // 2. Update returns the new record
        let updated = client.update(1, NotePatch { text: "changed".into() }).await.unwrap();
        assert_eq!(updated.text, "changed");
        assert_eq!(client.get(1).await.unwrap().unwrap().text, "changed");

        // 3. Delete removes it from the listing
        client.delete(2).await.unwrap();
        let ids: Vec<u32> = client.list().await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_resource_actor_rejections() {
        let seed = vec![Note { id: 7, text: "pinned".into(), locked: true }];
        let (actor, client) = ResourceActor::with_items("notes", 10, seed);
        tokio::spawn(actor.run());

        // Duplicate ids are refused
        let dup = client.create(note(7, "again")).await;
        assert!(matches!(dup, Err(FrameworkError::Rejected(_))));

        // A rejected patch leaves the record untouched
        let bad = client.update(7, NotePatch { text: String::new() }).await;
        assert!(matches!(bad, Err(FrameworkError::Rejected(_))));
        assert_eq!(client.get(7).await.unwrap().unwrap().text, "pinned");

        // Hooks can veto deletes
        assert!(client.delete(7).await.is_err());

        // Missing ids are reported
        assert!(client.delete(99).await.is_err());
        assert_eq!(client.get(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let (actor, client) = ResourceActor::<Note>::new("notes", 1);
        drop(actor);
        assert_eq!(client.list().await, Err(FrameworkError::ActorClosed));
    }
}
