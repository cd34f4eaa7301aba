//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the order store.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that every stored aggregate implements.
//! - [`Versioned`]: The envelope the actor keeps around each entity (optimistic concurrency).
//! - [`ResourceActor`]: The single-writer actor that owns the keyed store.
//! - [`ResourceClient`]: The cloneable client used to talk to the actor.
//! - [`FrameworkError`]: Store-level failures, wrapping the entity's own error type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::Deref;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any aggregate must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// The actor loop is written *once* against this contract. Associated types keep
/// each store honest: an `Order` store only accepts `OrderCreate` payloads and
/// `OrderAction` commands, and reports failures as its own error type.
///
/// # Async & Context
/// Hooks are `#[async_trait]` and receive the `Context` injected into
/// [`ResourceActor::run`]. Dependencies (catalog, clock, pricing) are bound when the
/// loop starts, not when the actor is constructed.
///
/// # Atomicity
/// [`ActorEntity::handle_action`] runs against a *copy* of the stored entity. The copy
/// replaces the stored value only when the hook returns `Ok`, so a hook may mutate
/// freely and bail out half-way without leaving partial state behind.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Store-allocated identifier. Ids are handed out sequentially from `1`.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Enum of the mutations the entity supports once stored.
    type Action: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into every hook.
    type Context: Send + Sync;

    /// The entity's error type, carried back to callers inside [`FrameworkError::Entity`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the allocated id and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity becomes visible.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply one mutation. Runs on a copy; see the trait-level note on atomicity.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before removal. Returning an error vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// An entity together with its store version.
///
/// Versions start at `1` on creation and increase by one on every committed action.
/// Callers echo the version they read back into their next write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: u64,
    pub entity: T,
}

impl<T> Versioned<T> {
    pub fn into_inner(self) -> T {
        self.entity
    }
}

impl<T> Deref for Versioned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors produced by the store itself, or forwarded from the entity.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    #[error("No ids left to allocate")]
    IdsExhausted,
    #[error("Concurrent modification of {id}: expected version {expected}, found {actual}")]
    ConcurrentModification {
        id: String,
        expected: u64,
        actual: u64,
    },
    #[error("{0}")]
    Entity(E),
}

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Internal message type sent to the actor.
///
/// - **Create**: allocate an id and insert a new entity at version 1.
/// - **Get**: read one entity.
/// - **List**: read a snapshot of every entity, ordered by id.
/// - **Action**: versioned mutation (`expected_version` must match the stored one).
/// - **Delete**: remove an entity, subject to [`ActorEntity::on_delete`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Versioned<T>>, T::Error>,
    },
    List {
        respond_to: Response<Vec<Versioned<T>>, T::Error>,
    },
    Action {
        id: T::Id,
        expected_version: u64,
        action: T::Action,
        respond_to: Response<Versioned<T>, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<Versioned<T>, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The single-writer actor that owns a keyed collection of entities.
///
/// **Concurrency Model**:
/// Every request goes through one mailbox and is handled to completion before the
/// next one is read, so writes to any id are serialized without locks. Reads return
/// cloned snapshots; callers never hold a reference into the store.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Versioned<T>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client. `buffer_size` bounds the mailbox; senders
    /// wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Order" instead of "kitchen_orders::model::order::Order")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let mut entries: Vec<(&T::Id, &Versioned<T>)> = self.store.iter().collect();
                    entries.sort_by(|a, b| a.0.cmp(b.0));
                    let items: Vec<Versioned<T>> =
                        entries.into_iter().map(|(_, item)| item.clone()).collect();
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Action {
                    id,
                    expected_version,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, expected_version, ?action, "Action");
                    let result = self.apply(&id, expected_version, action, &context).await;
                    match &result {
                        Ok(committed) => {
                            info!(entity_type, %id, version = committed.version, "Action ok")
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = T::Id::from(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(FrameworkError::IdsExhausted)?;
        if self.store.contains_key(&id) {
            return Err(FrameworkError::DuplicateId(id.to_string()));
        }

        let mut item = T::from_create_params(id.clone(), params).map_err(FrameworkError::Entity)?;
        item.on_create(context).await.map_err(FrameworkError::Entity)?;
        self.store.insert(
            id.clone(),
            Versioned {
                version: 1,
                entity: item,
            },
        );
        Ok(id)
    }

    async fn apply(
        &mut self,
        id: &T::Id,
        expected_version: u64,
        action: T::Action,
        context: &T::Context,
    ) -> Result<Versioned<T>, FrameworkError<T::Error>> {
        let (version, mut draft) = match self.store.get(id) {
            Some(current) => (current.version, current.entity.clone()),
            None => return Err(FrameworkError::NotFound(id.to_string())),
        };
        if version != expected_version {
            return Err(FrameworkError::ConcurrentModification {
                id: id.to_string(),
                expected: expected_version,
                actual: version,
            });
        }

        draft
            .handle_action(action, context)
            .await
            .map_err(FrameworkError::Entity)?;

        let committed = Versioned {
            version: version + 1,
            entity: draft,
        };
        self.store.insert(id.clone(), committed.clone());
        Ok(committed)
    }

    async fn delete(
        &mut self,
        id: &T::Id,
        context: &T::Context,
    ) -> Result<Versioned<T>, FrameworkError<T::Error>> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        current
            .entity
            .on_delete(context)
            .await
            .map_err(FrameworkError::Entity)?;
        self.store
            .remove(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe, cheaply cloneable handle to a [`ResourceActor`].
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
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

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<Versioned<T>>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        expected_version: u64,
        action: T::Action,
    ) -> Result<Versioned<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            expected_version,
            action,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<Versioned<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}
