//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns an ordered
//! store of entities and processes requests for it one at a time.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that manages an ordered collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Messages are processed *sequentially*, including the awaits inside entity
/// hooks. Two requests for the same id can never interleave, and the `store`
/// needs no `Mutex`.
///
/// **Snapshots**:
/// After every successful mutation the whole store is published on a `watch`
/// channel. Subscribers see committed states only, and a slow subscriber simply
/// skips to the newest one.
///
/// # Operations
///
/// * **Upsert**: looks the id up. Present: runs `on_upsert` on a copy and
///   swaps it in. Absent: runs `on_create` and appends the result.
/// * **Get**: returns a clone of the entity, or `None`.
/// * **Update**: runs `before_update`, then looks the id up and runs
///   `on_update` on a copy.
/// * **Delete**: runs `on_delete`, then removes the entity.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    snapshots: watch::Sender<Vec<T>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` with an empty store and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. If the channel is
    /// full, calls on the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_entities(buffer_size, Vec::new())
    }

    /// Creates an actor whose store starts with `seed`, in order.
    ///
    /// Entities sharing an id with an earlier one are dropped.
    pub fn with_entities(buffer_size: usize, seed: Vec<T>) -> (Self, ResourceClient<T>) {
        let mut store: Vec<T> = Vec::with_capacity(seed.len());
        for item in seed {
            if store.iter().any(|kept| kept.id() == item.id()) {
                warn!(id = %item.id(), "Duplicate id in seed, dropping");
                continue;
            }
            store.push(item);
        }

        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, snapshot_receiver) = watch::channel(store.clone());
        let actor = Self {
            receiver,
            store,
            snapshots,
        };
        let client = ResourceClient::new(sender, snapshot_receiver);
        (actor, client)
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }

    fn commit(&self) {
        self.snapshots.send_replace(self.store.clone());
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies that were created *after* the actor was
    /// instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "CartEntry" instead of "rocketshoes_cart::model::cart::CartEntry")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Upsert {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?params, "Upsert");
                    let result = match self.position(&id) {
                        Some(index) => {
                            let mut item = self.store[index].clone();
                            match item.on_upsert(params, &context).await {
                                Ok(()) => {
                                    self.store[index] = item.clone();
                                    Ok(item)
                                }
                                Err(e) => Err(e),
                            }
                        }
                        None => match T::on_create(id.clone(), params, &context).await {
                            Ok(item) => {
                                self.store.push(item.clone());
                                Ok(item)
                            }
                            Err(e) => Err(e),
                        },
                    };

                    match result {
                        Ok(item) => {
                            self.commit();
                            info!(entity_type, %id, size = self.store.len(), "Upserted");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Upsert failed");
                            let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.position(&id).map(|index| self.store[index].clone());
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Err(e) = T::before_update(&id, &update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update rejected");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        continue;
                    }
                    let Some(index) = self.position(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    let mut item = self.store[index].clone();
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        continue;
                    }
                    self.store[index] = item.clone();
                    self.commit();
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(index) = self.position(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    if let Err(e) = self.store[index].on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        continue;
                    }
                    let removed = self.store.remove(index);
                    self.commit();
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
