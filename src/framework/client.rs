//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use tokio::sync::{mpsc, oneshot, watch};

/// Shorthand for results coming back from the actor.
pub type ClientResult<V, T> = Result<V, FrameworkError<<T as ActorEntity>::Error>>;

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds the request sender and a handle on the actor's snapshot channel, so
/// cloning is cheap and clones can be shared across tasks. The actor stops once
/// every clone has been dropped.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    snapshots: watch::Receiver<Vec<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshots: self.snapshots.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>, snapshots: watch::Receiver<Vec<T>>) -> Self {
        Self { sender, snapshots }
    }

    /// The last committed state of the store.
    pub fn snapshot(&self) -> Vec<T> {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every commit made after this call.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        let mut receiver = self.snapshots.clone();
        receiver.borrow_and_update();
        receiver
    }

    pub async fn upsert(&self, id: T::Id, params: T::Create) -> ClientResult<T, T> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Upsert {
                id,
                params,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> ClientResult<Option<T>, T> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> ClientResult<T, T> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                update,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> ClientResult<T, T> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
