//! # ActorEntity Trait
//!
//! The contract an entity type implements to be kept by a [`ResourceActor`](super::ResourceActor).
//!
//! Entities are addressed by a caller-supplied id, so there is no id generator:
//! an `Upsert` either builds a new entity through [`ActorEntity::on_create`] or
//! applies the payload to the existing one through [`ActorEntity::on_upsert`].
//!
//! # Provided Methods (Hooks)
//! [`ActorEntity::before_update`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! Implement them only when an operation needs a precondition or a side effect.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `async` so they can reach external collaborators (an HTTP catalog,
/// another actor). The `Context` is injected into every hook when the actor
/// starts running, not when it is constructed.
///
/// # Atomicity
/// Mutating hooks (`on_upsert`, `on_update`) run against a copy of the stored
/// entity. The copy replaces the original only when the hook returns `Ok`, so a
/// failing hook never leaves a half-applied change behind.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// Payload of an upsert request.
    type Create: Send + Sync + Debug;

    /// Payload of an update request.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The id this entity is stored under.
    fn id(&self) -> &Self::Id;

    // --- Lifecycle Hooks (Async) ---

    /// Builds the entity for an id that is not in the store yet.
    async fn on_create(
        id: Self::Id,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    /// Applies an upsert to an entity that already exists.
    async fn on_upsert(
        &mut self,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Precondition checked before the entity is looked up for an update.
    ///
    /// A failure here wins over "not found".
    async fn before_update(
        _id: &Self::Id,
        _update: &Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
