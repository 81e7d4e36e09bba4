//! # Generic Messages
//!
//! Requests sent from a [`ResourceClient`](super::ResourceClient) to its
//! [`ResourceActor`](super::ResourceActor).

use super::entity::ActorEntity;
use super::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<V, E> = oneshot::Sender<Result<V, FrameworkError<E>>>;

/// Internal message type sent to the actor to request operations.
///
/// - **Upsert**: create the entity, or apply the payload to the existing one.
/// - **Get**: read one entity, ordered after every request sent before it.
/// - **Update**: mutate an existing entity.
/// - **Delete**: remove an entity.
///
/// Every variant is typed by the entity's associated types, so a payload meant
/// for one entity type cannot reach an actor of another.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Upsert {
        id: T::Id,
        params: T::Create,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T, T::Error>,
    },
}
