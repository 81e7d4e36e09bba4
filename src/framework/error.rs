//! # Framework Errors
//!
//! Common error type returned by [`ResourceClient`](super::ResourceClient) calls.
//! Entity failures keep their concrete type so callers can match on them.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError<E: std::error::Error + 'static> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    Entity(#[source] E),
}
