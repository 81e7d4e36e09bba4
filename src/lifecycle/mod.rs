//! # Session Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the pieces of a cart session.
//!
//! ## The CartSystem Pattern
//!
//! [`CartSystem::start`] runs in a fixed order:
//!
//! 1. **Load** - read the persistence slot into the initial cart
//! 2. **Create** - build the cart actor seeded with it, and its client
//! 3. **Subscribe** - attach the [`SlotWriter`](crate::storage::SlotWriter) to the
//!    actor's snapshot channel before any request can commit
//! 4. **Run** - spawn the actor with the catalog injected as context, and the writer
//!
//! ## Dependency Injection via Context
//!
//! The actor is created without its catalog; the catalog arrives in
//! `run(CartContext)`. Tests swap in a stub catalog without touching the actor.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the request channel
//! 2. **Actor drains** - queued requests finish, then the loop ends and the
//!    snapshot sender is dropped
//! 3. **Writer flushes** - a snapshot not yet written is persisted, then the
//!    writer exits
//! 4. **Await completion** - both task handles, in that order
//!
//! ## Observability & Tracing
//!
//! See [`tracing`] for the subscriber setup and what each component logs.

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use tracing::*;
