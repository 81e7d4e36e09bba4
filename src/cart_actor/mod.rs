//! # Cart Actor
//!
//! The cart as a [`ResourceActor`] over [`CartEntry`] entities.
//!
//! ## Overview
//!
//! One actor task owns the ordered cart. Add, remove and set-amount requests are
//! processed one after another, network lookups included, so two operations on
//! the same product never work from the same stale snapshot.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation with the stock rules
//! - [`error`] - [`CartError`] and the notice mapping
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, generic_client) = cart_actor::new(32, stored_entries);
//! tokio::spawn(actor.run(CartContext::new(catalog)));
//! let cart = CartClient::new(generic_client, notifier);
//! cart.add_product(ProductId(1)).await?;
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::catalog::Catalog;
use crate::framework::{ResourceActor, ResourceClient};
use crate::model::CartEntry;
use std::sync::Arc;

/// Dependencies injected into the cart actor when it starts running.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<dyn Catalog>,
}

impl CartContext {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }
}

/// Creates a new Cart actor, seeded with `entries`, and its client.
pub fn new(buffer_size: usize, entries: Vec<CartEntry>) -> (ResourceActor<CartEntry>, ResourceClient<CartEntry>) {
    ResourceActor::with_entities(buffer_size, entries)
}
