//! # Cart Client
//!
//! The handle rendering code holds. It wraps a `ResourceClient<CartEntry>`, exposes
//! the cart state and the three cart operations, and turns every failure into one
//! [`Notice`] on the injected [`Notifier`].
use crate::cart_actor::{CartError, CartOperation};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{AddProduct, AmountUpdate, CartEntry, CartState, ProductId};
use crate::notify::{Notice, Notifier};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartEntry>,
    notifier: Arc<dyn Notifier>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartEntry>, notifier: Arc<dyn Notifier>) -> Self {
        Self { inner, notifier }
    }

    fn map_error(id: ProductId, e: FrameworkError<CartError>) -> CartError {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(_) => CartError::NotFound(id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }

    fn report<V>(&self, operation: CartOperation, result: Result<V, CartError>) -> Result<V, CartError> {
        if let Err(e) = &result {
            let notice: Notice = e.notice(operation);
            warn!(?operation, error = %e, %notice, "Cart operation abandoned");
            self.notifier.notify(notice);
        }
        result
    }

    /// The last committed cart.
    pub fn cart(&self) -> CartState {
        CartState::from(self.inner.snapshot())
    }

    /// Notified with every cart committed after this call.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartEntry>> {
        self.inner.subscribe()
    }

    /// Reads one entry after every request already sent by this client.
    #[instrument(skip(self))]
    pub async fn entry(&self, id: ProductId) -> Result<Option<CartEntry>, CartError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(|e| Self::map_error(id, e))
    }

    /// Adds one unit of `id`, or the first one if it is not in the cart yet.
    ///
    /// Returns the entry as committed.
    #[instrument(skip(self))]
    pub async fn add_product(&self, id: ProductId) -> Result<CartEntry, CartError> {
        debug!("Sending request");
        let result = self
            .inner
            .upsert(id, AddProduct)
            .await
            .map_err(|e| Self::map_error(id, e));
        self.report(CartOperation::Add, result)
    }

    /// Removes `id` from the cart.
    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: ProductId) -> Result<CartEntry, CartError> {
        debug!("Sending request");
        let result = self
            .inner
            .delete(id)
            .await
            .map_err(|e| Self::map_error(id, e));
        self.report(CartOperation::Remove, result)
    }

    /// Sets the amount of `id` to exactly `amount`.
    ///
    /// An `amount` of zero or less is ignored: `Ok(None)`, no request, no notice.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, id: ProductId, amount: i64) -> Result<Option<CartEntry>, CartError> {
        let Ok(amount) = u64::try_from(amount) else {
            debug!("Ignoring negative amount");
            return Ok(None);
        };
        if amount == 0 {
            debug!("Ignoring zero amount");
            return Ok(None);
        }

        debug!("Sending request");
        let result = self
            .inner
            .update(id, AmountUpdate { amount })
            .await
            .map(Some)
            .map_err(|e| Self::map_error(id, e));
        self.report(CartOperation::UpdateAmount, result)
    }
}
