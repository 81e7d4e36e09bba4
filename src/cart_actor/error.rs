//! Error types for the Cart actor.

use crate::catalog::CatalogError;
use crate::model::ProductId;
use crate::notify::Notice;
use thiserror::Error;

/// The three cart operations, used to pick the notice for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The requested amount exceeds the available stock.
    #[error("Insufficient stock for product {id}: requested {requested}, available {available}")]
    StockExceeded {
        id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// The stock or product lookup failed.
    #[error("Catalog lookup failed: {0}")]
    Catalog(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// The notice shown to the shopper when `operation` fails with this error.
    pub fn notice(&self, operation: CartOperation) -> Notice {
        match (self, operation) {
            (CartError::StockExceeded { .. }, _) => Notice::StockExceeded,
            (_, CartOperation::Add) => Notice::AddFailed,
            (_, CartOperation::Remove) => Notice::RemoveFailed,
            (_, CartOperation::UpdateAmount) => Notice::UpdateFailed,
        }
    }
}

impl From<CatalogError> for CartError {
    fn from(e: CatalogError) -> Self {
        CartError::Catalog(e.to_string())
    }
}
