//! # Catalog
//!
//! The storefront backend seen from the cart: two reads, `stock/{id}` and
//! `products/{id}`. The cart only talks to it through [`Catalog`], so tests can
//! plug in a stub and production uses [`HttpCatalog`].

pub mod error;
pub mod http;

pub use error::*;
pub use http::*;

use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;

/// Read access to stock levels and product descriptions.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Current available quantity. Never cached.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;

    /// Descriptive fields copied into a new cart entry.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}
