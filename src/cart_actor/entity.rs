//! ActorEntity implementation for [`CartEntry`].
//!
//! Every quantity change is checked against a fresh stock read from the
//! [`Catalog`](crate::catalog::Catalog) in the actor's [`CartContext`]. The
//! stock is fetched first in all cases, before the entry is created or changed.

use super::error::CartError;
use super::CartContext;
use crate::framework::ActorEntity;
use crate::model::{AddProduct, AmountUpdate, CartEntry, ProductId, Stock};
use async_trait::async_trait;

/// Returns `requested` as an entry amount if the stock covers it.
fn within_stock(id: ProductId, requested: u64, stock: Stock) -> Result<u32, CartError> {
    let exceeded = CartError::StockExceeded {
        id,
        requested,
        available: stock.amount,
    };
    match u32::try_from(requested) {
        Ok(amount) if amount <= stock.amount => Ok(amount),
        _ => Err(exceeded),
    }
}

#[async_trait]
impl ActorEntity for CartEntry {
    type Id = ProductId;
    type Create = AddProduct;
    type Update = AmountUpdate;
    type Context = CartContext;
    type Error = CartError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// First unit of a product: needs stock of at least one, then the
    /// catalog description.
    async fn on_create(id: ProductId, _params: AddProduct, ctx: &CartContext) -> Result<Self, CartError> {
        let stock = ctx.catalog.stock(id).await?;
        let amount = within_stock(id, 1, stock)?;
        let product = ctx.catalog.product(id).await?;
        Ok(CartEntry::from_product(id, product, amount))
    }

    /// One more unit of a product already in the cart.
    async fn on_upsert(&mut self, _params: AddProduct, ctx: &CartContext) -> Result<(), CartError> {
        let stock = ctx.catalog.stock(self.id).await?;
        self.amount = within_stock(self.id, u64::from(self.amount) + 1, stock)?;
        Ok(())
    }

    /// Stock is checked before the entry is looked up, so an oversized amount
    /// reports stock exceeded even for a product that is not in the cart.
    async fn before_update(id: &ProductId, update: &AmountUpdate, ctx: &CartContext) -> Result<(), CartError> {
        let stock = ctx.catalog.stock(*id).await?;
        within_stock(*id, update.amount, stock).map(|_| ())
    }

    async fn on_update(&mut self, update: AmountUpdate, _ctx: &CartContext) -> Result<(), CartError> {
        // before_update already checked the amount against a u32 stock level.
        self.amount = u32::try_from(update.amount).unwrap_or(u32::MAX);
        Ok(())
    }
}
