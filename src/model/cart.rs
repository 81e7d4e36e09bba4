//! Cart entries and the cart state they form.

use super::product::{take_title, Product, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One product selection in the cart.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// so a [`ResourceActor`](crate::framework::ResourceActor) can own the cart.
/// See [`cart_actor::entity`](crate::cart_actor::entity) for the stock rules.
///
/// Serialized flat, product fields and `amount` side by side, which is the
/// shape stored in the persistence slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCartEntry")]
pub struct CartEntry {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub amount: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartEntry {
    /// Copies the catalog fields of `product` into a new entry.
    ///
    /// The entry is keyed by `id`, whatever id the catalog echoed back.
    /// Catalog fields named like an entry field (`amount` in particular) are
    /// dropped; the entry's own value wins.
    pub fn from_product(id: ProductId, product: Product, amount: u32) -> Self {
        let Product {
            title,
            price,
            image,
            mut extra,
            ..
        } = product;
        extra.retain(|key, _| !ENTRY_FIELDS.contains(&key.as_str()));
        Self {
            id,
            title,
            price,
            image,
            amount,
            extra,
        }
    }
}

const ENTRY_FIELDS: [&str; 5] = ["id", "title", "price", "image", "amount"];

#[derive(Deserialize)]
struct RawCartEntry {
    id: ProductId,
    title: Option<String>,
    price: f64,
    #[serde(default)]
    image: String,
    amount: u32,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawCartEntry> for CartEntry {
    type Error = String;

    fn try_from(raw: RawCartEntry) -> Result<Self, Self::Error> {
        let mut extra = raw.extra;
        Ok(Self {
            id: raw.id,
            title: take_title(raw.title, &mut extra)?,
            price: raw.price,
            image: raw.image,
            amount: raw.amount,
            extra,
        })
    }
}

/// Payload of an add request: one more unit of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddProduct;

/// Payload of a set-amount request. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountUpdate {
    pub amount: u64,
}

/// The ordered list of entries a shopper has selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState(Vec<CartEntry>);

impl CartState {
    pub fn new(entries: Vec<CartEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<CartEntry> {
        self.0
    }

    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.0.iter().find(|entry| entry.id == id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all amounts.
    pub fn total_items(&self) -> u64 {
        self.0.iter().map(|entry| u64::from(entry.amount)).sum()
    }

    /// Amount in cart per product, for badges on a product grid.
    pub fn amount_by_product(&self) -> HashMap<ProductId, u32> {
        self.0.iter().map(|entry| (entry.id, entry.amount)).collect()
    }

    /// Parses a stored cart.
    ///
    /// Entries with a zero amount are dropped; duplicate ids are left for the
    /// actor, which keeps the first.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut state: Self = serde_json::from_str(raw)?;
        state.0.retain(|entry| entry.amount > 0);
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<Vec<CartEntry>> for CartState {
    fn from(entries: Vec<CartEntry>) -> Self {
        Self(entries)
    }
}
