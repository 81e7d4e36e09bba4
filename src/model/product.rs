/// Catalog-side types returned by the storefront API.
///
/// [`Product`] is copied into a [`CartEntry`](crate::model::CartEntry) when it is
/// first added; [`Stock`] is read on every quantity change and never stored.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Type-safe identifier for Products.
///
/// Serializes as a bare number, the shape the API and the stored cart use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptive product fields as served by `products/{id}`.
///
/// Fields this crate does not know about are kept in `extra` and travel with
/// the cart entry unchanged.
///
/// `title` is read from `name` when the body has no `title`; a body with both
/// keeps `name` in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawProduct {
    id: ProductId,
    title: Option<String>,
    price: f64,
    #[serde(default)]
    image: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawProduct> for Product {
    type Error = String;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let mut extra = raw.extra;
        Ok(Self {
            id: raw.id,
            title: take_title(raw.title, &mut extra)?,
            price: raw.price,
            image: raw.image,
            extra,
        })
    }
}

/// Resolves the display title: `title` if present, else a string `name`
/// taken out of `extra`.
pub(crate) fn take_title(title: Option<String>, extra: &mut Map<String, Value>) -> Result<String, String> {
    if let Some(title) = title {
        return Ok(title);
    }
    match extra.remove("name") {
        Some(Value::String(name)) => Ok(name),
        Some(_) => Err("field `name` is not a string".to_string()),
        None => Err("missing field `title`".to_string()),
    }
}

/// Available quantity as served by `stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub amount: u32,
}
