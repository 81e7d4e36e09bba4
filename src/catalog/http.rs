//! # HTTP Catalog
//!
//! [`Catalog`] over the storefront REST API with `reqwest`.
use super::{Catalog, CatalogError};
use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for `GET {base}/stock/{id}` and `GET {base}/products/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Builds a catalog rooted at `base_url`.
    ///
    /// Without a `timeout` a request waits for as long as the server does.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                path,
            });
        }

        let body = response.bytes().await?;
        debug!(%url, bytes = body.len(), "Response received");
        serde_json::from_slice(&body).map_err(|source| CatalogError::Decode { path, source })
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.get_json(format!("stock/{id}")).await
    }

    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get_json(format!("products/{id}")).await
    }
}
