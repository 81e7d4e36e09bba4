//! Error types for catalog lookups.

use thiserror::Error;

/// Errors that can occur while querying the storefront API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The resource does not exist on the backend (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered with another non-success status.
    #[error("Unexpected status {status} for {path}")]
    Status { status: u16, path: String },

    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not the JSON shape we expected.
    #[error("Invalid response for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
