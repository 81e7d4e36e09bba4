//! # Persistence Slot
//!
//! A string-keyed, string-valued store that survives restarts, the role browser
//! `localStorage` plays for a web storefront.
//!
//! - [`FileStorage`] - one JSON object file holding every key
//! - [`MemoryStorage`] - in-process map, for tests and throwaway sessions
//! - [`SlotWriter`] - the single task that mirrors committed carts into a slot

pub mod file;
pub mod memory;
pub mod writer;

pub use file::*;
pub use memory::*;
pub use writer::*;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot encode storage file {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable key-value slots.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
