use crate::cart_actor::{self, CartContext};
use crate::catalog::Catalog;
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::model::{CartEntry, CartState};
use crate::notify::Notifier;
use crate::storage::{SlotWriter, Storage, StorageError};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The runtime orchestrator for one shopping session.
///
/// `CartSystem` is responsible for:
/// - **Loading**: Reading the persisted cart before anything else runs
/// - **Dependency Wiring**: Injecting the catalog into the cart actor
/// - **Persistence**: Running the [`SlotWriter`] that mirrors every commit
/// - **Lifecycle Management**: Stopping the actor and flushing the writer
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::start(&config, catalog, storage, notifier).await?;
///
/// system.cart_client.add_product(ProductId(1)).await?;
///
/// // Flushes the last cart to storage before returning
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Task handles, actor first, then the writer (shutdown order)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    /// Loads the stored cart and starts the actor and the writer.
    ///
    /// # Errors
    ///
    /// Fails only if the storage backend cannot be read. A slot that is
    /// missing or holds something other than a cart starts an empty cart.
    pub async fn start(
        config: &CartConfig,
        catalog: Arc<dyn Catalog>,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorageError> {
        let entries = load_cart(storage.as_ref(), &config.storage_key).await?;
        info!(key = %config.storage_key, size = entries.len(), "Cart loaded");

        // 1. Create the actor with the stored entries (no dependencies yet)
        let (actor, generic_client) = cart_actor::new(config.mailbox_capacity, entries);

        // 2. The writer watches commits from here on
        let writer = SlotWriter::new(storage, config.storage_key.clone(), generic_client.subscribe());

        // 3. Start with injected context
        let actor_handle = tokio::spawn(actor.run(CartContext::new(catalog)));
        let writer_handle = tokio::spawn(writer.run());

        Ok(Self {
            cart_client: CartClient::new(generic_client, notifier),
            handles: vec![actor_handle, writer_handle],
        })
    }

    /// Gracefully shuts down the session.
    ///
    /// Dropping the client closes the actor's channel; the actor finishes the
    /// requests already queued and exits, which closes the snapshot channel;
    /// the writer then flushes the last cart and exits.
    ///
    /// Clones of [`CartClient`] handed out earlier keep the actor alive, so drop
    /// them first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart...");
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Cart task failed: {:?}", e);
                return Err(format!("Cart task failed: {:?}", e));
            }
        }

        info!("Cart shutdown complete.");
        Ok(())
    }
}

/// Reads the cart stored under `key`.
///
/// Absent or unparsable values give an empty cart.
pub async fn load_cart(storage: &dyn Storage, key: &str) -> Result<Vec<CartEntry>, StorageError> {
    let Some(raw) = storage.get(key).await? else {
        return Ok(Vec::new());
    };
    match CartState::from_json(&raw) {
        Ok(state) => Ok(state.into_entries()),
        Err(e) => {
            warn!(key, error = %e, "Stored cart is invalid, starting empty");
            Ok(Vec::new())
        }
    }
}
