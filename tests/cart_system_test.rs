mod common;

use common::{config, Backend};
use rocketshoes_cart::cart_actor::CartError;
use rocketshoes_cart::catalog::HttpCatalog;
use rocketshoes_cart::lifecycle::CartSystem;
use rocketshoes_cart::model::{CartState, ProductId};
use rocketshoes_cart::notify::{ChannelNotifier, Notice};
use rocketshoes_cart::storage::{FileStorage, MemoryStorage, Storage};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

const KEY: &str = "@RocketShoes:cart";

async fn start(base_url: &str, storage: Arc<dyn Storage>) -> (CartSystem, UnboundedReceiver<Notice>) {
    let catalog = HttpCatalog::new(base_url, None).expect("catalog");
    let (notifier, notices) = ChannelNotifier::new();
    let system = CartSystem::start(&config(base_url), Arc::new(catalog), storage, Arc::new(notifier))
        .await
        .expect("Failed to start cart");
    (system, notices)
}

async fn stored_cart(storage: &dyn Storage) -> CartState {
    let raw = storage
        .get(KEY)
        .await
        .expect("storage read")
        .expect("cart slot missing");
    CartState::from_json(&raw).expect("stored cart is valid")
}

/// Full shopping session against a product with five units in stock.
#[tokio::test]
async fn test_add_update_exceed_remove_session() {
    let base_url = Backend::default()
        .with_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 5)
        .spawn()
        .await;
    let storage = Arc::new(MemoryStorage::new());
    let (system, mut notices) = start(&base_url, storage.clone()).await;
    let cart = &system.cart_client;

    let added = cart.add_product(ProductId(1)).await.expect("Failed to add product");
    assert_eq!(added.amount, 1);
    assert_eq!(added.title, "Tênis de Caminhada Leve Confortável");
    assert_eq!(added.price, 179.9);

    let updated = cart
        .update_product_amount(ProductId(1), 5)
        .await
        .expect("Failed to update amount")
        .expect("update was ignored");
    assert_eq!(updated.amount, 5);

    // A sixth unit is above stock: rejected, amount unchanged.
    let result = cart.add_product(ProductId(1)).await;
    assert_eq!(
        result,
        Err(CartError::StockExceeded {
            id: ProductId(1),
            requested: 6,
            available: 5,
        })
    );
    assert_eq!(notices.recv().await, Some(Notice::StockExceeded));
    assert_eq!(cart.cart().get(ProductId(1)).map(|e| e.amount), Some(5));

    let removed = cart.remove_product(ProductId(1)).await.expect("Failed to remove product");
    assert_eq!(removed.amount, 5);
    assert!(cart.cart().is_empty());

    system.shutdown().await.expect("Failed to shutdown");
    assert!(stored_cart(storage.as_ref()).await.is_empty());
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_repeated_adds_keep_one_entry_in_insertion_order() {
    let base_url = Backend::default()
        .with_product(1, "Tênis VR Caminhada Confortável", 139.9, 10)
        .with_product(2, "Tênis Adidas Duramo Lite", 219.9, 10)
        .spawn()
        .await;
    let (system, _notices) = start(&base_url, Arc::new(MemoryStorage::new())).await;
    let cart = &system.cart_client;

    for _ in 0..3 {
        cart.add_product(ProductId(2)).await.expect("Failed to add product");
    }
    cart.add_product(ProductId(1)).await.expect("Failed to add product");

    let state = cart.cart();
    let ids: Vec<ProductId> = state.entries().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![ProductId(2), ProductId(1)]);
    assert_eq!(state.get(ProductId(2)).map(|e| e.amount), Some(3));
    assert_eq!(state.total_items(), 4);

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_add_out_of_stock_and_unknown_products() {
    let base_url = Backend::default()
        .with_product(1, "Tênis Esgotado", 99.9, 0)
        .spawn()
        .await;
    let (system, mut notices) = start(&base_url, Arc::new(MemoryStorage::new())).await;
    let cart = &system.cart_client;

    let result = cart.add_product(ProductId(1)).await;
    assert!(matches!(result, Err(CartError::StockExceeded { requested: 1, available: 0, .. })));
    assert_eq!(notices.recv().await, Some(Notice::StockExceeded));

    let result = cart.add_product(ProductId(404)).await;
    assert!(matches!(result, Err(CartError::Catalog(_))));
    assert_eq!(notices.recv().await, Some(Notice::AddFailed));

    assert!(cart.cart().is_empty());
    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_remove_missing_product_notifies() {
    let base_url = Backend::default().spawn().await;
    let (system, mut notices) = start(&base_url, Arc::new(MemoryStorage::new())).await;

    let result = system.cart_client.remove_product(ProductId(3)).await;
    assert_eq!(result, Err(CartError::NotFound(ProductId(3))));
    assert_eq!(notices.recv().await, Some(Notice::RemoveFailed));

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_update_rules() {
    let backend = Backend::default()
        .with_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 4)
        .with_product(2, "Tênis Adidas Duramo Lite", 219.9, 4);
    let base_url = backend.clone().spawn().await;
    let (system, mut notices) = start(&base_url, Arc::new(MemoryStorage::new())).await;
    let cart = &system.cart_client;
    cart.add_product(ProductId(1)).await.expect("Failed to add product");
    let hits = backend.stock_hits();

    // Zero and negative amounts are ignored without touching the backend.
    assert_eq!(cart.update_product_amount(ProductId(1), 0).await, Ok(None));
    assert_eq!(cart.update_product_amount(ProductId(1), -5).await, Ok(None));
    assert_eq!(backend.stock_hits(), hits);
    assert!(notices.try_recv().is_err());

    // Above stock.
    let result = cart.update_product_amount(ProductId(1), 5).await;
    assert!(matches!(result, Err(CartError::StockExceeded { requested: 5, available: 4, .. })));
    assert_eq!(notices.recv().await, Some(Notice::StockExceeded));

    // Stock is checked before membership.
    let result = cart.update_product_amount(ProductId(2), 9).await;
    assert!(matches!(result, Err(CartError::StockExceeded { .. })));
    assert_eq!(notices.recv().await, Some(Notice::StockExceeded));

    let result = cart.update_product_amount(ProductId(2), 2).await;
    assert_eq!(result, Err(CartError::NotFound(ProductId(2))));
    assert_eq!(notices.recv().await, Some(Notice::UpdateFailed));

    // Lowering the amount also reads the stock, and succeeds.
    let updated = cart.update_product_amount(ProductId(1), 1).await.expect("Failed to update");
    assert_eq!(updated.map(|e| e.amount), Some(1));

    // Stock changes between calls are seen immediately.
    backend.set_stock(1, 1);
    let result = cart.add_product(ProductId(1)).await;
    assert!(matches!(result, Err(CartError::StockExceeded { requested: 2, available: 1, .. })));

    assert_eq!(cart.cart().len(), 1);
    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_concurrent_adds_never_exceed_stock() {
    let base_url = Backend::default()
        .with_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 3)
        .spawn()
        .await;
    let (system, mut notices) = start(&base_url, Arc::new(MemoryStorage::new())).await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let cart = system.cart_client.clone();
        handles.push(tokio::spawn(async move { cart.add_product(ProductId(1)).await }));
    }
    let mut succeeded = 0;
    for handle in handles {
        if handle.await.expect("task panicked").is_ok() {
            succeeded += 1;
        }
    }

    assert_eq!(succeeded, 3);
    assert_eq!(system.cart_client.cart().get(ProductId(1)).map(|e| e.amount), Some(3));
    assert_eq!(notices.recv().await, Some(Notice::StockExceeded));
    assert_eq!(notices.recv().await, Some(Notice::StockExceeded));

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_subscribers_see_each_commit() {
    let base_url = Backend::default()
        .with_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 3)
        .spawn()
        .await;
    let (system, _notices) = start(&base_url, Arc::new(MemoryStorage::new())).await;
    let mut updates = system.cart_client.subscribe();

    system.cart_client.add_product(ProductId(1)).await.expect("Failed to add product");
    updates.changed().await.expect("actor stopped");
    assert_eq!(updates.borrow_and_update()[0].amount, 1);

    // A rejected operation publishes nothing.
    let _ = system.cart_client.update_product_amount(ProductId(1), 10).await;
    assert!(!updates.has_changed().expect("actor stopped"));

    drop(updates);
    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_cart_survives_restart_in_file_storage() {
    let base_url = Backend::default()
        .with_raw_product(
            1,
            json!({ "id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "a.jpg", "brand": "Rocket" }),
            10,
        )
        .with_product(2, "Tênis VR Caminhada Confortável", 139.9, 10)
        .spawn()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let (system, _notices) = start(&base_url, Arc::new(FileStorage::new(&path))).await;
    system.cart_client.add_product(ProductId(1)).await.expect("Failed to add product");
    system.cart_client.add_product(ProductId(2)).await.expect("Failed to add product");
    system.cart_client.add_product(ProductId(1)).await.expect("Failed to add product");
    system.shutdown().await.expect("Failed to shutdown");

    let storage = Arc::new(FileStorage::new(&path));
    let stored = stored_cart(storage.as_ref()).await;
    assert_eq!(stored.len(), 2);

    let (system, _notices) = start(&base_url, storage).await;
    let state = system.cart_client.cart();
    assert_eq!(state, stored);
    let first = &state.entries()[0];
    assert_eq!(first.id, ProductId(1));
    assert_eq!(first.amount, 2);
    assert_eq!(first.extra.get("brand"), Some(&json!("Rocket")));

    system.cart_client.add_product(ProductId(2)).await.expect("Failed to add product");
    assert_eq!(system.cart_client.cart().get(ProductId(2)).map(|e| e.amount), Some(2));
    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_invalid_slot_starts_empty_and_is_replaced() {
    let base_url = Backend::default()
        .with_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 2)
        .spawn()
        .await;
    let storage = Arc::new(MemoryStorage::with_slot(KEY, "{not a cart"));

    let (system, _notices) = start(&base_url, storage.clone()).await;
    assert!(system.cart_client.cart().is_empty());

    // Untouched until something is committed.
    assert_eq!(storage.get(KEY).await.unwrap().as_deref(), Some("{not a cart"));

    system.cart_client.add_product(ProductId(1)).await.expect("Failed to add product");
    system.shutdown().await.expect("Failed to shutdown");

    let stored = stored_cart(storage.as_ref()).await;
    assert_eq!(stored.get(ProductId(1)).map(|e| e.amount), Some(1));
}

#[tokio::test]
async fn test_remove_takes_out_only_that_entry() {
    let base_url = Backend::default()
        .with_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 10)
        .with_product(2, "Tênis VR Caminhada Confortável", 139.9, 10)
        .with_product(3, "Tênis Adidas Duramo Lite", 219.9, 10)
        .spawn()
        .await;
    let storage = Arc::new(MemoryStorage::new());
    let (system, _notices) = start(&base_url, storage.clone()).await;
    let cart = &system.cart_client;

    cart.add_product(ProductId(1)).await.expect("Failed to add product");
    cart.add_product(ProductId(2)).await.expect("Failed to add product");
    cart.add_product(ProductId(3)).await.expect("Failed to add product");
    cart.update_product_amount(ProductId(1), 2).await.expect("Failed to update amount");
    cart.update_product_amount(ProductId(3), 4).await.expect("Failed to update amount");

    let removed = cart.remove_product(ProductId(2)).await.expect("Failed to remove product");
    assert_eq!(removed.id, ProductId(2));

    let remaining: Vec<(ProductId, u32)> = cart.cart().entries().iter().map(|e| (e.id, e.amount)).collect();
    assert_eq!(remaining, vec![(ProductId(1), 2), (ProductId(3), 4)]);

    system.shutdown().await.expect("Failed to shutdown");
    let stored: Vec<(ProductId, u32)> = stored_cart(storage.as_ref())
        .await
        .entries()
        .iter()
        .map(|e| (e.id, e.amount))
        .collect();
    assert_eq!(stored, vec![(ProductId(1), 2), (ProductId(3), 4)]);
}

#[tokio::test]
async fn test_duplicate_stored_ids_keep_the_first_entry() {
    let base_url = Backend::default()
        .with_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 10)
        .with_product(2, "Tênis VR Caminhada Confortável", 139.9, 10)
        .spawn()
        .await;
    let stored = json!([
        { "id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "a.jpg", "amount": 2 },
        { "id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "a.jpg", "amount": 7 }
    ]);
    let storage = Arc::new(MemoryStorage::with_slot(KEY, stored.to_string()));

    let (system, _notices) = start(&base_url, storage.clone()).await;
    let state = system.cart_client.cart();
    assert_eq!(state.len(), 1);
    assert_eq!(state.get(ProductId(1)).map(|e| e.amount), Some(2));

    system.cart_client.add_product(ProductId(2)).await.expect("Failed to add product");
    system.shutdown().await.expect("Failed to shutdown");

    let stored: Vec<(ProductId, u32)> = stored_cart(storage.as_ref())
        .await
        .entries()
        .iter()
        .map(|e| (e.id, e.amount))
        .collect();
    assert_eq!(stored, vec![(ProductId(1), 2), (ProductId(2), 1)]);
}

#[tokio::test]
async fn test_truncated_storage_file_starts_empty_and_recovers() {
    let base_url = Backend::default()
        .with_product(1, "Tênis de Caminhada Leve Confortável", 179.9, 3)
        .spawn()
        .await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ truncated").unwrap();

    let (system, _notices) = start(&base_url, Arc::new(FileStorage::new(&path))).await;
    assert!(system.cart_client.cart().is_empty());
    system.cart_client.add_product(ProductId(1)).await.expect("Failed to add product");
    system.shutdown().await.expect("Failed to shutdown");

    let stored = stored_cart(&FileStorage::new(&path)).await;
    assert_eq!(stored.get(ProductId(1)).map(|e| e.amount), Some(1));
}

#[tokio::test]
async fn test_catalog_amount_field_does_not_break_restart() {
    let base_url = Backend::default()
        .with_raw_product(
            1,
            json!({ "id": 1, "title": "Tênis de Caminhada Leve Confortável", "price": 179.9, "image": "a.jpg", "amount": 99 }),
            5,
        )
        .spawn()
        .await;
    let storage = Arc::new(MemoryStorage::new());

    let (system, _notices) = start(&base_url, storage.clone()).await;
    let added = system.cart_client.add_product(ProductId(1)).await.expect("Failed to add product");
    assert_eq!(added.amount, 1);
    assert!(added.extra.get("amount").is_none());
    system.shutdown().await.expect("Failed to shutdown");

    let (system, _notices) = start(&base_url, storage).await;
    assert_eq!(system.cart_client.cart().get(ProductId(1)).map(|e| e.amount), Some(1));
    system.shutdown().await.expect("Failed to shutdown");
}
