//! Stub storefront backend shared by the integration tests.
#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_cart::config::CartConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
pub struct Backend {
    stock: Arc<Mutex<HashMap<u32, u32>>>,
    products: Arc<Mutex<HashMap<u32, Value>>>,
    stock_hits: Arc<AtomicUsize>,
}

impl Backend {
    /// Registers a product with its stock level.
    pub fn with_product(self, id: u32, title: &str, price: f64, stock: u32) -> Self {
        self.products.lock().unwrap().insert(
            id,
            json!({ "id": id, "title": title, "price": price, "image": format!("https://cdn.rocketshoes.test/{id}.jpg") }),
        );
        self.set_stock(id, stock);
        self
    }

    /// Registers a raw product body, served as-is.
    pub fn with_raw_product(self, id: u32, body: Value, stock: u32) -> Self {
        self.products.lock().unwrap().insert(id, body);
        self.set_stock(id, stock);
        self
    }

    pub fn set_stock(&self, id: u32, amount: u32) {
        self.stock.lock().unwrap().insert(id, amount);
    }

    pub fn stock_hits(&self) -> usize {
        self.stock_hits.load(Ordering::SeqCst)
    }

    /// Serves the backend on an ephemeral local port and returns its base URL.
    pub async fn spawn(self) -> String {
        let app = Router::new()
            .route("/stock/{id}", get(stock))
            .route("/products/{id}", get(product))
            .with_state(self);

        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("stub backend error: {e}");
            }
        });
        format!("http://{addr}")
    }
}

async fn stock(State(backend): State<Backend>, Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
    backend.stock_hits.fetch_add(1, Ordering::SeqCst);
    let amount = backend.stock.lock().unwrap().get(&id).copied();
    amount
        .map(|amount| Json(json!({ "id": id, "amount": amount })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn product(State(backend): State<Backend>, Path(id): Path<u32>) -> Result<Json<Value>, StatusCode> {
    let body = backend.products.lock().unwrap().get(&id).cloned();
    body.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Configuration pointing at `api_url`, with a small mailbox.
pub fn config(api_url: &str) -> CartConfig {
    CartConfig {
        api_url: api_url.to_string(),
        mailbox_capacity: 8,
        ..CartConfig::default()
    }
}
