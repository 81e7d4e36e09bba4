//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup with the loaded cart size, shutdown
//! - **Cart operations**: `Upsert`, `Update`, `Delete` with the product id, and
//!   the reason when one is abandoned
//! - **Catalog calls**: one span per `stock` / `products` request
//! - **Persistence**: each snapshot written, and write failures
//! - **Notices**: every notice shown to the shopper, at error level
//!
//! ## Usage Examples
//!
//! ```bash
//! # Operations and persistence
//! RUST_LOG=info rocketshoes-cart add 1
//!
//! # Payloads and catalog responses
//! RUST_LOG=debug rocketshoes-cart update 1 3
//! ```
//!
//! With `RUST_LOG=info` adding a product that is already in the cart reads:
//!
//! ```text
//! INFO Cart loaded key="@RocketShoes:cart" size=1
//! INFO Actor started entity_type="CartEntry" size=1
//! INFO add_product{id=ProductId(1)}: Upserted entity_type="CartEntry" id=1 size=1
//! INFO Writer stopped key="@RocketShoes:cart" writes=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Module paths add nothing; entity_type and key identify the source
        .compact()
        .init();
}
