//! # RocketShoes Cart
//!
//! > **The shopping cart of the RocketShoes storefront, as an actor.**
//!
//! One actor task owns the ordered list of cart entries. Shoppers add a product,
//! remove it, or set its amount; every increase is checked against the live
//! stock level from the storefront API, and every committed cart is mirrored to
//! the `@RocketShoes:cart` persistence slot so it survives a restart.
//!
//! ## Core Concepts
//!
//! ### One Owner, Sequential Requests
//! The cart lives inside a [`ResourceActor`](framework::ResourceActor). Requests are
//! processed one at a time, including the stock and product lookups they await,
//! so two clicks on the same product never both read the same stale amount.
//!
//! ### Commit or Nothing
//! Each request works on a copy of the entry. The copy replaces the stored entry
//! only when every check passed; a rejected request leaves the cart exactly as it
//! was and raises one [`Notice`](notify::Notice).
//!
//! ### Snapshots, Not Polling
//! Every commit is published on a `watch` channel. Rendering code subscribes
//! through [`CartClient::subscribe`](clients::CartClient::subscribe); the
//! [`SlotWriter`](storage::SlotWriter) subscribes the same way and persists.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic actor, client, request messages and test mock.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor).
//!
//! ### 2. The Cart ([`cart_actor`], [`model`])
//! [`CartEntry`](model::CartEntry) as an `ActorEntity` with the stock rules, and
//! [`CartError`](cart_actor::CartError) with the notice mapping.
//!
//! ### 3. The Interface ([`clients`])
//! [`CartClient`](clients::CartClient): state, subscription and the three operations.
//!
//! ### 4. The Outside World ([`catalog`], [`storage`], [`notify`], [`config`])
//! Storefront API, persistence slot, shopper notices and environment configuration.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`CartSystem`](lifecycle::CartSystem) loads the stored cart, wires everything,
//! and flushes on [`shutdown`](lifecycle::CartSystem::shutdown).
//!
//! ## Quick Start
//!
//! ```bash
//! ROCKETSHOES_API_URL=http://localhost:3333 RUST_LOG=info cargo run -- add 1
//! cargo run -- update 1 3
//! cargo run -- show
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod storage;
