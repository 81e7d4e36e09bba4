//! # rocketshoes-cart
//!
//! Command line front end for the cart. Each invocation is one session: the
//! stored cart is loaded, the command runs against the storefront API, notices
//! and the resulting cart are printed, and the cart is flushed back to storage.

use clap::{Parser, Subcommand};
use rocketshoes_cart::catalog::HttpCatalog;
use rocketshoes_cart::config::CartConfig;
use rocketshoes_cart::lifecycle::{setup_tracing, CartSystem};
use rocketshoes_cart::model::{CartState, ProductId};
use rocketshoes_cart::notify::ChannelNotifier;
use rocketshoes_cart::storage::FileStorage;
use std::sync::Arc;
use tracing::{info, Instrument};

#[derive(Parser, Debug)]
#[command(name = "rocketshoes-cart", version, about = "RocketShoes shopping cart")]
struct Cli {
    /// Storefront API base URL
    #[arg(long, env = "ROCKETSHOES_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored cart
    Show,
    /// Add one unit of a product
    Add { id: u32 },
    /// Remove a product from the cart
    Remove { id: u32 },
    /// Set the amount of a product already in the cart
    Update {
        id: u32,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let cli = Cli::parse();
    let mut config = CartConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    info!(api_url = %config.api_url, storage = %config.storage_path.display(), "Starting cart session");

    let catalog = HttpCatalog::new(config.api_url.clone(), config.request_timeout).map_err(|e| e.to_string())?;
    let storage = FileStorage::new(config.storage_path.clone());
    let (notifier, mut notices) = ChannelNotifier::new();

    let system = CartSystem::start(&config, Arc::new(catalog), Arc::new(storage), Arc::new(notifier))
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("cart_command", command = ?cli.command);
    let outcome = async {
        let client = &system.cart_client;
        match cli.command {
            Command::Show => Ok(()),
            Command::Add { id } => client.add_product(ProductId(id)).await.map(|_| ()),
            Command::Remove { id } => client.remove_product(ProductId(id)).await.map(|_| ()),
            Command::Update { id, amount } => client
                .update_product_amount(ProductId(id), amount)
                .await
                .map(|_| ()),
        }
    }
    .instrument(span)
    .await;

    while let Ok(notice) = notices.try_recv() {
        eprintln!("{notice}");
    }
    if let Err(e) = &outcome {
        info!(error = %e, "Command abandoned, cart unchanged");
    }

    print_cart(&system.cart_client.cart());

    system.shutdown().await?;
    Ok(())
}

fn print_cart(cart: &CartState) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for entry in cart.entries() {
        println!(
            "{:>6}  {:<40} {:>4} x {:>10.2}",
            entry.id, entry.title, entry.amount, entry.price
        );
    }
    println!("{} item(s)", cart.total_items());
}
