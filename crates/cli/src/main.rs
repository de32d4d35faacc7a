//! Shelfcart CLI - Inspect and edit a file-backed cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! shelfcart show
//!
//! # Add three of a tiered item
//! shelfcart add --id bulk --name "Bulk Pack" --price 100 -q 3 \
//!     --tier 1:2:90 --tier 3:*:80:15
//!
//! # Set a quantity (zero or below removes the item)
//! shelfcart update bulk -- -1
//!
//! # Use another cart file
//! shelfcart --dir /tmp/carts --key guest-cart count
//! ```
//!
//! # Environment Variables
//!
//! - `SHELFCART_STORAGE_DIR`, `SHELFCART_STORAGE_KEY`, `SHELFCART_CURRENCY` -
//!   see `shelfcart::config`
//! - `SHELFCART_LOG_FORMAT` - set to `json` for JSON log lines
//! - `RUST_LOG` - log filter (default: `shelfcart=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shelfcart::{CartConfig, CartContext, ProductKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "shelfcart")]
#[command(author, version, about = "Shelfcart cart tools")]
struct Cli {
    /// Directory holding persisted carts (overrides `SHELFCART_STORAGE_DIR`)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Storage key of the cart (overrides `SHELFCART_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every line with its price and the subtotal
    Show,
    /// Add an item, merging with an existing line of the same id
    Add {
        /// Product identifier
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: String,

        /// Product kind (`physical`, `digital`, `course`)
        #[arg(long, default_value = "physical")]
        kind: ProductKind,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Product slug
        #[arg(long)]
        slug: Option<String>,

        /// Image reference
        #[arg(long)]
        image: Option<String>,

        /// Quantity tier as `MIN:MAX:PRICE[:COURIER]`; use `*` for no maximum
        #[arg(long = "tier")]
        tiers: Vec<String>,
    },
    /// Remove a line
    Remove {
        /// Product identifier
        id: String,
    },
    /// Set the quantity of a line; zero or below removes it
    Update {
        /// Product identifier
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
    /// Print the number of items
    Count,
    /// Print the total price
    Total,
}

const DEFAULT_LOG_FILTER: &str = "shelfcart=info";

/// Logging settings, read after `.env` has been loaded.
#[derive(Debug, PartialEq, Eq)]
struct LogSettings {
    filter: String,
    json: bool,
}

impl LogSettings {
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            filter: lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            json: lookup("SHELFCART_LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        }
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays clean.
fn init_tracing(settings: &LogSettings) {
    let env_filter = tracing_subscriber::EnvFilter::try_new(&settings.filter)
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let (plain_layer, json_layer) = if settings.json {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(plain_layer)
        .with(json_layer)
        .init();
}

fn main() {
    // Load .env first so it can set RUST_LOG and SHELFCART_LOG_FORMAT
    let _ = dotenvy::dotenv();
    init_tracing(&LogSettings::from_lookup(|key| std::env::var(key).ok()));

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        shelfcart::storage::validate_key(&key)?;
        config.storage_key = key;
    }

    let mut ctx = CartContext::from_config(&config);
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Show => commands::cart::show(&ctx, &mut out)?,
        Commands::Add {
            id,
            name,
            price,
            kind,
            quantity,
            slug,
            image,
            tiers,
        } => {
            let item = commands::cart::build_item(commands::cart::NewItem {
                id,
                name,
                price: &price,
                kind,
                quantity,
                slug,
                image,
                tiers: &tiers,
            })?;
            commands::cart::add(&mut ctx, item, &mut out)?;
        }
        Commands::Remove { id } => commands::cart::remove(&mut ctx, &id, &mut out)?,
        Commands::Update { id, quantity } => {
            commands::cart::update(&mut ctx, &id, quantity, &mut out)?;
        }
        Commands::Clear => commands::cart::clear(&mut ctx, &mut out)?,
        Commands::Count => commands::cart::count(&ctx, &mut out)?,
        Commands::Total => commands::cart::total(&ctx, &mut out)?,
    }
    Ok(())
}
