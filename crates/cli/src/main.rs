//! Shopfront CLI - Cart inspection and editing tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! sf-cli cart show
//!
//! # Add a product, with metadata copied onto the cart line
//! sf-cli cart add tee-blue --meta name="Pineapple Tee" --meta price=2500
//!
//! # Add a full product record
//! sf-cli cart add --json '{"productId": 42, "name": "Mug", "price": 1200}'
//!
//! # Change a quantity (negative amounts decrease it)
//! sf-cli cart update tee-blue -1
//!
//! # Address the string id "42" rather than the number 42
//! sf-cli cart remove 42 --text-id
//!
//! # Print the theme palette
//! sf-cli theme
//! ```
//!
//! # Commands
//!
//! - `cart` - Show, add, remove, update and clear cart lines
//! - `theme` - Print the theme palette

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopfront_storefront::storage::DEFAULT_STORAGE_PATH;

mod commands;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    /// File backing the durable cart store
    #[arg(
        long,
        global = true,
        env = "SHOPFRONT_STORAGE_PATH",
        default_value = DEFAULT_STORAGE_PATH
    )]
    storage: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or edit the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the theme palette as JSON
    Theme,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show every cart line
    Show,
    /// Add one unit of a product
    Add {
        /// Product identifier (numbers become numeric ids)
        #[arg(required_unless_present = "json")]
        product_id: Option<String>,

        /// Product metadata as `key=value` (values may be JSON)
        #[arg(short, long = "meta", value_name = "KEY=VALUE")]
        meta: Vec<String>,

        /// Whole product record as a JSON object with a `productId`
        #[arg(long, value_name = "RECORD", conflicts_with_all = ["product_id", "meta"])]
        json: Option<String>,

        /// Keep the identifier as a string even if it looks like a number
        #[arg(long)]
        text_id: bool,
    },
    /// Remove a product's line
    Remove {
        /// Product identifier
        product_id: String,

        /// Keep the identifier as a string even if it looks like a number
        #[arg(long)]
        text_id: bool,
    },
    /// Add to (or subtract from) a product's quantity
    Update {
        /// Product identifier
        product_id: String,

        /// Amount to add; negative values decrease the quantity
        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// Keep the identifier as a string even if it looks like a number
        #[arg(long)]
        text_id: bool,
    },
    /// Remove every line
    Clear,
}

fn main() {
    // Command output goes through tracing, so default to info level
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::commands::cart::{self, IdForm};

    match cli.command {
        Commands::Cart { action } => {
            let mut store = cart::open(&cli.storage)?;
            match action {
                CartAction::Show => {}
                CartAction::Add {
                    product_id,
                    meta,
                    json,
                    text_id,
                } => {
                    let product = match (json, product_id) {
                        (Some(record), _) => cart::parse_record(&record)?,
                        (None, Some(id)) => {
                            cart::build_product(&id, IdForm::from_flag(text_id), &meta)?
                        }
                        (None, None) => {
                            return Err("a product id or --json record is required".into());
                        }
                    };
                    cart::add(&mut store, product);
                }
                CartAction::Remove {
                    product_id,
                    text_id,
                } => cart::remove(&mut store, &product_id, IdForm::from_flag(text_id)),
                CartAction::Update {
                    product_id,
                    amount,
                    text_id,
                } => cart::update(&mut store, &product_id, IdForm::from_flag(text_id), amount),
                CartAction::Clear => store.clear_cart(),
            }
            cart::show(&store);
        }
        Commands::Theme => commands::theme::show()?,
    }
    Ok(())
}
