//! Küyen CLI - Catalog seeding and cart inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog file with the sample collection
//! kuyen-cli seed
//!
//! # List catalog products, filtered and sorted
//! kuyen-cli products list --category gotico --sort price_asc
//!
//! # Show the persisted cart snapshot
//! kuyen-cli cart show
//!
//! # Remove the persisted cart snapshot
//! kuyen-cli cart clear
//! ```
//!
//! The data directory defaults to `data/` and can be overridden with
//! `KUYEN_DATA_DIR` (or a `.env` file).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kuyen-cli")]
#[command(author, version, about = "Küyen CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the catalog file with the sample collection
    Seed {
        /// Overwrite an existing catalog file
        #[arg(long)]
        force: bool,
    },
    /// Inspect catalog products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect or reset the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products matching a query
    List {
        /// Category slug (`all` for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive search over name and description
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (`newest`, `price_asc`, `price_desc`)
        #[arg(long, default_value = "newest")]
        sort: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the persisted cart snapshot
    Show,
    /// Remove the persisted cart snapshot
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { force } => commands::seed::run(force).await?,
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                search,
                sort,
            } => commands::products::list(category, search, &sort).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Clear => commands::cart::clear()?,
        },
    }
    Ok(())
}
