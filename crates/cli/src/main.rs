//! Customer Registry CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! customer-cli migrate
//!
//! # Register five random demo customers
//! customer-cli seed --count 5
//!
//! # Print every stored customer as JSON lines
//! customer-cli list
//! ```
//!
//! # Environment Variables
//!
//! - `CUSTOMER_API_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "customer-cli")]
#[command(author, version, about = "Customer registry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Register random demo customers
    Seed {
        /// Number of customers to register
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// Print all customers as JSON lines
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { count } => commands::seed::run(count).await?,
        Commands::List => commands::list::run().await?,
    }
    Ok(())
}
