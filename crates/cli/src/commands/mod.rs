//! CLI subcommands.

pub mod list;
pub mod migrate;
pub mod seed;

use std::sync::Arc;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use customer_registry_api::db::{self, PgCustomerDao, RepositoryError};
use customer_registry_api::services::{CustomerError, CustomerService};
use customer_registry_core::EmailError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Customer error: {0}")]
    Customer(#[from] CustomerError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Connect to the database named by `CUSTOMER_API_DATABASE_URL` or `DATABASE_URL`.
async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("CUSTOMER_API_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("CUSTOMER_API_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}

/// Customer service over the configured `PostgreSQL` database.
async fn customer_service() -> Result<CustomerService, CommandError> {
    let pool = connect().await?;
    Ok(CustomerService::new(Arc::new(PgCustomerDao::new(pool))))
}
