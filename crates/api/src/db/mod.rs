//! Data access for customer records.
//!
//! # Backends
//!
//! Two interchangeable implementations of [`CustomerDao`]:
//!
//! - [`InMemoryCustomerDao`] - ordered in-process collection, seeded with demo rows
//! - [`PgCustomerDao`] - `PostgreSQL` through parameterized SQL
//!
//! Both honour the same contract, including the email uniqueness invariant,
//! so the service layer never needs to know which one it is talking to.
//!
//! # Database: `customer`
//!
//! ## Tables
//!
//! - `customer` - id, name, email (unique), age
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p customer-registry-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use customer_registry_core::{Customer, CustomerId, Email};

use crate::config::{ApiConfig, Backend};

pub use memory::InMemoryCustomerDao;
pub use postgres::PgCustomerDao;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// An update was requested for a customer that was never persisted.
    #[error("customer has no id")]
    MissingId,

    /// No further customer ids can be assigned.
    #[error("customer id space exhausted")]
    IdExhausted,
}

/// Storage capability used by the customer service.
///
/// Methods mirror single storage statements: they do not check for
/// existence before deleting or updating. Callers that need "must exist"
/// semantics check with [`CustomerDao::exists_person_with_id`] first.
#[async_trait]
pub trait CustomerDao: Send + Sync {
    /// All stored customers.
    async fn select_all_customers(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// The customer with the given id, if any.
    async fn select_customer_by_id(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Persist a new customer. The backend assigns the id; any id already on
    /// `customer` is ignored.
    ///
    /// Fails with [`RepositoryError::Conflict`] if the email is already stored.
    async fn insert_customer(&self, customer: &Customer) -> Result<(), RepositoryError>;

    /// Remove the customer with the given id. Missing ids are a no-op.
    async fn delete_customer(&self, id: CustomerId) -> Result<(), RepositoryError>;

    /// Overwrite name, email and age of the stored row keyed by `customer.id()`.
    ///
    /// Fails with [`RepositoryError::MissingId`] for unpersisted customers and
    /// with [`RepositoryError::Conflict`] if another row holds the new email.
    async fn update_customer(&self, customer: &Customer) -> Result<(), RepositoryError>;

    /// Whether any stored customer has exactly this email.
    async fn exists_person_with_email(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// Whether a customer with this id is stored.
    async fn exists_person_with_id(&self, id: CustomerId) -> Result<bool, RepositoryError>;

    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Errors raised while selecting and opening a backend.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("postgres backend selected but no database URL configured")]
    MissingDatabaseUrl,
    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),
}

/// Open the backend named by the configuration.
///
/// # Errors
///
/// Returns `ConnectError` if the `postgres` backend is selected and the pool
/// cannot be created.
pub async fn connect(config: &ApiConfig) -> Result<Arc<dyn CustomerDao>, ConnectError> {
    match config.backend {
        Backend::Memory => {
            tracing::info!("Using in-memory customer store");
            Ok(Arc::new(InMemoryCustomerDao::with_demo_customers()))
        }
        Backend::Postgres => {
            let url = config
                .database_url
                .as_ref()
                .ok_or(ConnectError::MissingDatabaseUrl)?;
            let pool = create_pool(url).await?;
            tracing::info!("Database pool created");
            Ok(Arc::new(PgCustomerDao::new(pool)))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    #[tokio::test]
    async fn test_connect_memory_backend_is_seeded() {
        let config = ApiConfig::in_memory(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        let dao = connect(&config).await.unwrap();

        assert_eq!(dao.select_all_customers().await.unwrap().len(), 2);
        assert!(dao.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_connect_postgres_without_url_fails() {
        let mut config = ApiConfig::in_memory(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        config.backend = Backend::Postgres;

        let result = connect(&config).await;
        assert!(matches!(result, Err(ConnectError::MissingDatabaseUrl)));
    }
}
