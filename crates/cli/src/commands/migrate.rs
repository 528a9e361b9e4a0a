//! Database migration command.
//!
//! Applies the migrations in `crates/api/migrations/`:
//!
//! ```text
//! migrations/
//! └── 20260101000001_create_customer.sql
//! ```

use super::{CommandError, connect};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
