//! Print stored customers.

use std::io::Write;

use super::{CommandError, customer_service};

/// Write every customer to stdout, one JSON object per line.
///
/// # Errors
///
/// Returns an error if the database query or the write fails.
pub async fn run() -> Result<(), CommandError> {
    let service = customer_service().await?;
    let customers = service.get_all_customers().await?;

    let mut out = std::io::stdout().lock();
    for customer in &customers {
        serde_json::to_writer(&mut out, customer)?;
        // Broken pipe (e.g. piping into `head`) just ends the listing
        if writeln!(out).is_err() {
            break;
        }
    }

    tracing::info!(count = customers.len(), "Listed customers");
    Ok(())
}
