//! HTTP route handlers for the customer API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (pings the backend)
//!
//! # Customers
//! GET    /api/v1/customers        - List customers
//! POST   /api/v1/customers        - Register a customer
//! GET    /api/v1/customers/{id}   - Get one customer
//! PUT    /api/v1/customers/{id}   - Partially update a customer
//! DELETE /api/v1/customers/{id}   - Delete a customer
//! ```

pub mod customers;
pub mod health;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list).post(customers::register))
        .route(
            "/{id}",
            get(customers::show)
                .put(customers::update)
                .delete(customers::delete),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/v1/customers", customer_routes())
}

/// Build the complete application with state and request tracing applied.
pub fn app(state: AppState) -> Router {
    routes().with_state(state).layer(TraceLayer::new_for_http())
}
