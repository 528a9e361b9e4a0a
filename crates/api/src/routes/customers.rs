//! Customer route handlers.
//!
//! Thin JSON adapters over [`CustomerService`](crate::services::CustomerService);
//! status mapping for failures lives in [`AppError`](crate::error::AppError).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use customer_registry_core::{
    Customer, CustomerId, CustomerRegistrationRequest, CustomerUpdateRequest,
};

use crate::error::Result;
use crate::state::AppState;

/// List all customers.
///
/// GET /api/v1/customers
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    Ok(Json(state.customers().get_all_customers().await?))
}

/// Get one customer.
///
/// GET /api/v1/customers/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>> {
    Ok(Json(state.customers().get_customer(id).await?))
}

/// Register a customer.
///
/// POST /api/v1/customers
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CustomerRegistrationRequest>,
) -> Result<StatusCode> {
    state.customers().add_customer(request).await?;
    Ok(StatusCode::CREATED)
}

/// Partially update a customer and return the stored result.
///
/// PUT /api/v1/customers/{id}
#[instrument(skip(state, request))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(request): Json<CustomerUpdateRequest>,
) -> Result<Json<Customer>> {
    Ok(Json(state.customers().update_customer_by_id(id, request).await?))
}

/// Delete a customer.
///
/// DELETE /api/v1/customers/{id}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode> {
    state.customers().delete_customer_by_id(id).await?;
    Ok(StatusCode::OK)
}
