//! Health check handlers.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the storage backend answers before returning OK.
/// Returns 503 Service Unavailable if it does not.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.customers().dao().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(
                backend = %state.config().backend,
                error = %e,
                "Readiness check failed"
            );
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    use async_trait::async_trait;
    use customer_registry_core::{Customer, CustomerId, Email};

    use super::*;
    use crate::config::ApiConfig;
    use crate::db::{CustomerDao, InMemoryCustomerDao, RepositoryError};

    /// Backend whose readiness check always fails.
    struct UnreachableDao(InMemoryCustomerDao);

    #[async_trait]
    impl CustomerDao for UnreachableDao {
        async fn select_all_customers(&self) -> Result<Vec<Customer>, RepositoryError> {
            self.0.select_all_customers().await
        }

        async fn select_customer_by_id(
            &self,
            id: CustomerId,
        ) -> Result<Option<Customer>, RepositoryError> {
            self.0.select_customer_by_id(id).await
        }

        async fn insert_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
            self.0.insert_customer(customer).await
        }

        async fn delete_customer(&self, id: CustomerId) -> Result<(), RepositoryError> {
            self.0.delete_customer(id).await
        }

        async fn update_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
            self.0.update_customer(customer).await
        }

        async fn exists_person_with_email(&self, email: &Email) -> Result<bool, RepositoryError> {
            self.0.exists_person_with_email(email).await
        }

        async fn exists_person_with_id(&self, id: CustomerId) -> Result<bool, RepositoryError> {
            self.0.exists_person_with_id(id).await
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            Err(RepositoryError::DataCorruption("backend unreachable".to_owned()))
        }
    }

    fn state_with(dao: Arc<dyn CustomerDao>) -> AppState {
        let config = ApiConfig::in_memory(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
        AppState::new(config, dao)
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_readiness_ok_when_backend_answers() {
        let state = state_with(Arc::new(InMemoryCustomerDao::empty()));
        assert_eq!(readiness(State(state)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_unavailable_when_backend_fails() {
        let state = state_with(Arc::new(UnreachableDao(InMemoryCustomerDao::empty())));
        assert_eq!(state.config().backend.as_str(), "memory");
        let status = readiness(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
