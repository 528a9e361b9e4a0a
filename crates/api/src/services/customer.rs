//! Customer service.
//!
//! Orchestrates a single [`CustomerDao`] and owns the business rules: email
//! uniqueness on registration and update, existence checks before delete,
//! and partial-update merging that rejects no-op updates.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use customer_registry_core::{
    Customer, CustomerId, CustomerRegistrationRequest, CustomerUpdateRequest,
};

use crate::db::{CustomerDao, RepositoryError};

/// Errors returned by [`CustomerService`].
#[derive(Debug, Error)]
pub enum CustomerError {
    /// No customer is stored under the requested id.
    #[error("Customer with ID [{0}] is not found")]
    NotFound(CustomerId),

    /// The email belongs to another stored customer.
    #[error("email already taken")]
    DuplicateEmail,

    /// The update request would not change anything.
    #[error("no data changes found")]
    NoChanges,

    /// Storage backend failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CustomerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => Self::DuplicateEmail,
            other => Self::Repository(other),
        }
    }
}

/// Customer use cases over one storage backend.
#[derive(Clone)]
pub struct CustomerService {
    dao: Arc<dyn CustomerDao>,
}

impl CustomerService {
    /// Create a service backed by the given data-access implementation.
    #[must_use]
    pub fn new(dao: Arc<dyn CustomerDao>) -> Self {
        Self { dao }
    }

    /// The backend this service delegates to.
    #[must_use]
    pub fn dao(&self) -> &dyn CustomerDao {
        self.dao.as_ref()
    }

    /// List every stored customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::Repository` if the backend fails.
    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.dao.select_all_customers().await?)
    }

    /// Fetch one customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if no customer has this id.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        self.dao
            .select_customer_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    /// Register a new customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::DuplicateEmail` if the email is already taken.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn add_customer(
        &self,
        request: CustomerRegistrationRequest,
    ) -> Result<(), CustomerError> {
        if self.dao.exists_person_with_email(&request.email).await? {
            tracing::debug!("Registration rejected, email already taken");
            return Err(CustomerError::DuplicateEmail);
        }

        self.dao.insert_customer(&request.into_customer()).await?;
        tracing::info!("Customer registered");
        Ok(())
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if no customer has this id.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete_customer_by_id(&self, id: CustomerId) -> Result<(), CustomerError> {
        if !self.dao.exists_person_with_id(id).await? {
            return Err(CustomerError::NotFound(id));
        }

        self.dao.delete_customer(id).await?;
        tracing::info!("Customer deleted");
        Ok(())
    }

    /// Apply a partial update and return the stored result.
    ///
    /// Fields that are absent, or equal to the stored value, are left alone.
    /// The email uniqueness check only runs when the email actually changes,
    /// so resubmitting a customer's own email alongside another change is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::NotFound` if no customer has this id,
    /// `CustomerError::DuplicateEmail` if the new email is taken, and
    /// `CustomerError::NoChanges` if nothing would change.
    #[instrument(skip(self, request), fields(customer_id = %id))]
    pub async fn update_customer_by_id(
        &self,
        id: CustomerId,
        request: CustomerUpdateRequest,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self.get_customer(id).await?;
        let mut changed = false;

        if let Some(name) = request.name
            && name != customer.name
        {
            customer.name = name;
            changed = true;
        }

        if let Some(email) = request.email
            && email != customer.email
        {
            if self.dao.exists_person_with_email(&email).await? {
                tracing::debug!(email = %email, "Update rejected, email already taken");
                return Err(CustomerError::DuplicateEmail);
            }
            customer.email = email;
            changed = true;
        }

        if let Some(age) = request.age
            && age != customer.age
        {
            customer.age = age;
            changed = true;
        }

        if !changed {
            tracing::debug!("Update rejected, no data changes");
            return Err(CustomerError::NoChanges);
        }

        self.dao.update_customer(&customer).await?;
        tracing::info!("Customer updated");
        Ok(customer)
    }
}
