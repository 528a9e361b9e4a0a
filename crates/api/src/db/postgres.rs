//! `PostgreSQL` customer repository.
//!
//! Each [`CustomerDao`] method is exactly one parameterized statement against
//! the `customer` table. Rows are read in the fixed column order
//! id, name, email, age.

use async_trait::async_trait;
use sqlx::PgPool;

use customer_registry_core::{Customer, CustomerId, Email};

use super::{CustomerDao, RepositoryError};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    name: String,
    email: String,
    age: i32,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self::with_id(CustomerId::new(row.id), row.name, email, row.age))
    }
}

/// Map a unique violation on the email constraint to `Conflict`.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Repository
// =============================================================================

/// Customer repository backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgCustomerDao {
    pool: PgPool,
}

impl PgCustomerDao {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerDao for PgCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, email, age
            FROM customer
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }

    async fn select_customer_by_id(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, email, age
            FROM customer
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    async fn insert_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO customer (name, email, age)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.age)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let id = customer.id().ok_or(RepositoryError::MissingId)?;

        sqlx::query(
            r"
            UPDATE customer
            SET name = $1, email = $2, age = $3
            WHERE id = $4
            ",
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.age)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn exists_person_with_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM customer WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_person_with_id(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1)
            ",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = CustomerRow {
            id: 1,
            name: "Art".to_owned(),
            email: "art@gmail.com".to_owned(),
            age: 33,
        };

        let customer = Customer::try_from(row).unwrap();
        assert_eq!(customer.id(), Some(CustomerId::new(1)));
        assert_eq!(customer.name, "Art");
        assert_eq!(customer.email.as_str(), "art@gmail.com");
        assert_eq!(customer.age, 33);
    }

    #[test]
    fn test_row_conversion_rejects_corrupt_email() {
        let row = CustomerRow {
            id: 1,
            name: "Art".to_owned(),
            email: "not-an-email".to_owned(),
            age: 33,
        };

        let result = Customer::try_from(row);
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_non_database_errors_are_not_conflicts() {
        let err = map_write_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
