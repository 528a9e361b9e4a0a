//! In-memory customer store.
//!
//! Keeps customers in insertion order inside a `Vec`. Every operation is a
//! linear scan, which is fine for demo-sized data. Ids come from a counter
//! that only moves forward, so a deleted id is never handed out again.

use async_trait::async_trait;
use tokio::sync::RwLock;

use customer_registry_core::{Customer, CustomerId, Email};

use super::{CustomerDao, RepositoryError};

#[derive(Debug)]
struct Store {
    customers: Vec<Customer>,
    /// `None` once `i32::MAX` has been handed out.
    next_id: Option<i32>,
}

impl Store {
    /// A store whose counter continues after the highest id in `customers`.
    fn continuing_after(customers: Vec<Customer>) -> Self {
        let next_id = customers
            .iter()
            .filter_map(Customer::id)
            .map(|id| id.as_i32())
            .max()
            .map_or(Some(1), |max| max.checked_add(1));

        Self { customers, next_id }
    }

    fn allocate_id(&mut self) -> Result<CustomerId, RepositoryError> {
        let id = self.next_id.ok_or(RepositoryError::IdExhausted)?;
        self.next_id = id.checked_add(1);
        Ok(CustomerId::new(id))
    }

    fn email_taken_by_other(&self, email: &Email, id: Option<CustomerId>) -> bool {
        self.customers
            .iter()
            .any(|c| c.email == *email && c.id() != id)
    }
}

/// Customer store backed by an owned in-process collection.
#[derive(Debug)]
pub struct InMemoryCustomerDao {
    store: RwLock<Store>,
}

impl InMemoryCustomerDao {
    /// Create a store holding the given customers.
    ///
    /// Customers that already have an id keep it. Customers without one are
    /// placed after them and numbered from the highest id present, as are
    /// later inserts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::IdExhausted` if an unpersisted customer
    /// cannot be given an id.
    pub fn new(customers: Vec<Customer>) -> Result<Self, RepositoryError> {
        let (persisted, unpersisted): (Vec<_>, Vec<_>) =
            customers.into_iter().partition(|c| c.id().is_some());

        let mut store = Store::continuing_after(persisted);
        for c in unpersisted {
            let id = store.allocate_id()?;
            store
                .customers
                .push(Customer::with_id(id, c.name, c.email, c.age));
        }

        Ok(Self::from_store(store))
    }

    /// Create an empty store.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_store(Store::continuing_after(Vec::new()))
    }

    /// Create a store seeded with the two demo customers, Art and Mina.
    #[must_use]
    pub fn with_demo_customers() -> Self {
        Self::from_store(Store::continuing_after(demo_customers()))
    }

    fn from_store(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }
}

impl Default for InMemoryCustomerDao {
    fn default() -> Self {
        Self::with_demo_customers()
    }
}

/// The fixed rows an in-memory store starts with.
#[must_use]
pub fn demo_customers() -> Vec<Customer> {
    [
        (1, "Art", "art@gmail.com", 33),
        (2, "Mina", "mina@gmail.com", 32),
    ]
    .into_iter()
    .filter_map(|(id, name, email, age)| {
        Email::parse(email)
            .ok()
            .map(|email| Customer::with_id(CustomerId::new(id), name, email, age))
    })
    .collect()
}

#[async_trait]
impl CustomerDao for InMemoryCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self.store.read().await.customers.clone())
    }

    async fn select_customer_by_id(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let store = self.store.read().await;
        let found = store.customers.iter().find(|c| c.id() == Some(id));
        Ok(found.cloned())
    }

    async fn insert_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        if store.email_taken_by_other(&customer.email, None) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let id = store.allocate_id()?;
        store.customers.push(Customer::with_id(
            id,
            customer.name.clone(),
            customer.email.clone(),
            customer.age,
        ));
        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        if let Some(pos) = store.customers.iter().position(|c| c.id() == Some(id)) {
            store.customers.remove(pos);
        }
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let id = customer.id().ok_or(RepositoryError::MissingId)?;

        let mut store = self.store.write().await;
        if store.email_taken_by_other(&customer.email, Some(id)) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        if let Some(stored) = store.customers.iter_mut().find(|c| c.id() == Some(id)) {
            stored.clone_from(customer);
        }
        Ok(())
    }

    async fn exists_person_with_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.customers.iter().any(|c| c.email == *email))
    }

    async fn exists_person_with_id(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.customers.iter().any(|c| c.id() == Some(id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    async fn has_id(dao: &InMemoryCustomerDao, id: i32) -> bool {
        let id = CustomerId::new(id);
        dao.exists_person_with_id(id).await.unwrap()
    }

    async fn has_email(dao: &InMemoryCustomerDao, address: &str) -> bool {
        let address = email(address);
        dao.exists_person_with_email(&address).await.unwrap()
    }

    #[test]
    fn test_demo_customers() {
        let demo = demo_customers();
        assert_eq!(
            demo,
            vec![
                Customer::with_id(CustomerId::new(1), "Art", email("art@gmail.com"), 33),
                Customer::with_id(CustomerId::new(2), "Mina", email("mina@gmail.com"), 32),
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_appends_with_next_id() {
        let dao = InMemoryCustomerDao::with_demo_customers();
        dao.insert_customer(&Customer::new("Lea", email("lea@example.com"), 27))
            .await
            .unwrap();

        let all = dao.select_all_customers().await.unwrap();
        assert_eq!(all.len(), 3);
        let last = all.last().unwrap();
        assert_eq!(last.id(), Some(CustomerId::new(3)));
        assert_eq!(last.name, "Lea");
    }

    #[tokio::test]
    async fn test_insert_ignores_caller_supplied_id() {
        let dao = InMemoryCustomerDao::empty();
        let customer = Customer::with_id(CustomerId::new(99), "Lea", email("lea@example.com"), 27);
        dao.insert_customer(&customer).await.unwrap();

        assert!(has_id(&dao, 1).await);
        assert!(!has_id(&dao, 99).await);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let dao = InMemoryCustomerDao::with_demo_customers();
        dao.delete_customer(CustomerId::new(2)).await.unwrap();
        dao.insert_customer(&Customer::new("Lea", email("lea@example.com"), 27))
            .await
            .unwrap();

        let ids: Vec<_> = dao
            .select_all_customers()
            .await
            .unwrap()
            .iter()
            .filter_map(Customer::id)
            .collect();
        assert_eq!(ids, vec![CustomerId::new(1), CustomerId::new(3)]);
    }

    #[tokio::test]
    async fn test_new_assigns_ids_to_unpersisted_rows() {
        let dao = InMemoryCustomerDao::new(vec![
            Customer::new("Mina", email("mina@gmail.com"), 32),
            Customer::with_id(CustomerId::new(5), "Art", email("art@gmail.com"), 33),
        ])
        .unwrap();

        let id = CustomerId::new(6);
        let mina = dao.select_customer_by_id(id).await.unwrap();
        assert_eq!(mina.unwrap().name, "Mina");
    }

    #[tokio::test]
    async fn test_insert_after_max_id_is_an_error() {
        let edge_id = CustomerId::new(i32::MAX);
        let edge = Customer::with_id(edge_id, "Edge", email("edge@example.com"), 40);
        let dao = InMemoryCustomerDao::new(vec![edge]).unwrap();

        let result = dao
            .insert_customer(&Customer::new("Lea", email("lea@example.com"), 27))
            .await;
        assert!(matches!(result, Err(RepositoryError::IdExhausted)));
        assert_eq!(dao.select_all_customers().await.unwrap().len(), 1);

        // Store stays usable after the failed insert
        assert!(has_id(&dao, i32::MAX).await);
    }

    #[tokio::test]
    async fn test_last_id_is_assigned_once() {
        let edge_id = CustomerId::new(i32::MAX - 1);
        let edge = Customer::with_id(edge_id, "Edge", email("edge@example.com"), 40);
        let dao = InMemoryCustomerDao::new(vec![edge]).unwrap();

        dao.insert_customer(&Customer::new("Lea", email("lea@example.com"), 27))
            .await
            .unwrap();
        assert!(has_id(&dao, i32::MAX).await);

        let result = dao
            .insert_customer(&Customer::new("Max", email("max@example.com"), 28))
            .await;
        assert!(matches!(result, Err(RepositoryError::IdExhausted)));
    }

    #[test]
    fn test_new_with_unpersisted_row_after_max_id_fails() {
        let max = CustomerId::new(i32::MAX);
        let result = InMemoryCustomerDao::new(vec![
            Customer::with_id(max, "Edge", email("edge@example.com"), 40),
            Customer::new("Lea", email("lea@example.com"), 27),
        ]);
        assert!(matches!(result, Err(RepositoryError::IdExhausted)));
    }

    #[tokio::test]
    async fn test_insert_duplicate_email_conflicts() {
        let dao = InMemoryCustomerDao::with_demo_customers();
        let result = dao
            .insert_customer(&Customer::new("Other", email("art@gmail.com"), 50))
            .await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        assert_eq!(dao.select_all_customers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let dao = InMemoryCustomerDao::with_demo_customers();
        dao.delete_customer(CustomerId::new(42)).await.unwrap();
        assert_eq!(dao.select_all_customers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_overwrites_full_row() {
        let dao = InMemoryCustomerDao::with_demo_customers();
        let updated =
            Customer::with_id(CustomerId::new(1), "Arthur", email("arthur@gmail.com"), 34);
        dao.update_customer(&updated).await.unwrap();

        let id = CustomerId::new(1);
        let stored = dao.select_customer_by_id(id).await.unwrap();
        assert_eq!(stored, Some(updated));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let dao = InMemoryCustomerDao::with_demo_customers();
        let updated = Customer::with_id(CustomerId::new(1), "Art", email("art@gmail.com"), 40);
        dao.update_customer(&updated).await.unwrap();

        let id = CustomerId::new(1);
        let stored = dao.select_customer_by_id(id).await.unwrap();
        assert_eq!(stored.unwrap().age, 40);
    }

    #[tokio::test]
    async fn test_update_to_other_customers_email_conflicts() {
        let dao = InMemoryCustomerDao::with_demo_customers();
        let updated = Customer::with_id(CustomerId::new(1), "Art", email("mina@gmail.com"), 33);

        let result = dao.update_customer(&updated).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_without_id_fails() {
        let dao = InMemoryCustomerDao::with_demo_customers();
        let result = dao
            .update_customer(&Customer::new("Art", email("art@gmail.com"), 33))
            .await;

        assert!(matches!(result, Err(RepositoryError::MissingId)));
    }

    #[tokio::test]
    async fn test_exists_checks() {
        let dao = InMemoryCustomerDao::with_demo_customers();

        assert!(has_email(&dao, "mina@gmail.com").await);
        assert!(!has_email(&dao, "MINA@gmail.com").await);
        assert!(has_id(&dao, 2).await);
        assert!(!has_id(&dao, -1).await);
    }
}
