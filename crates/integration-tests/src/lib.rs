//! Integration tests for the customer registry.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory storage contract (no external services)
//! cargo test -p customer-registry-integration-tests
//!
//! # PostgreSQL contract and HTTP tests
//! cargo run -p customer-registry-api &
//! cargo test -p customer-registry-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `customer_dao_contract` - storage behavior every `CustomerDao` must share
//! - `customers_api` - HTTP tests against a running server
//!
//! The contract checks in this library only touch rows they create, using
//! unique emails, so they can run against a database that already holds data.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use customer_registry_api::db::{CustomerDao, RepositoryError};
use customer_registry_core::{Customer, CustomerId, Email};
use uuid::Uuid;

/// An email no other test run will produce.
#[must_use]
pub fn unique_email(prefix: &str) -> Email {
    Email::parse(&format!("{prefix}-{}@example.com", Uuid::new_v4().simple()))
        .expect("generated email is valid")
}

/// The stored customer with this email, if any.
pub async fn find_by_email(dao: &dyn CustomerDao, email: &Email) -> Option<Customer> {
    let all = dao.select_all_customers().await.expect("select failed");
    all.into_iter().find(|c| c.email == *email)
}

/// The stored customer with this id, if any.
pub async fn find_by_id(dao: &dyn CustomerDao, id: CustomerId) -> Option<Customer> {
    let found = dao.select_customer_by_id(id).await;
    found.expect("select by id failed")
}

async fn email_exists(dao: &dyn CustomerDao, email: &Email) -> bool {
    let exists = dao.exists_person_with_email(email).await;
    exists.expect("exists by email failed")
}

async fn id_exists(dao: &dyn CustomerDao, id: CustomerId) -> bool {
    let exists = dao.exists_person_with_id(id).await;
    exists.expect("exists by id failed")
}

/// Insert a customer and return it as stored, id included.
pub async fn insert_and_fetch(dao: &dyn CustomerDao, name: &str, age: i32) -> Customer {
    let email = unique_email("contract");
    let customer = Customer::new(name, email.clone(), age);
    dao.insert_customer(&customer).await.expect("insert failed");

    find_by_email(dao, &email)
        .await
        .expect("inserted customer not listed")
}

fn stored_id(customer: &Customer) -> CustomerId {
    customer.id().expect("stored customer has an id")
}

/// Inserted rows get an id and read back with the same fields.
pub async fn check_insert_assigns_id(dao: &dyn CustomerDao) {
    let stored = insert_and_fetch(dao, "Ada Lovelace", 36).await;
    let id = stored_id(&stored);

    assert_eq!(stored.name, "Ada Lovelace");
    assert_eq!(stored.age, 36);
    assert_eq!(find_by_id(dao, id).await, Some(stored));
}

/// A second insert with a stored email is rejected and leaves one row.
pub async fn check_insert_rejects_duplicate_email(dao: &dyn CustomerDao) {
    let email = unique_email("dup");
    let first = Customer::new("First", email.clone(), 20);
    dao.insert_customer(&first).await.expect("insert failed");

    let second = Customer::new("Second", email.clone(), 21);
    let err = dao.insert_customer(&second).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)), "got {err:?}");

    let all = dao.select_all_customers().await.expect("select failed");
    assert_eq!(all.iter().filter(|c| c.email == email).count(), 1);
}

/// Email and id existence checks agree with what is stored.
pub async fn check_exists_queries(dao: &dyn CustomerDao) {
    let stored = insert_and_fetch(dao, "Grace Hopper", 85).await;

    assert!(email_exists(dao, &stored.email).await);
    assert!(id_exists(dao, stored_id(&stored)).await);
    assert!(!email_exists(dao, &unique_email("absent")).await);
}

/// Email comparison is exact: a different case is a different email.
pub async fn check_email_match_is_case_sensitive(dao: &dyn CustomerDao) {
    let stored = insert_and_fetch(dao, "Alan Turing", 41).await;
    let shouted = stored.email.as_str().to_uppercase();
    let shouted = Email::parse(&shouted).expect("valid email");

    assert!(!email_exists(dao, &shouted).await);
}

/// Unknown ids read as absent and delete as a no-op.
pub async fn check_missing_id(dao: &dyn CustomerDao) {
    let missing = CustomerId::new(i32::MAX);

    assert!(find_by_id(dao, missing).await.is_none());
    assert!(!id_exists(dao, missing).await);
    dao.delete_customer(missing).await.expect("delete failed");
}

/// Delete removes exactly the targeted row.
pub async fn check_delete(dao: &dyn CustomerDao) {
    let doomed = insert_and_fetch(dao, "Doomed", 50).await;
    let kept = insert_and_fetch(dao, "Kept", 51).await;
    let id = stored_id(&doomed);

    dao.delete_customer(id).await.expect("delete failed");

    assert!(find_by_id(dao, id).await.is_none());
    assert!(!email_exists(dao, &doomed.email).await);
    assert_eq!(find_by_id(dao, stored_id(&kept)).await, Some(kept));
}

/// Update overwrites all fields of the row with the customer's id.
pub async fn check_update_overwrites_row(dao: &dyn CustomerDao) {
    let stored = insert_and_fetch(dao, "Before", 30).await;
    let id = stored_id(&stored);

    let changed = Customer::with_id(id, "After", unique_email("after"), 31);
    dao.update_customer(&changed).await.expect("update failed");

    assert_eq!(find_by_id(dao, id).await, Some(changed));
    assert!(!email_exists(dao, &stored.email).await);
}

/// Update may keep the row's own email but not take another row's.
pub async fn check_update_email_uniqueness(dao: &dyn CustomerDao) {
    let first = insert_and_fetch(dao, "First", 40).await;
    let second = insert_and_fetch(dao, "Second", 41).await;
    let second_id = stored_id(&second);

    let renamed = Customer::with_id(second_id, "Renamed", second.email.clone(), 42);
    dao.update_customer(&renamed).await.expect("update failed");

    let stolen = Customer::with_id(second_id, "Thief", first.email.clone(), 43);
    let err = dao.update_customer(&stolen).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)), "got {err:?}");

    assert_eq!(find_by_id(dao, second_id).await, Some(renamed));
}

/// Updating a customer that was never persisted is rejected.
pub async fn check_update_without_id(dao: &dyn CustomerDao) {
    let unsaved = Customer::new("Nobody", unique_email("unsaved"), 1);

    let err = dao.update_customer(&unsaved).await.unwrap_err();
    assert!(matches!(err, RepositoryError::MissingId), "got {err:?}");
}

/// Run every contract check against `dao`.
pub async fn run_contract(dao: &dyn CustomerDao) {
    check_insert_assigns_id(dao).await;
    check_insert_rejects_duplicate_email(dao).await;
    check_exists_queries(dao).await;
    check_email_match_is_case_sensitive(dao).await;
    check_missing_id(dao).await;
    check_delete(dao).await;
    check_update_overwrites_row(dao).await;
    check_update_email_uniqueness(dao).await;
    check_update_without_id(dao).await;
    dao.ping().await.expect("ping failed");
}
