//! Customer entity and the request shapes that create or change it.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::CustomerId;

/// A customer record as stored and returned by the registry.
///
/// Equality and hashing cover all four fields, including the id, so a freshly
/// built customer never equals its persisted copy.
///
/// The id is assigned by the storage backend on insert and cannot be changed
/// afterwards; it is `None` only for customers that have not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Customer {
    id: Option<CustomerId>,
    /// Display name.
    pub name: String,
    /// Email address, unique across all stored customers.
    pub email: Email,
    /// Age in years.
    pub age: i32,
}

impl Customer {
    /// Create a customer that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Email, age: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            email,
            age,
        }
    }

    /// Create a customer that already carries a storage-assigned id.
    #[must_use]
    pub fn with_id(id: CustomerId, name: impl Into<String>, email: Email, age: i32) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            email,
            age,
        }
    }

    /// The storage-assigned id, if persisted.
    #[must_use]
    pub const fn id(&self) -> Option<CustomerId> {
        self.id
    }
}

/// Input for registering a new customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: Email,
    pub age: i32,
}

impl CustomerRegistrationRequest {
    /// Build the unpersisted customer this request describes.
    #[must_use]
    pub fn into_customer(self) -> Customer {
        Customer::new(self.name, self.email, self.age)
    }
}

/// Partial update of a stored customer.
///
/// `None` (a missing key or an explicit JSON `null`) leaves the stored value
/// unchanged. There is no way to clear a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<Email>,
    #[serde(default)]
    pub age: Option<i32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn art() -> Customer {
        Customer::with_id(
            CustomerId::new(1),
            "Art",
            Email::parse("art@gmail.com").unwrap(),
            33,
        )
    }

    #[test]
    fn test_new_customer_has_no_id() {
        let customer = Customer::new("Art", Email::parse("art@gmail.com").unwrap(), 33);
        assert_eq!(customer.id(), None);
    }

    #[test]
    fn test_equality_includes_id() {
        let unpersisted = Customer::new("Art", Email::parse("art@gmail.com").unwrap(), 33);
        assert_ne!(unpersisted, art());
        assert_eq!(art(), art());
    }

    #[test]
    fn test_customer_json_shape() {
        let value = serde_json::to_value(art()).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "name": "Art", "email": "art@gmail.com", "age": 33})
        );
    }

    #[test]
    fn test_registration_into_customer() {
        let request: CustomerRegistrationRequest =
            serde_json::from_value(json!({"name": "Mina", "email": "mina@gmail.com", "age": 32}))
                .unwrap();

        let customer = request.into_customer();
        assert_eq!(customer.id(), None);
        assert_eq!(customer.name, "Mina");
        assert_eq!(customer.email.as_str(), "mina@gmail.com");
        assert_eq!(customer.age, 32);
    }

    #[test]
    fn test_registration_rejects_invalid_email() {
        let result = serde_json::from_value::<CustomerRegistrationRequest>(
            json!({"name": "Mina", "email": "mina", "age": 32}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_missing_and_null_are_absent() {
        let missing: CustomerUpdateRequest = serde_json::from_value(json!({"age": 40})).unwrap();
        let null: CustomerUpdateRequest =
            serde_json::from_value(json!({"name": null, "email": null, "age": 40})).unwrap();

        let expected = CustomerUpdateRequest {
            name: None,
            email: None,
            age: Some(40),
        };
        assert_eq!(missing, expected);
        assert_eq!(null, expected);
    }

    #[test]
    fn test_update_request_empty_object() {
        let request: CustomerUpdateRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, CustomerUpdateRequest::default());
    }
}
