//! Business logic services.
//!
//! # Services
//!
//! - `customer` - Registration, lookup, partial update and deletion of customers

pub mod customer;

pub use customer::{CustomerError, CustomerService};
