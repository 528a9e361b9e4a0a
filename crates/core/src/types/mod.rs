//! Core types for the customer registry.
//!
//! This module provides type-safe wrappers for the customer domain.

pub mod customer;
pub mod email;
pub mod id;

pub use customer::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest};
pub use email::{Email, EmailError};
pub use id::*;
