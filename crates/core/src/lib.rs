//! Customer Registry Core - Shared types library.
//!
//! This crate provides the types shared by every customer registry component:
//! - `api` - HTTP service and data-access backends
//! - `cli` - Command-line tools for migrations and seeding
//! - `integration-tests` - Backend contract and HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Customer entity, request shapes, and type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
