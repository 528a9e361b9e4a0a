//! Customer Registry API library.
//!
//! This crate provides the customer service, its storage backends and the
//! HTTP routes as a library, allowing them to be tested and reused by the
//! CLI and the integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
