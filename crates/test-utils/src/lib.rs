//! Shared test utilities for the wcps-datacube workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Canned coverages, locations and geometries
//! - Payload generators for PNG, JPEG, CSV and OWS exception responses
//! - An in-process mock WCPS endpoint
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod mock_server;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use mock_server::{unused_endpoint, MockResponse, MockWcpsServer};
