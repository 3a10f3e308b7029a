//! End-to-end tests for the vehicle-control daemon
//!
//! These tests wire the full stack together in-process:
//! - HTTP API layer (`tesla-api`)
//! - Real adapter and Fleet API client (`tesla-fleet`)
//! - A `MockFleet` backend standing in for the vehicle-command proxy
//!
//! # Running Tests
//!
//! No vehicle or network access is needed:
//!
//! ```bash
//! cargo test -p tesla-tests
//! ```

// This crate only contains tests, no library code
