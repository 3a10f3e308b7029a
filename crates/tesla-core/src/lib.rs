//! tesla-core - Core traits and types for the vehicle-control façade
//!
//! This crate provides the `VehicleClient` capability that both the mock
//! adapter and the real backend adapter implement, the error kinds shared by
//! every adapter, and the open-ended `VehicleStats` model.

pub mod client;
pub mod error;
pub mod mock;
pub mod models;

pub use client::VehicleClient;
pub use error::{VehicleError, VehicleResult};
pub use mock::{MockVehicleClient, MOCK_CAMERA_FEED_URL};
pub use models::VehicleStats;
