//! tesla-fleet - Real vehicle adapter
//!
//! Implements `VehicleClient` by forwarding every operation over HTTP to a
//! vehicle-command backend that speaks the Tesla Fleet API (for example
//! Tesla's `tesla-http-proxy`, which owns command signing and transport).
//!
//! ```ignore
//! use tesla_fleet::{FleetConfig, RealVehicleClient};
//!
//! let config = FleetConfig::from_env();
//! let client = RealVehicleClient::connect("5YJ3E1EA7KF000001", &config).await?;
//! let stats = client.get_vehicle_stats().await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
mod real;
pub mod session;
pub mod testing;
pub mod types;

pub use client::FleetClient;
pub use config::FleetConfig;
pub use error::{FleetClientError, Result};
pub use real::{flatten_vehicle_data, RealVehicleClient, VIN_KEY};
pub use session::{FleetSession, VehicleSession};
pub use types::{CommandResponse, VehicleSummary};
