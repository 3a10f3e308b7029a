//! VehicleClient trait - the capability every adapter implements

use async_trait::async_trait;

use crate::error::VehicleResult;
use crate::models::VehicleStats;

/// The set of vehicle operations exposed over HTTP.
///
/// An implementation is bound to a single vehicle for its whole lifetime, so
/// no operation takes an identity argument. One instance is shared by every
/// request handler (`Arc<dyn VehicleClient>`), which is why the trait requires
/// `Send + Sync`. Each call is independent: a failing operation must not
/// poison the others.
#[async_trait]
pub trait VehicleClient: Send + Sync {
    /// Short label used in log lines ("mock", "fleet", ...)
    fn name(&self) -> &str;

    /// Read a point-in-time snapshot of the vehicle state
    async fn get_vehicle_stats(&self) -> VehicleResult<VehicleStats>;

    /// Lock the doors. `Ok(true)` means the command was accepted.
    async fn lock_vehicle(&self) -> VehicleResult<bool>;

    /// Unlock the doors. `Ok(true)` means the command was accepted.
    async fn unlock_vehicle(&self) -> VehicleResult<bool>;

    /// Get a reference (URL) to the camera feed
    async fn get_camera_feed(&self) -> VehicleResult<String>;
}
