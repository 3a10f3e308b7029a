//! MockVehicleClient - deterministic stand-in for local development
//!
//! Every call succeeds with the same fixed values. There is no I/O and no
//! shared mutable state, so one instance can serve any number of concurrent
//! requests.

use async_trait::async_trait;

use crate::client::VehicleClient;
use crate::error::VehicleResult;
use crate::models::VehicleStats;

/// Camera feed placeholder returned by the mock adapter
pub const MOCK_CAMERA_FEED_URL: &str =
    "https://via.placeholder.com/1280x720.png?text=Mock+Camera+Feed";

/// Mock adapter with fixed responses
#[derive(Debug, Clone, Copy, Default)]
pub struct MockVehicleClient;

impl MockVehicleClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VehicleClient for MockVehicleClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_vehicle_stats(&self) -> VehicleResult<VehicleStats> {
        let mut stats = VehicleStats::new();
        stats.insert("vehicle_name", "DevTesla");
        stats.insert("battery_level", 75);
        stats.insert("range_miles", 200);
        stats.insert("locked", true);
        stats.insert("location", "123 Mock St, Dev City");
        stats.insert("charging", false);
        Ok(stats)
    }

    async fn lock_vehicle(&self) -> VehicleResult<bool> {
        tracing::info!(client = self.name(), "Vehicle locked");
        Ok(true)
    }

    async fn unlock_vehicle(&self) -> VehicleResult<bool> {
        tracing::info!(client = self.name(), "Vehicle unlocked");
        Ok(true)
    }

    async fn get_camera_feed(&self) -> VehicleResult<String> {
        Ok(MOCK_CAMERA_FEED_URL.to_string())
    }
}
