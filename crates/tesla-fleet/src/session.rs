//! Vehicle sessions - a backend connection bound to one VIN

use async_trait::async_trait;
use serde_json::Value;

use crate::client::FleetClient;
use crate::config::FleetConfig;
use crate::error::Result;
use crate::types::CommandResponse;

/// Command names understood by the backend
pub const CMD_DOOR_LOCK: &str = "door_lock";
pub const CMD_DOOR_UNLOCK: &str = "door_unlock";

/// An established connection to the vehicle-command backend for one vehicle.
///
/// Concurrency, timeouts and credential handling all belong to the
/// implementation; callers add none of their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleSession: Send + Sync {
    /// VIN this session is bound to
    fn vin(&self) -> &str;

    /// Current vehicle state, `None` if the backend has no data
    async fn vehicle_data(&self) -> Result<Option<Value>>;

    /// Lock the doors
    async fn door_lock(&self) -> Result<CommandResponse>;

    /// Unlock the doors
    async fn door_unlock(&self) -> Result<CommandResponse>;
}

/// `VehicleSession` backed by the Fleet API over HTTP
#[derive(Debug, Clone)]
pub struct FleetSession {
    client: FleetClient,
    vin: String,
}

impl FleetSession {
    /// Bind an existing client to a VIN without contacting the backend
    pub fn new(client: FleetClient, vin: impl Into<String>) -> Self {
        Self {
            client,
            vin: vin.into(),
        }
    }

    /// Establish a session.
    ///
    /// Resolves the access token from `config`, builds the client and
    /// confirms the backend knows the vehicle. Fails if any step fails.
    pub async fn connect(vin: &str, config: &FleetConfig) -> Result<Self> {
        let token = config.resolve_token()?;
        let client = FleetClient::new(&config.base_url, &token)?;

        let vehicle = client.get_vehicle(vin).await?;
        tracing::info!(
            vin = %vin,
            base_url = %client.base_url(),
            display_name = ?vehicle.display_name,
            state = ?vehicle.state,
            "Vehicle session established"
        );

        Ok(Self::new(client, vin))
    }
}

#[async_trait]
impl VehicleSession for FleetSession {
    fn vin(&self) -> &str {
        &self.vin
    }

    async fn vehicle_data(&self) -> Result<Option<Value>> {
        self.client.vehicle_data(&self.vin).await
    }

    async fn door_lock(&self) -> Result<CommandResponse> {
        self.client.command(&self.vin, CMD_DOOR_LOCK).await
    }

    async fn door_unlock(&self) -> Result<CommandResponse> {
        self.client.command(&self.vin, CMD_DOOR_UNLOCK).await
    }
}
