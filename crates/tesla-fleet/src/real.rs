//! RealVehicleClient - VehicleClient bound to one vehicle-command session

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tesla_core::{VehicleClient, VehicleError, VehicleResult, VehicleStats};

use crate::config::FleetConfig;
use crate::session::{FleetSession, VehicleSession, CMD_DOOR_LOCK, CMD_DOOR_UNLOCK};
use crate::types::CommandResponse;

/// Reserved stats key carrying the bound VIN
pub const VIN_KEY: &str = "vin";

/// A `VehicleClient` that forwards every operation to a `VehicleSession`.
///
/// Bound to a single VIN and session for its whole lifetime; the session is
/// not re-authenticated per call and nothing is retried.
pub struct RealVehicleClient {
    vin: String,
    session: Option<Arc<dyn VehicleSession>>,
}

impl RealVehicleClient {
    /// Connect to the backend described by `config` and bind to `vin`.
    ///
    /// Fails with `InvalidArgument` for an empty VIN and with
    /// `ConnectionError` if the session cannot be established.
    pub async fn connect(vin: &str, config: &FleetConfig) -> VehicleResult<Self> {
        let vin = validate_vin(vin)?;

        let session = FleetSession::connect(&vin, config).await.map_err(|e| {
            VehicleError::ConnectionError(format!(
                "failed to establish session for VIN {}: {}",
                vin, e
            ))
        })?;

        Ok(Self {
            vin,
            session: Some(Arc::new(session)),
        })
    }

    /// Bind an already established session
    pub fn with_session(vin: &str, session: Arc<dyn VehicleSession>) -> VehicleResult<Self> {
        let vin = validate_vin(vin)?;
        Ok(Self {
            vin,
            session: Some(session),
        })
    }

    /// VIN this client is bound to
    pub fn vin(&self) -> &str {
        &self.vin
    }

    fn session(&self) -> VehicleResult<&dyn VehicleSession> {
        self.session.as_deref().ok_or(VehicleError::NotInitialized)
    }
}

fn validate_vin(vin: &str) -> VehicleResult<String> {
    let vin = vin.trim();
    if vin.is_empty() {
        return Err(VehicleError::InvalidArgument(
            "VIN must not be empty".to_string(),
        ));
    }
    Ok(vin.to_string())
}

/// Turn an accepted/rejected command response into the capability result
fn command_outcome(command: &str, response: CommandResponse) -> VehicleResult<bool> {
    if response.result {
        return Ok(true);
    }

    let reason = if response.reason.is_empty() {
        "no reason given"
    } else {
        response.reason.as_str()
    };
    Err(VehicleError::Upstream(format!(
        "{} rejected by vehicle: {}",
        command, reason
    )))
}

/// Flatten a structured vehicle-data object into a stats map.
///
/// Nested objects become dot-joined keys (`charge_state.battery_level`);
/// arrays and scalars are kept as values. Returns `None` if `data` is not an
/// object.
pub fn flatten_vehicle_data(data: Value) -> Option<VehicleStats> {
    let Value::Object(map) = data else {
        return None;
    };

    let mut stats = VehicleStats::new();
    for (key, value) in map {
        flatten_into(&key, value, &mut stats);
    }
    Some(stats)
}

fn flatten_into(prefix: &str, value: Value, out: &mut VehicleStats) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, value) in map {
                flatten_into(&format!("{}.{}", prefix, key), value, out);
            }
        }
        other => out.insert(prefix, other),
    }
}

#[async_trait]
impl VehicleClient for RealVehicleClient {
    fn name(&self) -> &str {
        "fleet"
    }

    async fn get_vehicle_stats(&self) -> VehicleResult<VehicleStats> {
        let session = self.session()?;

        let data = session
            .vehicle_data()
            .await
            .map_err(|e| VehicleError::upstream("vehicle_data", e))?
            .ok_or(VehicleError::EmptyResponse)?;

        let mut stats = flatten_vehicle_data(data).ok_or_else(|| {
            VehicleError::Upstream("vehicle_data: response is not an object".to_string())
        })?;
        if stats.is_empty() {
            return Err(VehicleError::EmptyResponse);
        }

        stats.insert(VIN_KEY, self.vin.clone());
        Ok(stats)
    }

    async fn lock_vehicle(&self) -> VehicleResult<bool> {
        let session = self.session()?;
        let response = session
            .door_lock()
            .await
            .map_err(|e| VehicleError::upstream(CMD_DOOR_LOCK, e))?;

        let locked = command_outcome(CMD_DOOR_LOCK, response)?;
        tracing::info!(vin = %self.vin, "Vehicle locked");
        Ok(locked)
    }

    async fn unlock_vehicle(&self) -> VehicleResult<bool> {
        let session = self.session()?;
        let response = session
            .door_unlock()
            .await
            .map_err(|e| VehicleError::upstream(CMD_DOOR_UNLOCK, e))?;

        let unlocked = command_outcome(CMD_DOOR_UNLOCK, response)?;
        tracing::info!(vin = %self.vin, "Vehicle unlocked");
        Ok(unlocked)
    }

    async fn get_camera_feed(&self) -> VehicleResult<String> {
        self.session()?;
        Err(VehicleError::NotImplemented(
            "camera feed is not supported by the vehicle-command backend".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::error::FleetClientError;
    use crate::session::MockVehicleSession;

    const VIN: &str = "5YJ3E1EA7KF000001";

    fn client_with(session: MockVehicleSession) -> RealVehicleClient {
        RealVehicleClient::with_session(VIN, Arc::new(session)).unwrap()
    }

    fn unbound() -> RealVehicleClient {
        RealVehicleClient {
            vin: VIN.to_string(),
            session: None,
        }
    }

    #[test]
    fn empty_vin_is_rejected() {
        let session = Arc::new(MockVehicleSession::new());
        let err = RealVehicleClient::with_session("  ", session).err().unwrap();
        assert!(matches!(err, VehicleError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn connect_rejects_empty_vin_before_touching_backend() {
        let err = RealVehicleClient::connect("", &FleetConfig::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, VehicleError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn connect_without_token_is_a_connection_error() {
        let err = RealVehicleClient::connect(VIN, &FleetConfig::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, VehicleError::ConnectionError(_)));
    }

    #[test]
    fn flatten_joins_nested_keys() {
        let stats = flatten_vehicle_data(json!({
            "display_name": "Roadrunner",
            "charge_state": {
                "battery_level": 81,
                "charging_state": "Disconnected"
            },
            "drive_state": {
                "gps": { "latitude": 37.4, "longitude": -122.1 }
            },
            "vehicle_state": {
                "locked": true,
                "tpms": [2.9, 2.9, 3.0, 3.0]
            }
        }))
        .unwrap();

        assert_eq!(stats.get("display_name"), Some(&json!("Roadrunner")));
        assert_eq!(stats.get("charge_state.battery_level"), Some(&json!(81)));
        assert_eq!(
            stats.get("charge_state.charging_state"),
            Some(&json!("Disconnected"))
        );
        assert_eq!(stats.get("drive_state.gps.latitude"), Some(&json!(37.4)));
        assert_eq!(stats.get("vehicle_state.locked"), Some(&json!(true)));
        assert_eq!(
            stats.get("vehicle_state.tpms"),
            Some(&json!([2.9, 2.9, 3.0, 3.0]))
        );
        assert!(stats.get("charge_state").is_none());
    }

    #[test]
    fn flatten_rejects_non_objects() {
        assert!(flatten_vehicle_data(json!([1, 2, 3])).is_none());
        assert!(flatten_vehicle_data(json!("online")).is_none());
    }

    #[tokio::test]
    async fn stats_are_flattened_and_carry_vin() {
        let mut session = MockVehicleSession::new();
        session.expect_vehicle_data().times(1).returning(|| {
            Ok(Some(json!({
                "vin": "SPOOFED",
                "charge_state": { "battery_level": 64 }
            })))
        });

        let stats = client_with(session).get_vehicle_stats().await.unwrap();

        assert_eq!(stats.get(VIN_KEY), Some(&json!(VIN)));
        assert_eq!(stats.get("charge_state.battery_level"), Some(&json!(64)));
        assert_eq!(stats.len(), 2);
    }

    #[tokio::test]
    async fn stats_session_failure_is_upstream() {
        let mut session = MockVehicleSession::new();
        session
            .expect_vehicle_data()
            .returning(|| Err(FleetClientError::server_error(401, "token expired")));

        let err = client_with(session).get_vehicle_stats().await.unwrap_err();
        match err {
            VehicleError::Upstream(msg) => {
                assert!(msg.contains("vehicle_data"));
                assert!(msg.contains("token expired"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn stats_without_data_is_empty_response() {
        let mut session = MockVehicleSession::new();
        session.expect_vehicle_data().returning(|| Ok(None));

        let err = client_with(session).get_vehicle_stats().await.unwrap_err();
        assert!(matches!(err, VehicleError::EmptyResponse));
    }

    #[tokio::test]
    async fn stats_with_empty_object_is_empty_response() {
        let mut session = MockVehicleSession::new();
        session.expect_vehicle_data().returning(|| Ok(Some(json!({}))));

        let err = client_with(session).get_vehicle_stats().await.unwrap_err();
        assert!(matches!(err, VehicleError::EmptyResponse));
    }

    #[tokio::test]
    async fn accepted_commands_report_success() {
        let mut session = MockVehicleSession::new();
        session
            .expect_door_lock()
            .times(1)
            .returning(|| Ok(CommandResponse::accepted()));
        session
            .expect_door_unlock()
            .times(1)
            .returning(|| Ok(CommandResponse::accepted()));

        let client = client_with(session);
        assert!(client.lock_vehicle().await.unwrap());
        assert!(client.unlock_vehicle().await.unwrap());
    }

    #[tokio::test]
    async fn rejected_command_is_upstream_with_reason() {
        let mut session = MockVehicleSession::new();
        session
            .expect_door_unlock()
            .returning(|| Ok(CommandResponse::rejected("vehicle_unavailable")));

        let err = client_with(session).unlock_vehicle().await.unwrap_err();
        match err {
            VehicleError::Upstream(msg) => assert!(msg.contains("vehicle_unavailable")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn command_transport_failure_is_upstream() {
        let mut session = MockVehicleSession::new();
        session
            .expect_door_lock()
            .returning(|| Err(FleetClientError::Timeout));

        let err = client_with(session).lock_vehicle().await.unwrap_err();
        assert!(matches!(err, VehicleError::Upstream(_)));
    }

    #[tokio::test]
    async fn camera_feed_is_not_implemented() {
        let client = client_with(MockVehicleSession::new());
        let err = client.get_camera_feed().await.unwrap_err();
        assert!(err.is_not_implemented());
    }

    #[tokio::test]
    async fn unbound_client_fails_fast() {
        let client = unbound();
        assert!(matches!(
            client.get_vehicle_stats().await,
            Err(VehicleError::NotInitialized)
        ));
        assert!(matches!(
            client.lock_vehicle().await,
            Err(VehicleError::NotInitialized)
        ));
        assert!(matches!(
            client.unlock_vehicle().await,
            Err(VehicleError::NotInitialized)
        ));
        assert!(matches!(
            client.get_camera_feed().await,
            Err(VehicleError::NotInitialized)
        ));
    }
}
