//! Full stack tests: REST API -> real adapter -> Fleet API client -> MockFleet
//!
//! Two servers run per test: a `MockFleet` playing the vehicle-command
//! backend and the daemon router wired to a `RealVehicleClient` connected to it.

use std::io::Write;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tesla_api::{create_router, AppState, API_KEY_HEADER};
use tesla_core::{MockVehicleClient, VehicleClient};
use tesla_fleet::testing::{MockFleet, MockFleetConfig, TestServer};
use tesla_fleet::{FleetConfig, RealVehicleClient};

const VIN: &str = "5YJ3E1EA7KF000001";
const TOKEN: &str = "fleet-token";
const API_KEY: &str = "dashboard-secret";

/// Running backend plus the daemon in front of it
struct Stack {
    fleet: MockFleet,
    _backend: TestServer,
    api: TestServer,
}

impl Stack {
    async fn start(config: MockFleetConfig) -> Self {
        let fleet = MockFleet::new(config);
        let backend = TestServer::start(fleet.router())
            .await
            .expect("Failed to start mock fleet");

        let fleet_config = FleetConfig {
            base_url: backend.base_url(),
            access_token: Some(TOKEN.to_string()),
            ..Default::default()
        };
        let real = RealVehicleClient::connect(VIN, &fleet_config)
            .await
            .expect("Failed to connect real client");

        let api = start_api(Some(Arc::new(real))).await;

        Self {
            fleet,
            _backend: backend,
            api,
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .get(self.api.url(path))
            .header(API_KEY_HEADER, API_KEY)
            .send()
            .await
            .expect("request failed");
        let status = response.status();
        (status, response.json().await.expect("body is not JSON"))
    }

    async fn post(&self, path: &str) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(self.api.url(path))
            .header(API_KEY_HEADER, API_KEY)
            .send()
            .await
            .expect("request failed");
        let status = response.status();
        (status, response.json().await.expect("body is not JSON"))
    }
}

async fn start_api(production: Option<Arc<dyn VehicleClient>>) -> TestServer {
    let state = AppState::new(
        Arc::new(MockVehicleClient::new()),
        production,
        Some(API_KEY.to_string()),
    );
    TestServer::start(create_router(state))
        .await
        .expect("Failed to start API server")
}

#[tokio::test]
async fn test_production_stats_are_flattened() {
    let stack = Stack::start(MockFleetConfig::new(VIN, TOKEN)).await;

    let (status, body) = stack.get("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "vin": VIN,
            "display_name": "Roadrunner",
            "state": "online",
            "charge_state.battery_level": 81,
            "charge_state.battery_range": 242.5,
            "charge_state.charging_state": "Disconnected",
            "vehicle_state.locked": true,
            "vehicle_state.odometer": 12873.4
        })
    );
}

#[tokio::test]
async fn test_backend_vin_does_not_override_bound_vin() {
    let mut config = MockFleetConfig::new(VIN, TOKEN);
    config.vehicle_data = json!({ "vin": "SOMEONE-ELSE", "odometer": 10 });
    let stack = Stack::start(config).await;

    let (status, body) = stack.get("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "vin": VIN, "odometer": 10 }));
}

#[tokio::test]
async fn test_lock_and_unlock_reach_backend() {
    let stack = Stack::start(MockFleetConfig::new(VIN, TOKEN)).await;

    let (status, body) = stack.post("/api/lock").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = stack.post("/api/unlock").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    assert_eq!(stack.fleet.commands(), vec!["door_lock", "door_unlock"]);
}

#[tokio::test]
async fn test_rejected_command_is_internal_error() {
    let mut config = MockFleetConfig::new(VIN, TOKEN);
    config.reject_commands = Some("user_present".to_string());
    let stack = Stack::start(config).await;

    let (status, body) = stack.post("/api/lock").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Error from Tesla API: "), "{}", message);
    assert!(message.contains("user_present"), "{}", message);
}

#[tokio::test]
async fn test_asleep_vehicle_is_internal_error() {
    let mut config = MockFleetConfig::new(VIN, TOKEN);
    config.asleep = true;
    let stack = Stack::start(config).await;

    let (status, body) = stack.get("/api/stats").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Error from Tesla API: "));
    assert!(stack.fleet.commands().is_empty());
}

#[tokio::test]
async fn test_camera_not_implemented() {
    let stack = Stack::start(MockFleetConfig::new(VIN, TOKEN)).await;

    let (status, body) = stack.get("/api/camera").await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["error"].as_str().unwrap().contains("camera"));
}

#[tokio::test]
async fn test_dev_surface_unaffected_by_real_client() {
    let stack = Stack::start(MockFleetConfig::new(VIN, TOKEN)).await;

    let (status, body) = stack.get("/api/dev/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicle_name"], "DevTesla");
    assert!(stack.fleet.commands().is_empty());
}

#[tokio::test]
async fn test_token_file_credentials() {
    let fleet = MockFleet::new(MockFleetConfig::new(VIN, TOKEN));
    let backend = TestServer::start(fleet.router()).await.unwrap();

    let mut token_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(token_file, "{}", TOKEN).unwrap();

    let config = FleetConfig {
        base_url: backend.base_url(),
        token_file: Some(token_file.path().to_path_buf()),
        ..Default::default()
    };
    let real = RealVehicleClient::connect(VIN, &config).await.unwrap();
    let api = start_api(Some(Arc::new(real))).await;

    let response = reqwest::Client::new()
        .post(api.url("/api/lock"))
        .header(API_KEY_HEADER, API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fleet.commands(), vec!["door_lock"]);
}

#[tokio::test]
async fn test_failed_connect_leaves_production_degraded() {
    let fleet = MockFleet::new(MockFleetConfig::new(VIN, TOKEN));
    let backend = TestServer::start(fleet.router()).await.unwrap();

    // Wrong token: the session cannot be established
    let config = FleetConfig {
        base_url: backend.base_url(),
        access_token: Some("stale-token".to_string()),
        ..Default::default()
    };
    let production = RealVehicleClient::connect(VIN, &config)
        .await
        .ok()
        .map(|client| Arc::new(client) as Arc<dyn VehicleClient>);
    assert!(production.is_none());

    let api = start_api(production).await;
    let response = reqwest::Client::new()
        .get(api.url("/api/stats"))
        .header(API_KEY_HEADER, API_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = reqwest::get(api.url("/api/dev/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
