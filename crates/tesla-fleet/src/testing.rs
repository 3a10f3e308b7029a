//! Test utilities
//!
//! `TestServer` runs any axum router on an ephemeral port; `MockFleet` is an
//! in-process stand-in for the vehicle-command backend, so the real adapter
//! can be exercised end to end without a vehicle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::types::CommandResponse;

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve `router` on 127.0.0.1 with a random port
    pub async fn start(router: Router) -> std::io::Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        // Spawn the server
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Behaviour of a `MockFleet` backend
#[derive(Debug, Clone)]
pub struct MockFleetConfig {
    /// The only VIN the backend knows
    pub vin: String,
    /// Expected bearer token
    pub token: String,
    /// Body of `vehicle_data`'s `response` field
    pub vehicle_data: Value,
    /// Reject every command with this reason
    pub reject_commands: Option<String>,
    /// Answer `vehicle_data` and commands with 408 (vehicle asleep)
    pub asleep: bool,
}

impl MockFleetConfig {
    pub fn new(vin: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            vin: vin.into(),
            token: token.into(),
            vehicle_data: sample_vehicle_data(),
            reject_commands: None,
            asleep: false,
        }
    }
}

/// A representative `vehicle_data` payload
pub fn sample_vehicle_data() -> Value {
    json!({
        "display_name": "Roadrunner",
        "state": "online",
        "charge_state": {
            "battery_level": 81,
            "battery_range": 242.5,
            "charging_state": "Disconnected"
        },
        "vehicle_state": {
            "locked": true,
            "odometer": 12873.4
        }
    })
}

/// In-process vehicle-command backend
#[derive(Clone)]
pub struct MockFleet {
    config: Arc<MockFleetConfig>,
    commands: Arc<Mutex<Vec<String>>>,
}

impl MockFleet {
    pub fn new(config: MockFleetConfig) -> Self {
        Self {
            config: Arc::new(config),
            commands: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Commands received so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }

    /// Router serving the Fleet API subset used by the real adapter
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/1/vehicles/{vin}", get(get_vehicle))
            .route("/api/1/vehicles/{vin}/vehicle_data", get(vehicle_data))
            .route("/api/1/vehicles/{vin}/command/{command}", post(command))
            .with_state(self.clone())
    }

    fn check(&self, headers: &HeaderMap, vin: &str) -> Result<(), Response> {
        let expected = format!("Bearer {}", self.config.token);
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected);
        if !authorized {
            return Err(fleet_error(
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "invalid bearer token",
            ));
        }

        if vin != self.config.vin {
            return Err(fleet_error(
                StatusCode::NOT_FOUND,
                "not_found",
                "vehicle not found",
            ));
        }

        Ok(())
    }
}

fn fleet_error(status: StatusCode, error: &str, description: &str) -> Response {
    (
        status,
        Json(json!({ "error": error, "error_description": description })),
    )
        .into_response()
}

fn asleep() -> Response {
    fleet_error(
        StatusCode::REQUEST_TIMEOUT,
        "vehicle unavailable",
        "vehicle is offline or asleep",
    )
}

async fn get_vehicle(
    State(fleet): State<MockFleet>,
    Path(vin): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = fleet.check(&headers, &vin) {
        return resp;
    }

    let state = if fleet.config.asleep { "asleep" } else { "online" };
    Json(json!({
        "response": {
            "id": 1492931337156095u64,
            "vin": vin,
            "display_name": "Roadrunner",
            "state": state
        }
    }))
    .into_response()
}

async fn vehicle_data(
    State(fleet): State<MockFleet>,
    Path(vin): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = fleet.check(&headers, &vin) {
        return resp;
    }
    if fleet.config.asleep {
        return asleep();
    }

    Json(json!({ "response": fleet.config.vehicle_data })).into_response()
}

async fn command(
    State(fleet): State<MockFleet>,
    Path((vin, command)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = fleet.check(&headers, &vin) {
        return resp;
    }
    if fleet.config.asleep {
        return asleep();
    }
    if command != "door_lock" && command != "door_unlock" {
        return fleet_error(StatusCode::NOT_FOUND, "not_found", "unknown command");
    }

    fleet.commands.lock().push(command);

    let response = match &fleet.config.reject_commands {
        Some(reason) => CommandResponse::rejected(reason.clone()),
        None => CommandResponse::accepted(),
    };
    Json(json!({ "response": response })).into_response()
}
