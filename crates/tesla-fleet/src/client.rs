//! Fleet API HTTP client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{FleetClientError, Result};
use crate::types::{CommandResponse, FleetErrorResponse, FleetResponse, VehicleSummary};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for a Fleet API compatible vehicle-command backend.
///
/// The access token is sent as `Authorization: Bearer <token>` on every
/// request.
#[derive(Debug, Clone)]
pub struct FleetClient {
    client: Client,
    base_url: Url,
}

impl FleetClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the backend (e.g., "https://localhost:4443")
    /// * `token` - OAuth access token presented to the backend
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Self::with_config(base_url, token, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        token: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut header_value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| FleetClientError::ParseError(format!("Invalid auth token: {}", e)))?;
        header_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, header_value);

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base_url>/api/1/vehicles/<segments...>`.
    ///
    /// Segments are percent-encoded and appended to any path prefix the base
    /// URL already carries.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FleetClientError::ParseError(format!(
                    "Base URL cannot have a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["api", "1", "vehicles"])
            .extend(segments);
        Ok(url)
    }

    /// Fetch the vehicle record; used to confirm the VIN is reachable
    #[instrument(skip(self))]
    pub async fn get_vehicle(&self, vin: &str) -> Result<VehicleSummary> {
        let url = self.endpoint(&[vin])?;
        debug!("Fetching vehicle from {}", url);

        let response = self.client.get(url).send().await?;
        self.handle_response::<FleetResponse<VehicleSummary>>(response)
            .await
            .map(|r| r.response)
    }

    /// Fetch the full vehicle state.
    ///
    /// Returns `None` when the backend answers with a missing or `null`
    /// `response` field.
    #[instrument(skip(self))]
    pub async fn vehicle_data(&self, vin: &str) -> Result<Option<Value>> {
        let url = self.endpoint(&[vin, "vehicle_data"])?;

        let response = self.client.get(url).send().await?;
        self.handle_response::<FleetResponse<Option<Value>>>(response)
            .await
            .map(|r| r.response.filter(|v| !v.is_null()))
    }

    /// Issue a vehicle command (e.g. "door_lock")
    #[instrument(skip(self))]
    pub async fn command(&self, vin: &str, command: &str) -> Result<CommandResponse> {
        let url = self.endpoint(&[vin, "command", command])?;
        debug!("Sending command to {}", url);

        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        self.handle_response::<FleetResponse<CommandResponse>>(response)
            .await
            .map(|r| r.response)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| FleetClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    async fn extract_error_from_status(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> FleetClientError {
        // Try to parse error response body
        let message = response
            .json::<FleetErrorResponse>()
            .await
            .ok()
            .and_then(|err| err.message())
            .unwrap_or_else(|| format!("HTTP {}", status));

        match status {
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => FleetClientError::Timeout,
            _ => FleetClientError::server_error(status.as_u16(), message),
        }
    }
}
