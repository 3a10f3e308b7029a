//! Wire types of the Fleet API
//!
//! Every successful body is wrapped as `{"response": ...}`; errors carry
//! `error` and optionally `error_description`.

use serde::{Deserialize, Serialize};

/// `{"response": T}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetResponse<T> {
    pub response: T,
}

/// Vehicle record returned by `GET /api/1/vehicles/{vin}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// "online", "asleep", "offline"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Outcome of a vehicle command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub result: bool,
    #[serde(default)]
    pub reason: String,
}

impl CommandResponse {
    pub fn accepted() -> Self {
        Self {
            result: true,
            reason: String::new(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            result: false,
            reason: reason.into(),
        }
    }
}

/// Error body returned by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetErrorResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl FleetErrorResponse {
    /// The most descriptive message available
    pub fn message(&self) -> Option<String> {
        self.error_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .or(Some(self.error.as_str()).filter(|e| !e.is_empty()))
            .map(str::to_string)
    }
}
