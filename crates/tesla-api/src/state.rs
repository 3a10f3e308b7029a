//! Application state for the REST API

use std::sync::Arc;

use tesla_core::VehicleClient;

use crate::auth::ApiKey;
use crate::error::ApiError;

/// Application state shared across all handlers.
///
/// Both adapters are built once at startup and injected here; handlers never
/// reach for process-wide globals.
#[derive(Clone)]
pub struct AppState {
    /// Adapter behind the development surface
    dev: Arc<dyn VehicleClient>,
    /// Adapter behind the production surface, absent if it could not be built
    production: Option<Arc<dyn VehicleClient>>,
    /// Shared secret guarding the production surface
    api_key: ApiKey,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        dev: Arc<dyn VehicleClient>,
        production: Option<Arc<dyn VehicleClient>>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            dev,
            production,
            api_key: ApiKey::new(api_key),
        }
    }

    /// Adapter for the development surface
    pub fn dev_client(&self) -> &Arc<dyn VehicleClient> {
        &self.dev
    }

    /// Adapter for the production surface
    pub fn production_client(&self) -> Result<&Arc<dyn VehicleClient>, ApiError> {
        self.production
            .as_ref()
            .ok_or_else(ApiError::client_not_initialized)
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}
