//! HTTP request handlers
//!
//! Both surfaces share the same translation from `VehicleClient` results to
//! JSON; they differ only in which adapter they pick and how failures are
//! worded.

pub mod dev;
pub mod vehicle;

use std::sync::Arc;

use axum::Json;
use serde::{Deserialize, Serialize};
use tesla_core::{VehicleClient, VehicleError, VehicleStats};

use crate::error::ApiError;
use crate::state::AppState;

/// Response for lock/unlock
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
}

/// Response for the camera feed
#[derive(Debug, Serialize, Deserialize)]
pub struct CameraFeedResponse {
    pub camera_feed_url: String,
}

/// Fallback for every method a route does not accept
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Which set of routes a request came in on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Surface {
    Dev,
    Production,
}

impl Surface {
    fn client(self, state: &AppState) -> Result<&Arc<dyn VehicleClient>, ApiError> {
        match self {
            Surface::Dev => Ok(state.dev_client()),
            Surface::Production => state.production_client(),
        }
    }

    fn error(self, err: VehicleError) -> ApiError {
        match self {
            Surface::Dev => ApiError::from(err),
            Surface::Production => ApiError::from_upstream(err),
        }
    }
}

pub(crate) async fn stats(
    surface: Surface,
    state: &AppState,
) -> Result<Json<VehicleStats>, ApiError> {
    let client = surface.client(state)?;
    let stats = client
        .get_vehicle_stats()
        .await
        .map_err(|e| surface.error(e))?;
    Ok(Json(stats))
}

pub(crate) async fn lock(
    surface: Surface,
    state: &AppState,
) -> Result<Json<CommandResponse>, ApiError> {
    let client = surface.client(state)?;
    let success = client.lock_vehicle().await.map_err(|e| surface.error(e))?;
    Ok(Json(CommandResponse { success }))
}

pub(crate) async fn unlock(
    surface: Surface,
    state: &AppState,
) -> Result<Json<CommandResponse>, ApiError> {
    let client = surface.client(state)?;
    let success = client.unlock_vehicle().await.map_err(|e| surface.error(e))?;
    Ok(Json(CommandResponse { success }))
}

pub(crate) async fn camera_feed(
    surface: Surface,
    state: &AppState,
) -> Result<Json<CameraFeedResponse>, ApiError> {
    let client = surface.client(state)?;
    let camera_feed_url = client.get_camera_feed().await.map_err(|e| surface.error(e))?;
    Ok(Json(CameraFeedResponse { camera_feed_url }))
}
