//! Development surface handlers - always backed by the mock adapter

use axum::extract::State;
use axum::Json;
use tesla_core::VehicleStats;

use super::{CameraFeedResponse, CommandResponse, Surface};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/dev/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<VehicleStats>, ApiError> {
    super::stats(Surface::Dev, &state).await
}

/// POST /api/dev/lock
pub async fn lock_vehicle(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse>, ApiError> {
    super::lock(Surface::Dev, &state).await
}

/// POST /api/dev/unlock
pub async fn unlock_vehicle(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse>, ApiError> {
    super::unlock(Surface::Dev, &state).await
}

/// GET /api/dev/camera
pub async fn get_camera_feed(
    State(state): State<AppState>,
) -> Result<Json<CameraFeedResponse>, ApiError> {
    super::camera_feed(Surface::Dev, &state).await
}
