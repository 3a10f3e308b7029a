//! Production surface handlers
//!
//! Backed by the real adapter. When it was never constructed every route
//! answers 503.

use axum::extract::State;
use axum::Json;
use tesla_core::VehicleStats;

use super::{CameraFeedResponse, CommandResponse, Surface};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<VehicleStats>, ApiError> {
    super::stats(Surface::Production, &state).await
}

/// POST /api/lock
pub async fn lock_vehicle(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse>, ApiError> {
    super::lock(Surface::Production, &state).await
}

/// POST /api/unlock
pub async fn unlock_vehicle(
    State(state): State<AppState>,
) -> Result<Json<CommandResponse>, ApiError> {
    super::unlock(Surface::Production, &state).await
}

/// GET /api/camera
///
/// 501 if the adapter cannot provide a camera feed.
pub async fn get_camera_feed(
    State(state): State<AppState>,
) -> Result<Json<CameraFeedResponse>, ApiError> {
    super::camera_feed(Surface::Production, &state).await
}
