//! tesla-api - REST API layer for the vehicle-control façade
//!
//! Serves two parallel surfaces over the same `VehicleClient` capability:
//!
//! * `/api/dev/*` - unauthenticated, always backed by the mock adapter
//! * `/api/*` - guarded by the `X-API-KEY` gate, backed by the real adapter
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use tesla_api::{create_router, AppState};
//! use tesla_core::MockVehicleClient;
//!
//! let state = AppState::new(Arc::new(MockVehicleClient::new()), None, Some("secret".into()));
//! let router = create_router(state);
//! ```

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

pub use auth::{ApiKey, API_KEY_HEADER};
pub use error::ApiError;
pub use state::AppState;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::method_not_allowed;

/// Create the REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Development surface (mock adapter, no auth)
    let dev = Router::new()
        .route(
            "/api/dev/stats",
            get(handlers::dev::get_stats).fallback(method_not_allowed),
        )
        .route(
            "/api/dev/lock",
            post(handlers::dev::lock_vehicle).fallback(method_not_allowed),
        )
        .route(
            "/api/dev/unlock",
            post(handlers::dev::unlock_vehicle).fallback(method_not_allowed),
        )
        .route(
            "/api/dev/camera",
            get(handlers::dev::get_camera_feed).fallback(method_not_allowed),
        );

    // Production surface (real adapter, behind the API key gate)
    let production = Router::new()
        .route(
            "/api/stats",
            get(handlers::vehicle::get_stats).fallback(method_not_allowed),
        )
        .route(
            "/api/lock",
            post(handlers::vehicle::lock_vehicle).fallback(method_not_allowed),
        )
        .route(
            "/api/unlock",
            post(handlers::vehicle::unlock_vehicle).fallback(method_not_allowed),
        )
        .route(
            "/api/camera",
            get(handlers::vehicle::get_camera_feed).fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.api_key().clone(),
            auth::require_api_key,
        ));

    Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        .merge(dev)
        .merge(production)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
