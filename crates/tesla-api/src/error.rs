//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tesla_core::VehicleError;

/// Message returned by every production route when no real adapter exists
pub const CLIENT_NOT_INITIALIZED: &str =
    "Real Tesla client not initialized. Check server configuration.";

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 401 Unauthorized
    Unauthorized(String),
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 501 Not Implemented
    NotImplemented(String),
    /// 503 Service Unavailable
    ServiceUnavailable(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    /// The production adapter was never constructed
    pub fn client_not_initialized() -> Self {
        ApiError::ServiceUnavailable(CLIENT_NOT_INITIALIZED.to_string())
    }

    /// Map an adapter failure on the production surface.
    ///
    /// Same as the plain conversion, but generic failures say they came from
    /// the vehicle backend.
    pub fn from_upstream(err: VehicleError) -> Self {
        if err.is_not_implemented() {
            ApiError::NotImplemented(err.to_string())
        } else {
            ApiError::Internal(format!("Error from Tesla API: {}", err))
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::MethodNotAllowed => "Method not allowed".to_string(),
            ApiError::Unauthorized(msg)
            | ApiError::NotImplemented(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), %message, "API client error");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<VehicleError> for ApiError {
    fn from(err: VehicleError) -> Self {
        if err.is_not_implemented() {
            ApiError::NotImplemented(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}
