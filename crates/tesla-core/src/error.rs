//! Common error types for vehicle adapters

use thiserror::Error;

/// Result type for adapter operations
pub type VehicleResult<T> = Result<T, VehicleError>;

/// Errors that can occur in vehicle adapters
#[derive(Debug, Error)]
pub enum VehicleError {
    /// Bad input while constructing an adapter (e.g. empty VIN)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Could not establish a session with the vehicle-command backend
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Adapter used without an established session
    #[error("Vehicle client not initialized")]
    NotInitialized,

    /// A call against the backend session failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The backend answered but reported no data
    #[error("Empty response from vehicle backend")]
    EmptyResponse,

    /// Operation not supported by this adapter
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl VehicleError {
    /// Wrap an upstream failure with the operation it happened in
    pub fn upstream(context: &str, err: impl std::fmt::Display) -> Self {
        VehicleError::Upstream(format!("{}: {}", context, err))
    }

    /// Returns true if the operation is not available on this adapter
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, VehicleError::NotImplemented(_))
    }
}
