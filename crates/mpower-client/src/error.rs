//! Device client error types.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors that can occur while talking to the device.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to build request: {0}")]
    Request(#[from] http::Error),

    #[error("failed to encode login form: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),

    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("http transport error: {0}")]
    Transport(#[from] hyper::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to decode sensor data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no outlet data visible from device")]
    NoData,
}
