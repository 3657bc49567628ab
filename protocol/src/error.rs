use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error payload the platform attaches to a rejected call or a failure event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlatformFailure {
    pub error_type: String,
    #[serde(default)]
    pub error_data: Value,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    #[error("{}: {}", .0.error_type, .0.error_data)]
    Platform(PlatformFailure),
    #[error("Unexpected bridge payload: {0}")]
    Decode(String),
    #[error("Bridge is not available")]
    Unavailable,
}

impl BridgeError {
    /// Interprets a raw rejection payload, keeping it verbatim if it does not
    /// look like a platform failure.
    pub fn from_payload(payload: Value) -> Self {
        match serde_json::from_value::<PlatformFailure>(payload.clone()) {
            Ok(failure) => Self::Platform(failure),
            Err(_) => Self::Decode(payload.to_string()),
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, BridgeError>;
