//! Error types for the Hotcool system

use thiserror::Error;

use crate::capability::Capability;

/// Core error type for Hotcool operations
#[derive(Error, Debug)]
pub enum HotCoolError {
    /// A status field expected to be numeric is missing or malformed
    #[error("Parse error: field '{field}' has non-numeric value {value:?}")]
    Parse {
        field: &'static str,
        value: Option<String>,
    },

    /// A raw mode token could not be decoded
    #[error("Decode error: unrecognized oscillation mode token '{0}'")]
    Decode(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Device lacks a capability required by the operation
    #[error("Device does not support {0}")]
    CapabilityMissing(Capability),

    /// Device not found
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Device client failed to deliver a command
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Hotcool operations
pub type Result<T> = std::result::Result<T, HotCoolError>;

impl From<serde_json::Error> for HotCoolError {
    fn from(err: serde_json::Error) -> Self {
        HotCoolError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for HotCoolError {
    fn from(err: toml::de::Error) -> Self {
        HotCoolError::Config(err.to_string())
    }
}
