//! Hotcool Core Library
//!
//! Shared types, models, and utilities for Hot+Cool fan heater control.
//! This crate is used by the device library, the entity adapter and the CLI.

pub mod capability;
pub mod command;
pub mod config;
pub mod error;
pub mod status;
pub mod types;

// Re-export commonly used types
pub use capability::{capabilities_for_product_type, Capability, CapabilitySet};
pub use command::ConfigurationCommand;
pub use config::{
    default_config_path, default_data_dir, resolve_config_path, snapshot_path, DeviceConfig,
    StaticConfig, CONFIG_ENV_VAR,
};
pub use error::*;
pub use status::DeviceStatus;
pub use types::*;
