//! Configuration types for Hotcool
//!
//! # Architecture
//!
//! - [`StaticConfig`] - known devices and the data directory, loaded once at startup
//! - [`DeviceConfig`] - one configured device and its capabilities
//!
//! Status snapshots live as `{data_dir}/{serial}.json`.

mod paths;
mod static_config;

pub use paths::{
    default_config_path, default_data_dir, resolve_config_path, snapshot_path, CONFIG_ENV_VAR,
};
pub use static_config::{DeviceConfig, StaticConfig};
