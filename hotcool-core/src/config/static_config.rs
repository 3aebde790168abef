//! Static configuration loaded once at startup
//!
//! This configuration is read-only after the CLI starts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::paths::{default_data_dir, snapshot_path};
use crate::capability::{capabilities_for_product_type, CapabilitySet};
use crate::error::{HotCoolError, Result};

/// A configured device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// Device serial number, also used as the entity id prefix
    pub serial: String,

    /// Human-readable device name
    pub name: String,

    /// Product type code (e.g. "527")
    pub product_type: String,

    /// Explicit capabilities, overriding the product type defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<CapabilitySet>,
}

impl DeviceConfig {
    /// Capabilities of this device, from config or product type
    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
            .clone()
            .unwrap_or_else(|| capabilities_for_product_type(&self.product_type))
    }

    /// Path of this device's status snapshot inside `data_dir`
    pub fn status_path(&self, data_dir: &Path) -> PathBuf {
        snapshot_path(data_dir, &self.serial)
    }
}

/// Static configuration for Hotcool.
///
/// Located at `~/.config/hotcool/config.toml` by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticConfig {
    /// Directory holding status snapshot files
    ///
    /// Defaults to `~/.local/share/hotcool` (XDG data directory).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Known devices
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            devices: Vec::new(),
        }
    }
}

impl StaticConfig {
    /// Parse StaticConfig from TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize StaticConfig to TOML string.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from a file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check that serials are non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for device in &self.devices {
            if device.serial.trim().is_empty() {
                return Err(HotCoolError::Config(format!(
                    "Device '{}' has an empty serial",
                    device.name
                )));
            }
            if !seen.insert(device.serial.as_str()) {
                return Err(HotCoolError::Config(format!(
                    "Duplicate device serial: {}",
                    device.serial
                )));
            }
        }
        Ok(())
    }

    /// Look up a device by serial, or the only device when `serial` is `None`.
    pub fn device(&self, serial: Option<&str>) -> Result<&DeviceConfig> {
        match serial {
            Some(serial) => self
                .devices
                .iter()
                .find(|d| d.serial == serial)
                .ok_or_else(|| HotCoolError::DeviceNotFound(serial.to_string())),
            None => match self.devices.as_slice() {
                [device] => Ok(device),
                [] => Err(HotCoolError::Config("No devices configured".to_string())),
                _ => Err(HotCoolError::Config(
                    "Several devices configured, select one with --device".to_string(),
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;

    const TWO_DEVICES: &str = r#"
        data_dir = "/custom/data"

        [[devices]]
        serial = "AB1-EU-ABC1234A"
        name = "Bedroom"
        product_type = "527"

        [[devices]]
        serial = "CD2-EU-DEF5678B"
        name = "Office"
        product_type = "999"
        capabilities = ["oscillating"]
    "#;

    #[test]
    fn test_default_static_config() {
        let config = StaticConfig::default();
        assert!(config.devices.is_empty());
        assert!(config.data_dir.ends_with("hotcool"));
    }

    #[test]
    fn test_static_config_deserialization() {
        let config = StaticConfig::from_toml(TWO_DEVICES).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.devices.len(), 2);

        let bedroom = config.device(Some("AB1-EU-ABC1234A")).unwrap();
        assert!(bedroom
            .capabilities()
            .contains_all(&[Capability::Heating, Capability::Oscillating]));
        assert_eq!(
            bedroom.status_path(&config.data_dir),
            PathBuf::from("/custom/data/AB1-EU-ABC1234A.json")
        );

        let office = config.device(Some("CD2-EU-DEF5678B")).unwrap();
        assert!(!office.capabilities().contains(Capability::Heating));
        assert!(office.capabilities().contains(Capability::Oscillating));
    }

    #[test]
    fn test_device_selection() {
        let config = StaticConfig::from_toml(TWO_DEVICES).unwrap();
        assert!(config.device(None).is_err());
        assert!(matches!(
            config.device(Some("missing")),
            Err(HotCoolError::DeviceNotFound(_))
        ));

        let single = StaticConfig::from_toml(
            r#"
            [[devices]]
            serial = "AB1"
            name = "Only"
            product_type = "455"
        "#,
        )
        .unwrap();
        assert_eq!(single.device(None).unwrap().name, "Only");
    }

    #[test]
    fn test_duplicate_serial_rejected() {
        let result = StaticConfig::from_toml(
            r#"
            [[devices]]
            serial = "AB1"
            name = "One"
            product_type = "527"

            [[devices]]
            serial = "AB1"
            name = "Two"
            product_type = "527"
        "#,
        );
        assert!(matches!(result, Err(HotCoolError::Config(_))));
    }

    #[test]
    fn test_static_config_serialization() {
        let config = StaticConfig::from_toml(TWO_DEVICES).unwrap();
        let toml_str = config.to_toml().unwrap();

        assert!(toml_str.contains("[[devices]]"));
        assert!(toml_str.contains("data_dir"));
        let reparsed = StaticConfig::from_toml(&toml_str).unwrap();
        assert_eq!(reparsed.devices, config.devices);
    }
}
