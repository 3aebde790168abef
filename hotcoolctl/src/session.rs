//! Device session over a status snapshot file
//!
//! The CLI has no network client. It reads the device's last reported status
//! from a JSON file, runs operations against an echoing in-memory client, and
//! can write the resulting snapshot back.

use anyhow::{Context, Result};
use hotcool_core::{ConfigurationCommand, DeviceStatus, StaticConfig};
use hotcool_device::{DeviceClient, HotCoolDevice, SnapshotClient, TracingSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// A configured device bound to its snapshot file
pub struct Session {
    device: Arc<HotCoolDevice>,
    client: Arc<SnapshotClient>,
    status_path: PathBuf,
}

impl Session {
    /// Open the device `serial` (or the only configured device)
    ///
    /// The snapshot is read from `status_override` when given, otherwise from
    /// `{data_dir}/{serial}.json`.
    pub fn open(
        config: &StaticConfig,
        serial: Option<&str>,
        status_override: Option<&Path>,
    ) -> Result<Self> {
        let device_config = config.device(serial)?;
        let status_path = status_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| device_config.status_path(&config.data_dir));

        debug!("Reading status snapshot: {}", status_path.display());
        let content = std::fs::read_to_string(&status_path).with_context(|| {
            format!("Failed to read status snapshot {}", status_path.display())
        })?;
        let status = DeviceStatus::from_json(&content).with_context(|| {
            format!("Failed to parse status snapshot {}", status_path.display())
        })?;

        let client = Arc::new(SnapshotClient::with_echo(status));
        let device = HotCoolDevice::from_config(device_config, client.clone(), Arc::new(TracingSink));

        info!(
            "Opened {} ({}) with capabilities [{}]",
            device.name(),
            device.serial(),
            device.capabilities()
        );

        Ok(Self {
            device: Arc::new(device),
            client,
            status_path,
        })
    }

    pub fn device(&self) -> &Arc<HotCoolDevice> {
        &self.device
    }

    pub fn status_path(&self) -> &Path {
        &self.status_path
    }

    /// Commands issued during this session, oldest first
    pub fn sent_commands(&self) -> Vec<ConfigurationCommand> {
        self.client.sent_commands()
    }

    /// Save the snapshot, including every command issued, to the snapshot file
    pub fn write_back(&self) -> Result<()> {
        let json = self.client.status().to_json()?;
        std::fs::write(&self.status_path, json).with_context(|| {
            format!("Failed to write status snapshot {}", self.status_path.display())
        })?;
        info!("Wrote status snapshot {}", self.status_path.display());
        Ok(())
    }
}
