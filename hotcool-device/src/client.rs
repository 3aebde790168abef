//! Device client contract
//!
//! The network client that talks to the appliance lives outside this crate.
//! It is seen here only through [`DeviceClient`]: a status snapshot to read
//! and a partial configuration update to send.

use hotcool_core::{ConfigurationCommand, DeviceStatus, Result};
use std::sync::{Mutex, RwLock};
use tracing::debug;

use crate::observe::{DiagnosticEvent, DiagnosticSink};

/// Trait for device client abstraction
///
/// This trait enables testing the capability modules without a real device
/// by allowing in-memory implementations.
pub trait DeviceClient: Send + Sync {
    /// Last-known status reported by the device
    fn status(&self) -> DeviceStatus;

    /// Send a partial configuration update
    ///
    /// Fields not present in `command` are left unchanged on the device.
    fn set_configuration(&self, command: &ConfigurationCommand) -> Result<()>;
}

/// Send `command` through `client` and report it to `sink`
pub(crate) fn dispatch(
    client: &dyn DeviceClient,
    sink: &dyn DiagnosticSink,
    command: ConfigurationCommand,
) -> Result<ConfigurationCommand> {
    client.set_configuration(&command)?;
    sink.record(DiagnosticEvent::CommandSent {
        command: command.clone(),
    });
    Ok(command)
}

/// In-memory device client holding a status snapshot
///
/// Commands are recorded in order. With echo enabled, every accepted command
/// is also merged into the snapshot, as the device would report it back.
#[derive(Debug, Default)]
pub struct SnapshotClient {
    status: RwLock<DeviceStatus>,
    sent: Mutex<Vec<ConfigurationCommand>>,
    echo: bool,
}

impl SnapshotClient {
    /// Client whose snapshot never changes on its own
    pub fn new(status: DeviceStatus) -> Self {
        Self {
            status: RwLock::new(status),
            sent: Mutex::new(Vec::new()),
            echo: false,
        }
    }

    /// Client that merges sent commands into its snapshot
    pub fn with_echo(status: DeviceStatus) -> Self {
        Self {
            echo: true,
            ..Self::new(status)
        }
    }

    /// Replace the snapshot, as a status refresh would
    pub fn replace_status(&self, status: DeviceStatus) {
        *self
            .status
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = status;
    }

    /// Commands sent so far, oldest first
    pub fn sent_commands(&self) -> Vec<ConfigurationCommand> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Most recent command, if any
    pub fn last_command(&self) -> Option<ConfigurationCommand> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }
}

impl DeviceClient for SnapshotClient {
    fn status(&self) -> DeviceStatus {
        self.status
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_configuration(&self, command: &ConfigurationCommand) -> Result<()> {
        debug!("Snapshot client accepted {} field(s)", command.len());

        if self.echo {
            let mut status = self
                .status
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *status = status.apply(command);
        }

        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(command.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::RecordingSink;

    #[test]
    fn test_snapshot_client_records_without_echo() {
        let client = SnapshotClient::new(DeviceStatus::new().with_field("oson", "OFF"));
        let command = ConfigurationCommand::new().oscillation(true);

        client.set_configuration(&command).unwrap();

        assert_eq!(client.sent_commands(), vec![command.clone()]);
        assert_eq!(client.last_command(), Some(command));
        assert_eq!(client.status().field("oson"), Some("OFF"));
    }

    #[test]
    fn test_snapshot_client_echo_updates_status() {
        let client = SnapshotClient::with_echo(DeviceStatus::new().with_field("oson", "OFF"));
        client
            .set_configuration(&ConfigurationCommand::new().oscillation(true))
            .unwrap();

        assert_eq!(client.status().field("oson"), Some("ON"));
    }

    #[test]
    fn test_replace_status() {
        let client = SnapshotClient::new(DeviceStatus::new());
        client.replace_status(DeviceStatus::new().with_field("hmod", "HEAT"));
        assert_eq!(client.status().field("hmod"), Some("HEAT"));
    }

    #[test]
    fn test_dispatch_reports_sent_command() {
        let client = SnapshotClient::new(DeviceStatus::new());
        let sink = RecordingSink::new();
        let command = ConfigurationCommand::new().fan_power(true);

        let sent = dispatch(&client, &sink, command.clone()).unwrap();

        assert_eq!(sent, command);
        assert_eq!(
            sink.events(),
            vec![DiagnosticEvent::CommandSent { command }]
        );
    }
}
