//! Device record
//!
//! A [`HotCoolDevice`] owns one capability module per capability in its
//! [`CapabilitySet`]. Callers query the set (or the module accessors) instead
//! of inspecting the product model.

use hotcool_core::{
    Capability, CapabilitySet, DeviceConfig, DeviceStatus, HotCoolError, Result,
};
use std::sync::Arc;
use tracing::debug;

use crate::client::DeviceClient;
use crate::heating::HeatingModule;
use crate::observe::DiagnosticSink;
use crate::oscillation::OscillationController;

/// One Hot+Cool appliance
pub struct HotCoolDevice {
    serial: String,
    name: String,
    capabilities: CapabilitySet,
    client: Arc<dyn DeviceClient>,
    oscillation: Option<OscillationController>,
    heating: Option<HeatingModule>,
}

impl HotCoolDevice {
    /// Create a device with a module for each supported capability
    pub fn new(
        serial: impl Into<String>,
        name: impl Into<String>,
        capabilities: CapabilitySet,
        client: Arc<dyn DeviceClient>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let serial = serial.into();
        debug!("Creating device {} with capabilities [{}]", serial, capabilities);

        let oscillation = capabilities
            .contains(Capability::Oscillating)
            .then(|| OscillationController::new(client.clone(), sink.clone()));
        let heating = capabilities
            .contains(Capability::Heating)
            .then(|| HeatingModule::new(client.clone(), sink.clone()));

        Self {
            serial,
            name: name.into(),
            capabilities,
            client,
            oscillation,
            heating,
        }
    }

    /// Create a device from its configuration entry
    pub fn from_config(
        config: &DeviceConfig,
        client: Arc<dyn DeviceClient>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self::new(
            config.serial.clone(),
            config.name.clone(),
            config.capabilities(),
            client,
            sink,
        )
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Current status snapshot from the client
    pub fn status(&self) -> DeviceStatus {
        self.client.status()
    }

    pub fn oscillation(&self) -> Option<&OscillationController> {
        self.oscillation.as_ref()
    }

    pub fn heating(&self) -> Option<&HeatingModule> {
        self.heating.as_ref()
    }

    /// Oscillation module, or `CapabilityMissing`
    pub fn require_oscillation(&self) -> Result<&OscillationController> {
        self.oscillation
            .as_ref()
            .ok_or(HotCoolError::CapabilityMissing(Capability::Oscillating))
    }

    /// Heating module, or `CapabilityMissing`
    pub fn require_heating(&self) -> Result<&HeatingModule> {
        self.heating
            .as_ref()
            .ok_or(HotCoolError::CapabilityMissing(Capability::Heating))
    }
}

impl std::fmt::Debug for HotCoolDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotCoolDevice")
            .field("serial", &self.serial)
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
