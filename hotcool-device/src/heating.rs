//! Heating Module - heat mode and heat target
//!
//! Fields:
//! - `hmod`: requested heat mode, `HEAT` / `OFF`
//! - `hsta`: whether the element is currently heating
//! - `hmax`: heat target in tenths of Kelvin, 4 digits

use hotcool_core::{ConfigurationCommand, HeatMode, HotCoolError, Result};
use std::sync::Arc;

use crate::client::{dispatch, DeviceClient};
use crate::observe::DiagnosticSink;

/// Lowest accepted heat target in Kelvin (1 °C)
pub const MIN_HEAT_TARGET_KELVIN: f64 = 274.0;

/// Highest accepted heat target in Kelvin (37 °C)
pub const MAX_HEAT_TARGET_KELVIN: f64 = 310.0;

/// Heating control for one device
pub struct HeatingModule {
    client: Arc<dyn DeviceClient>,
    sink: Arc<dyn DiagnosticSink>,
}

impl HeatingModule {
    pub fn new(client: Arc<dyn DeviceClient>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { client, sink }
    }

    pub fn is_heat_mode_on(&self) -> bool {
        self.client.status().field("hmod") == Some(HeatMode::Heat.token())
    }

    pub fn is_heating(&self) -> bool {
        self.client.status().field("hsta") == Some("HEAT")
    }

    /// Heat target in Kelvin
    pub fn heat_target(&self) -> Result<f64> {
        let status = self.client.status();
        let raw = status.field("hmax");
        raw.and_then(|value| value.parse::<i32>().ok())
            .map(|deci_kelvin| f64::from(deci_kelvin) / 10.0)
            .ok_or_else(|| HotCoolError::Parse {
                field: "hmax",
                value: raw.map(str::to_string),
            })
    }

    /// Switch heat mode on with a new target in Kelvin
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the target is outside 274–310 K.
    pub fn set_heat_target(&self, kelvin: f64) -> Result<ConfigurationCommand> {
        if !(MIN_HEAT_TARGET_KELVIN..=MAX_HEAT_TARGET_KELVIN).contains(&kelvin) {
            return Err(HotCoolError::InvalidInput(format!(
                "Heat target must be between {} and {} kelvin, got {}",
                MIN_HEAT_TARGET_KELVIN, MAX_HEAT_TARGET_KELVIN, kelvin
            )));
        }

        let deci_kelvin = (kelvin * 10.0).round() as i32;
        self.send(
            ConfigurationCommand::new()
                .heat_mode(HeatMode::Heat)
                .heat_target(deci_kelvin),
        )
    }

    pub fn enable_heat_mode(&self) -> Result<ConfigurationCommand> {
        self.send(ConfigurationCommand::new().heat_mode(HeatMode::Heat))
    }

    pub fn disable_heat_mode(&self) -> Result<ConfigurationCommand> {
        self.send(ConfigurationCommand::new().heat_mode(HeatMode::Off))
    }

    fn send(&self, command: ConfigurationCommand) -> Result<ConfigurationCommand> {
        dispatch(self.client.as_ref(), self.sink.as_ref(), command)
    }
}
