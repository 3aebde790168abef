//! Outbound configuration commands
//!
//! A [`ConfigurationCommand`] is a partial update: fields it does not carry
//! are left unchanged on the device.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{HeatMode, OscillationMode};

/// Format an angle or other small integer as the device's 4-digit field
///
/// - 5 → "0005"
/// - 180 → "0180"
#[inline]
pub fn format_field_number(value: i32) -> String {
    format!("{:04}", value)
}

/// Field-name to value map sent to the device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationCommand {
    fields: BTreeMap<String, String>,
}

fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}

impl ConfigurationCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary field
    pub fn set(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// `oson`
    pub fn oscillation(self, on: bool) -> Self {
        self.set("oson", on_off(on))
    }

    /// `fpwr`
    pub fn fan_power(self, on: bool) -> Self {
        self.set("fpwr", on_off(on))
    }

    /// `ancp`
    pub fn oscillation_mode(self, mode: OscillationMode) -> Self {
        self.set("ancp", mode.token())
    }

    /// `osal` and `osau`
    pub fn angles(self, low: i32, high: i32) -> Self {
        self.set("osal", format_field_number(low))
            .set("osau", format_field_number(high))
    }

    /// `hmod`
    pub fn heat_mode(self, mode: HeatMode) -> Self {
        self.set("hmod", mode.token())
    }

    /// `hmax`, in tenths of Kelvin
    pub fn heat_target(self, deci_kelvin: i32) -> Self {
        self.set("hmax", format_field_number(deci_kelvin))
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
