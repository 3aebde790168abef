//! Device status snapshot
//!
//! The device reports its state as a flat document of short field names
//! (`oson`, `osal`, ...) mapped to string values. State-change messages carry
//! `[previous, current]` pairs instead of plain strings; only the current
//! value is kept.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::command::ConfigurationCommand;
use crate::error::Result;

/// Raw value of a status field as it appears on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Current(String),
    Change(String, String),
}

impl FieldValue {
    fn into_current(self) -> String {
        match self {
            FieldValue::Current(value) => value,
            FieldValue::Change(_, current) => current,
        }
    }
}

/// Last-known device state, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceStatus {
    fields: BTreeMap<String, String>,
}

impl<'de> Deserialize<'de> for DeviceStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, FieldValue>::deserialize(deserializer)?;
        Ok(Self {
            fields: raw
                .into_iter()
                .map(|(k, v)| (k, v.into_current()))
                .collect(),
        })
    }
}

impl DeviceStatus {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a status document
    ///
    /// Accepts either the bare field map or a full state message with the
    /// fields nested under `product-state`.
    pub fn from_json(content: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(content)?;
        if let Some(state) = value.get_mut("product-state") {
            return Ok(serde_json::from_value(state.take())?);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize the snapshot as a flat field map
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Current value of a field, if reported
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Snapshot the device would report after accepting `command`
    pub fn apply(&self, command: &ConfigurationCommand) -> Self {
        let mut next = self.clone();
        for (field, value) in command.iter() {
            next.fields.insert(field.to_string(), value.to_string());
        }
        next
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

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DeviceStatus {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
