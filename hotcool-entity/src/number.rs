//! Number entity contract
//!
//! The host framework drives numeric inputs through [`NumberEntity`]. It
//! reads the static [`NumberMetadata`] once, then calls the async accessors.

use async_trait::async_trait;
use hotcool_core::Result;
use serde::{Deserialize, Serialize};

/// How the host should render the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberMode {
    Auto,
    Box,
    Slider,
}

/// Entity grouping in the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}

/// Kind of quantity the number represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberDeviceClass {
    WindDirection,
}

/// Static description of a number entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberMetadata {
    /// Unit of measurement (e.g. "°")
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub mode: NumberMode,
    pub entity_category: Option<EntityCategory>,
    pub device_class: Option<NumberDeviceClass>,
}

/// Numeric input entity as seen by the host
#[async_trait]
pub trait NumberEntity: Send + Sync {
    /// Stable identifier, unique across the host
    fn unique_id(&self) -> String;

    /// Human-readable name
    fn name(&self) -> String;

    /// Unit, range and presentation
    fn metadata(&self) -> &NumberMetadata;

    /// Current value
    ///
    /// Whole-degree values such as angles are carried exactly; every `i32`
    /// converts to `f64` without rounding.
    async fn native_value(&self) -> Result<f64>;

    /// Apply a value chosen by the user
    ///
    /// The host rejects values outside `metadata().min..=max` before calling.
    async fn set_native_value(&self, value: f64) -> Result<()>;
}
