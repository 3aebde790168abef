//! Oscillation target number
//!
//! Exposes the centre of the oscillation sweep as a 5–355° slider.

use async_trait::async_trait;
use hotcool_core::{Result, MAX_ANGLE, MIN_ANGLE};
use hotcool_device::HotCoolDevice;
use std::sync::Arc;
use tracing::debug;

use crate::number::{EntityCategory, NumberDeviceClass, NumberEntity, NumberMetadata, NumberMode};

static METADATA: NumberMetadata = NumberMetadata {
    unit: "°",
    min: MIN_ANGLE as f64,
    max: MAX_ANGLE as f64,
    step: 1.0,
    mode: NumberMode::Slider,
    entity_category: Some(EntityCategory::Diagnostic),
    device_class: Some(NumberDeviceClass::WindDirection),
};

/// Number entity backed by the device's oscillation controller
pub struct OscillationTargetNumber {
    device: Arc<HotCoolDevice>,
}

impl OscillationTargetNumber {
    /// Suffix appended to the device serial to form the unique id
    pub const SUB_UNIQUE_ID: &'static str = "oscillation_target";

    /// Create the entity for `device`
    ///
    /// # Errors
    ///
    /// Returns `CapabilityMissing` if the device cannot oscillate.
    pub fn new(device: Arc<HotCoolDevice>) -> Result<Self> {
        device.require_oscillation()?;
        Ok(Self { device })
    }
}

#[async_trait]
impl NumberEntity for OscillationTargetNumber {
    fn unique_id(&self) -> String {
        format!("{}-{}", self.device.serial(), Self::SUB_UNIQUE_ID)
    }

    fn name(&self) -> String {
        format!("{} Oscillation Target", self.device.name())
    }

    fn metadata(&self) -> &NumberMetadata {
        &METADATA
    }

    /// Integer oscillation target, unchanged
    async fn native_value(&self) -> Result<f64> {
        let target = self.device.require_oscillation()?.oscillation_target();
        Ok(f64::from(target))
    }

    async fn set_native_value(&self, value: f64) -> Result<()> {
        debug!("Setting oscillation target to: {}", value);
        // Truncates toward zero; the host enforces the advertised range.
        let target = value as i32;
        self.device
            .require_oscillation()?
            .set_oscillation_target(target)?;
        Ok(())
    }
}
