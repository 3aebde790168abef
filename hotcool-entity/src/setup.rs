//! Entity setup for a device
//!
//! Entities are created from the device's capability set; a device only gets
//! the entities its capabilities support.

use hotcool_core::Capability;
use hotcool_device::HotCoolDevice;
use std::sync::Arc;
use tracing::{debug, info};

use crate::number::NumberEntity;
use crate::oscillation_target::OscillationTargetNumber;

/// Capabilities required for the oscillation target number
pub const OSCILLATION_TARGET_CAPABILITIES: [Capability; 2] =
    [Capability::Heating, Capability::Oscillating];

/// Number entities to register for `device`
pub fn setup_numbers(device: &Arc<HotCoolDevice>) -> Vec<Box<dyn NumberEntity>> {
    let mut entities: Vec<Box<dyn NumberEntity>> = Vec::new();

    if device
        .capabilities()
        .contains_all(&OSCILLATION_TARGET_CAPABILITIES)
    {
        match OscillationTargetNumber::new(device.clone()) {
            Ok(entity) => entities.push(Box::new(entity)),
            Err(e) => debug!("Skipping oscillation target for {}: {}", device.serial(), e),
        }
    }

    info!(
        "Set up {} number entit{} for {}",
        entities.len(),
        if entities.len() == 1 { "y" } else { "ies" },
        device.serial()
    );
    entities
}

/// Find one of `entities` by unique id
pub fn find_number<'a>(
    entities: &'a [Box<dyn NumberEntity>],
    unique_id: &str,
) -> Option<&'a dyn NumberEntity> {
    entities
        .iter()
        .find(|entity| entity.unique_id() == unique_id)
        .map(|entity| entity.as_ref())
}
