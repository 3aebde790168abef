//! hotcool-entity
//!
//! Adapts Hot+Cool devices to a home-automation host's number entity
//! contract. The host only sees [`NumberEntity`]; angle and mode handling
//! stays inside `hotcool-device`.
//
//! Public API:
//! - `number::NumberEntity`: async contract the host drives
//! - `oscillation_target::OscillationTargetNumber`: oscillation centre slider
//! - `setup::setup_numbers`: capability-gated entity creation

pub mod number;
pub mod oscillation_target;
pub mod setup;

pub use number::{EntityCategory, NumberDeviceClass, NumberEntity, NumberMetadata, NumberMode};
pub use oscillation_target::OscillationTargetNumber;
pub use setup::{find_number, setup_numbers};
