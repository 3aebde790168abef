//! hotcool-device
//!
//! Device control library for Hot+Cool fan heaters. A [`HotCoolDevice`] is a
//! record of independent capability modules that read the device's status
//! snapshot and write configuration commands through a [`DeviceClient`].
//
//! Public API:
//! - `device::HotCoolDevice`: device record composed from capability modules
//! - `oscillation::OscillationController`: oscillation mode and angle control
//! - `heating::HeatingModule`: heat mode and heat target control
//! - `client::DeviceClient`: transport contract supplied by the caller
//! - `observe::DiagnosticSink`: injected sink for diagnostic events

pub mod client;
pub mod device;
pub mod heating;
pub mod observe;
pub mod oscillation;

pub use client::{DeviceClient, SnapshotClient};
pub use device::HotCoolDevice;
pub use heating::HeatingModule;
pub use observe::{DiagnosticEvent, DiagnosticSink, RecordingSink, TracingSink};
pub use oscillation::OscillationController;

