//! Hotcool CLI Library
//!
//! This library provides the core functionality for the `hotcoolctl` tool.
//!
//! # Public API
//!
//! [`session::Session`] loads a configured device and its status snapshot
//! file, and gives access to the device modules and entities:
//!
//! ```no_run
//! use hotcool_core::StaticConfig;
//! use hotcoolctl::session::Session;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = StaticConfig::load(&hotcool_core::default_config_path())?;
//! let session = Session::open(&config, None, None)?;
//! let target = session.device().require_oscillation()?.oscillation_target();
//! println!("Oscillation target: {}", target);
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

/// Device session backed by a status snapshot file.
pub mod session;
