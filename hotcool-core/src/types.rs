//! Core types and data structures for Hotcool

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HotCoolError, Result};

/// Lowest angle the oscillation motor can reach, in degrees
pub const MIN_ANGLE: i32 = 5;

/// Highest angle the oscillation motor can reach, in degrees
pub const MAX_ANGLE: i32 = 355;

/// Target reported when the angle fields cannot be parsed
pub const DEFAULT_OSCILLATION_TARGET: i32 = 180;

/// Symbolic oscillation mode of a Hot+Cool device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillationMode {
    /// Oscillation disabled
    Off,
    /// 45° sweep
    #[serde(rename = "45")]
    Degree45,
    /// 90° sweep
    #[serde(rename = "90")]
    Degree90,
    /// 180° sweep
    #[serde(rename = "180")]
    Degree180,
    /// 350° sweep
    #[serde(rename = "350")]
    Degree350,
    /// Explicit angle bounds
    Custom,
}

impl OscillationMode {
    /// All modes, in ascending sweep order
    pub const ALL: [OscillationMode; 6] = [
        OscillationMode::Off,
        OscillationMode::Degree45,
        OscillationMode::Degree90,
        OscillationMode::Degree180,
        OscillationMode::Degree350,
        OscillationMode::Custom,
    ];

    /// Raw `ancp` token the device uses for this mode
    pub fn token(self) -> &'static str {
        match self {
            OscillationMode::Off => "OFF",
            OscillationMode::Degree45 => "0045",
            OscillationMode::Degree90 => "0090",
            OscillationMode::Degree180 => "0180",
            OscillationMode::Degree350 => "0350",
            OscillationMode::Custom => "CUST",
        }
    }

    /// Decode a raw `ancp` token
    ///
    /// # Errors
    ///
    /// Returns [`HotCoolError::Decode`] for tokens the device family does not define.
    pub fn from_token(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.token() == token)
            .ok_or_else(|| HotCoolError::Decode(token.to_string()))
    }

    /// Half of the sweep written for a preset, `None` for `Off` and `Custom`.
    ///
    /// The 45° preset writes a 44° sweep.
    pub fn half_width(self) -> Option<i32> {
        match self {
            OscillationMode::Degree45 => Some(22),
            OscillationMode::Degree90 => Some(45),
            OscillationMode::Degree180 => Some(90),
            OscillationMode::Degree350 => Some(175),
            OscillationMode::Off | OscillationMode::Custom => None,
        }
    }

    /// Classify a custom sweep width into the closest preset band
    ///
    /// Bands are inclusive on their upper edge: `..=45`, `..=90`, `..=180`, rest.
    pub fn from_width(width: i32) -> Self {
        if width <= 45 {
            OscillationMode::Degree45
        } else if width <= 90 {
            OscillationMode::Degree90
        } else if width <= 180 {
            OscillationMode::Degree180
        } else {
            OscillationMode::Degree350
        }
    }
}

impl fmt::Display for OscillationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OscillationMode::Off => "off",
            OscillationMode::Degree45 => "45",
            OscillationMode::Degree90 => "90",
            OscillationMode::Degree180 => "180",
            OscillationMode::Degree350 => "350",
            OscillationMode::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for OscillationMode {
    type Err = HotCoolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(OscillationMode::Off),
            "45" => Ok(OscillationMode::Degree45),
            "90" => Ok(OscillationMode::Degree90),
            "180" => Ok(OscillationMode::Degree180),
            "350" => Ok(OscillationMode::Degree350),
            "custom" | "cust" => Ok(OscillationMode::Custom),
            other => Err(HotCoolError::InvalidInput(format!(
                "Unknown oscillation mode '{}'. Expected off, 45, 90, 180, 350 or custom",
                other
            ))),
        }
    }
}

/// Pair of oscillation angle bounds in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleBounds {
    pub low: i32,
    pub high: i32,
}

impl AngleBounds {
    /// Create bounds within the physical sweep limits
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless `MIN_ANGLE <= low <= high <= MAX_ANGLE`.
    pub fn new(low: i32, high: i32) -> Result<Self> {
        if low < MIN_ANGLE || high > MAX_ANGLE || low > high {
            return Err(HotCoolError::InvalidInput(format!(
                "Angle bounds must satisfy {} <= low <= high <= {}, got {}..{}",
                MIN_ANGLE, MAX_ANGLE, low, high
            )));
        }
        Ok(Self { low, high })
    }

    /// Zero-width bounds at a single angle
    pub fn point(angle: i32) -> Self {
        Self {
            low: angle,
            high: angle,
        }
    }

    /// Sweep width in degrees
    pub fn width(&self) -> i32 {
        self.high.saturating_sub(self.low)
    }

    /// Midpoint, rounded down
    pub fn midpoint(&self) -> i32 {
        ((i64::from(self.low) + i64::from(self.high)) / 2) as i32
    }
}

/// Heat mode reported in `hmod`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatMode {
    Heat,
    Off,
}

impl HeatMode {
    /// Raw `hmod` token
    pub fn token(self) -> &'static str {
        match self {
            HeatMode::Heat => "HEAT",
            HeatMode::Off => "OFF",
        }
    }
}
