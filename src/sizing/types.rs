//! Electrical system descriptors shared by the catalogs and sizing operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Nominal single-phase voltage (line to neutral).
pub const SINGLE_PHASE_VOLTAGE_V: f64 = 220.0;
/// Nominal three-phase voltage (line to line).
pub const THREE_PHASE_VOLTAGE_V: f64 = 380.0;

/// Supply phase configuration.
///
/// # Examples
///
/// ```
/// use pv_sizing::sizing::types::Phase;
///
/// assert_eq!(Phase::Three.nominal_voltage_v(), 380.0);
/// assert_eq!(Phase::Single.to_string(), "1P");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Single phase, two loaded conductors.
    #[serde(rename = "1P")]
    Single,
    /// Three phase, three loaded conductors.
    #[serde(rename = "3P")]
    Three,
}

impl Phase {
    /// Voltage convention used for current calculation.
    pub fn nominal_voltage_v(self) -> f64 {
        match self {
            Self::Single => SINGLE_PHASE_VOLTAGE_V,
            Self::Three => THREE_PHASE_VOLTAGE_V,
        }
    }

    /// Number of phase conductors in a cable designation.
    pub fn conductor_count(self) -> u32 {
        match self {
            Self::Single => 2,
            Self::Three => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "1P"),
            Self::Three => write!(f, "3P"),
        }
    }
}

/// Cable core arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreType {
    /// Single-core conductors laid in trefoil.
    Single,
    /// Multi-core bundled cable.
    Multi,
}

impl fmt::Display for CoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single-core"),
            Self::Multi => write!(f, "multi-core"),
        }
    }
}

/// Conductor insulation material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Insulation {
    Pvc,
    Xlpe,
}

impl fmt::Display for Insulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pvc => write!(f, "PVC"),
            Self::Xlpe => write!(f, "XLPE"),
        }
    }
}

/// Cable installation method.
///
/// The ampacity table carries no per-installation figures, so this is
/// recorded on the selection but does not change the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Installation {
    Underground,
    Air,
}

impl fmt::Display for Installation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underground => write!(f, "underground"),
            Self::Air => write!(f, "air"),
        }
    }
}
