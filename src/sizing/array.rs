//! Array power calculator: DC array power, inverter target, DC/AC ratio.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{Result, ensure_non_negative};

/// DC array power divided by this factor gives the AC inverter target.
pub const OVERSIZING_FACTOR: f64 = 1.2;

/// DC/AC ratios considered well sized.
pub const RATIO_WELL_SIZED: RangeInclusive<f64> = 1.05..=1.21;

/// Total DC array power in watts.
///
/// # Errors
///
/// Returns `InvalidInput` if `panel_power_w` is negative or non-finite, or
/// if the product overflows.
///
/// # Examples
///
/// ```
/// use pv_sizing::sizing::array::total_power;
///
/// assert_eq!(total_power(650.0, 100).ok(), Some(65_000.0));
/// ```
pub fn total_power(panel_power_w: f64, panel_count: u32) -> Result<f64> {
    let p = ensure_non_negative("panel_power_w", panel_power_w)?;
    ensure_non_negative("dc_power_w", p * f64::from(panel_count))
}

/// AC power the inverters should be sized for, in the unit of `total_power`.
pub fn inverter_target_power(total_power: f64) -> f64 {
    total_power / OVERSIZING_FACTOR
}

/// DC/AC ratio, `None` when the AC power is zero.
pub fn dc_ac_ratio(dc_power_w: f64, ac_power_w: f64) -> Option<f64> {
    if ac_power_w == 0.0 {
        return None;
    }
    Some(dc_power_w / ac_power_w)
}

pub fn is_well_sized(ratio: f64) -> bool {
    RATIO_WELL_SIZED.contains(&ratio)
}

/// Division of the panels into series strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StringLayout {
    pub strings: u32,
    pub panels_per_string: u32,
    /// Panels left over after filling every string equally.
    pub remainder: u32,
}

/// Splits `total_panels` evenly over `strings`; `None` when `strings` is 0.
pub fn string_layout(total_panels: u32, strings: u32) -> Option<StringLayout> {
    if strings == 0 {
        return None;
    }
    Some(StringLayout {
        strings,
        panels_per_string: total_panels / strings,
        remainder: total_panels % strings,
    })
}
