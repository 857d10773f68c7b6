//! Circuit current, breaker rating and cable cross-section selection.

use serde::Serialize;
use tracing::debug;

use crate::catalog::breaker::{MAX_BREAKER_RATING_A, STANDARD_BREAKER_RATINGS_A};
use crate::catalog::cable::{AmpacityKey, CableTable};
use crate::error::{Result, SizingError, ensure_non_negative, ensure_positive};
use crate::sizing::types::{CoreType, Installation, Insulation, Phase};

/// Line current in amperes drawn by `power_kw` at `voltage_v`.
///
/// Single phase: `P / (V * eff)`. Three phase: `P / (√3 * V_LL * eff)`.
///
/// # Errors
///
/// Returns `InvalidInput` for negative power, non-positive voltage, or an
/// efficiency outside (0, 100].
///
/// # Examples
///
/// ```
/// use pv_sizing::sizing::electrical::line_current;
/// use pv_sizing::sizing::types::Phase;
///
/// let amps = line_current(10.0, 380.0, Phase::Three, 98.0).unwrap();
/// assert!((amps - 15.50).abs() < 0.01);
/// ```
pub fn line_current(power_kw: f64, voltage_v: f64, phase: Phase, efficiency_pct: f64) -> Result<f64> {
    let power_kw = ensure_non_negative("power_kw", power_kw)?;
    let voltage_v = ensure_positive("voltage_v", voltage_v)?;
    let efficiency_pct = ensure_positive("efficiency_pct", efficiency_pct)?;
    if efficiency_pct > 100.0 {
        return Err(SizingError::invalid(
            "efficiency_pct",
            efficiency_pct,
            "must be <= 100",
        ));
    }

    let watts = power_kw * 1000.0;
    let eff = efficiency_pct / 100.0;
    let amps = match phase {
        Phase::Single => watts / (voltage_v * eff),
        Phase::Three => watts / (3.0_f64.sqrt() * voltage_v * eff),
    };
    Ok(amps)
}

/// Chosen breaker rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakerSelection {
    /// Rating from the standard ladder (A).
    pub rating_a: u32,
    /// The current exceeded the ladder and the largest rating was used.
    pub saturated: bool,
}

/// Smallest standard rating that is at least `current_a`.
///
/// Currents above the ladder (or NaN) saturate at the largest rating.
pub fn select_breaker(current_a: f64) -> BreakerSelection {
    match STANDARD_BREAKER_RATINGS_A
        .iter()
        .copied()
        .find(|&rating| f64::from(rating) >= current_a)
    {
        Some(rating_a) => BreakerSelection {
            rating_a,
            saturated: false,
        },
        None => BreakerSelection {
            rating_a: MAX_BREAKER_RATING_A,
            saturated: true,
        },
    }
}

/// Chosen cable for one circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CableSelection {
    /// Designation such as `0.6/1kV-CU/XLPE/PVC-3x16+1x10mm²`.
    pub designation: String,
    /// Number of cables run in parallel.
    pub count: u32,
    /// Phase conductor cross-section (mm²).
    pub main_size_mm2: f64,
    /// Neutral/earth conductor cross-section (mm²).
    pub neutral_size_mm2: f64,
    /// Rated current of a single cable (A).
    pub ampacity_a: f64,
    pub key: AmpacityKey,
    pub installation: Installation,
}

impl CableSelection {
    pub fn is_parallel(&self) -> bool {
        self.count > 1
    }
}

/// Selects a cable from the standard table.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative or non-finite current.
pub fn select_cable(
    current_a: f64,
    phase: Phase,
    core: CoreType,
    insulation: Insulation,
    installation: Installation,
) -> Result<CableSelection> {
    select_cable_from(
        CableTable::standard(),
        current_a,
        phase,
        core,
        insulation,
        installation,
    )
}

/// Selects the smallest rated cross-section that carries `current_a`,
/// or parallel runs of the largest rated one when none does.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative or non-finite current and
/// `NoApplicableCable` when `table` rates nothing for the arrangement.
pub fn select_cable_from(
    table: &CableTable,
    current_a: f64,
    phase: Phase,
    core: CoreType,
    insulation: Insulation,
    installation: Installation,
) -> Result<CableSelection> {
    let current_a = ensure_non_negative("current_a", current_a)?;
    let key = AmpacityKey::new(insulation, core, phase);

    let mut chosen = None;
    for (size_mm2, ampacity_a) in table.rated(key) {
        chosen = Some((size_mm2, ampacity_a));
        if ampacity_a >= current_a {
            break;
        }
    }
    let (main_size_mm2, ampacity_a) = chosen.ok_or(SizingError::NoApplicableCable { key })?;

    let count = if ampacity_a >= current_a {
        1
    } else {
        (current_a / ampacity_a).ceil() as u32
    };
    let neutral_size_mm2 = table.neutral_size(main_size_mm2);
    debug!(current_a, %key, main_size_mm2, count, "cable selected");

    Ok(CableSelection {
        designation: designation(insulation, phase, count, main_size_mm2, neutral_size_mm2),
        count,
        main_size_mm2,
        neutral_size_mm2,
        ampacity_a,
        key,
        installation,
    })
}

fn designation(insulation: Insulation, phase: Phase, count: u32, main: f64, neutral: f64) -> String {
    let cores = format!("{}x{main}+1x{neutral}mm²", phase.conductor_count());
    let body = if count > 1 {
        format!("{count}x({cores})")
    } else {
        cores
    };
    format!("0.6/1kV-CU/{insulation}/PVC-{body}")
}
