//! Per-inverter and main switchboard protection and cabling.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::inverter::InverterModel;
use crate::error::Result;
use crate::sizing::electrical::{
    BreakerSelection, CableSelection, line_current, select_breaker, select_cable,
};
use crate::sizing::optimizer::InverterCombination;
use crate::sizing::types::{CoreType, Installation, Insulation, Phase};

/// Efficiency assumed for the aggregated main switchboard feeder.
pub const MAIN_SWITCHBOARD_EFFICIENCY_PCT: f64 = 99.0;

/// Installation choices that apply to every circuit in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WiringOptions {
    pub phase: Phase,
    pub core: CoreType,
    pub insulation: Insulation,
    pub installation: Installation,
}

impl Default for WiringOptions {
    fn default() -> Self {
        Self {
            phase: Phase::Three,
            core: CoreType::Multi,
            insulation: Insulation::Xlpe,
            installation: Installation::Air,
        }
    }
}

/// Sizing of one feeder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitSizing {
    pub power_kw: f64,
    pub voltage_v: f64,
    pub current_a: f64,
    pub breaker: BreakerSelection,
    pub cable: CableSelection,
}

/// Sizing of each unit of one inverter model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverterCircuit {
    pub model: InverterModel,
    /// Number of identical circuits.
    pub count: u32,
    pub circuit: CircuitSizing,
}

/// Protection and cabling for a whole combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WiringPlan {
    pub options: WiringOptions,
    pub inverters: Vec<InverterCircuit>,
    pub main: CircuitSizing,
    /// Some circuit needs parallel cables.
    pub high_current: bool,
}

impl WiringPlan {
    /// Any breaker had to saturate at the top of the ladder.
    pub fn has_saturated_breaker(&self) -> bool {
        self.main.breaker.saturated || self.inverters.iter().any(|c| c.circuit.breaker.saturated)
    }
}

/// Sizes a single circuit carrying `power_kw`.
///
/// # Errors
///
/// Propagates `InvalidInput` from the current calculation.
pub fn size_circuit(power_kw: f64, efficiency_pct: f64, options: &WiringOptions) -> Result<CircuitSizing> {
    let voltage_v = options.phase.nominal_voltage_v();
    let current_a = line_current(power_kw, voltage_v, options.phase, efficiency_pct)?;
    let breaker = select_breaker(current_a);
    let cable = select_cable(
        current_a,
        options.phase,
        options.core,
        options.insulation,
        options.installation,
    )?;
    Ok(CircuitSizing {
        power_kw,
        voltage_v,
        current_a,
        breaker,
        cable,
    })
}

/// Sizes every inverter circuit of `combination` and the main switchboard
/// feeder carrying the combination's total rated power.
///
/// Returns `None` for an empty combination.
///
/// # Errors
///
/// Returns `InvalidInput` when a model carries an unusable efficiency.
pub fn plan_wiring(combination: &InverterCombination, options: &WiringOptions) -> Result<Option<WiringPlan>> {
    if combination.is_empty() {
        return Ok(None);
    }

    let mut inverters = Vec::with_capacity(combination.entries.len());
    for entry in &combination.entries {
        let circuit = size_circuit(entry.model.rated_power_kw, entry.model.efficiency_pct, options)?;
        report_limits(&entry.model.name, &circuit);
        inverters.push(InverterCircuit {
            model: entry.model.clone(),
            count: entry.count,
            circuit,
        });
    }

    let main = size_circuit(
        combination.total_power_kw,
        MAIN_SWITCHBOARD_EFFICIENCY_PCT,
        options,
    )?;
    report_limits("main switchboard", &main);

    let high_current =
        main.cable.is_parallel() || inverters.iter().any(|c| c.circuit.cable.is_parallel());

    Ok(Some(WiringPlan {
        options: *options,
        inverters,
        main,
        high_current,
    }))
}

fn report_limits(circuit: &str, sizing: &CircuitSizing) {
    if sizing.breaker.saturated {
        warn!(
            circuit,
            current_a = sizing.current_a,
            rating_a = sizing.breaker.rating_a,
            "current exceeds the largest standard breaker rating"
        );
    }
    if sizing.cable.is_parallel() {
        warn!(
            circuit,
            current_a = sizing.current_a,
            cables = sizing.cable.count,
            "current exceeds single cable ampacity, using parallel cables"
        );
    }
}
