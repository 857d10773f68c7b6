//! End-to-end sizing of an installation and its plain-text report.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::inverter::InverterCatalog;
use crate::error::Result;
use crate::sizing::array::{
    StringLayout, dc_ac_ratio, inverter_target_power, is_well_sized, string_layout, total_power,
};
use crate::sizing::optimizer::{InverterCombination, find_optimal_combination};
use crate::sizing::wiring::{CircuitSizing, WiringOptions, WiringPlan, plan_wiring};

/// Everything needed to size one installation.
#[derive(Debug, Clone)]
pub struct SizingRequest {
    pub panel_name: String,
    /// Nameplate power of one panel (W).
    pub panel_power_w: f64,
    pub panel_count: u32,
    /// Series strings; 0 leaves the string layout out of the report.
    pub strings: u32,
    pub catalog: InverterCatalog,
    pub wiring: WiringOptions,
}

/// Result of [`size_system`].
#[derive(Debug, Clone, Serialize)]
pub struct SizingReport {
    pub panel_name: String,
    pub panel_power_w: f64,
    pub panel_count: u32,
    /// Total DC array power (W).
    pub dc_power_w: f64,
    /// AC power the inverters are sized for (W).
    pub target_ac_power_w: f64,
    /// `None` when no combination satisfies the constraints.
    pub combination: Option<InverterCombination>,
    /// `None` when no combination was found.
    pub dc_ac_ratio: Option<f64>,
    pub string_layout: Option<StringLayout>,
    /// More strings than MPPT inputs on the chosen inverters.
    pub mppt_shortfall: bool,
    pub wiring: Option<WiringPlan>,
}

impl SizingReport {
    pub fn ratio_well_sized(&self) -> Option<bool> {
        self.dc_ac_ratio.map(is_well_sized)
    }
}

/// Runs the full pipeline: array power, inverter search, DC/AC ratio,
/// wiring plan.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative or non-finite panel power, or
/// for a chosen model with an unusable efficiency.
pub fn size_system(request: &SizingRequest) -> Result<SizingReport> {
    let dc_power_w = total_power(request.panel_power_w, request.panel_count)?;
    let target_ac_power_w = inverter_target_power(dc_power_w);

    let combination = find_optimal_combination(target_ac_power_w / 1000.0, request.catalog.models());
    if combination.is_none() && dc_power_w > 0.0 {
        warn!(
            target_kw = target_ac_power_w / 1000.0,
            catalog_size = request.catalog.len(),
            "no inverter combination satisfies the deviation limits"
        );
    }

    let dc_ac_ratio = combination
        .as_ref()
        .and_then(|c| dc_ac_ratio(dc_power_w, c.total_power_kw * 1000.0));

    let layout = string_layout(request.panel_count, request.strings);
    let mppt_shortfall = match (&layout, &combination) {
        (Some(l), Some(c)) => l.strings > c.mppt_ports(),
        _ => false,
    };

    let wiring = match &combination {
        Some(c) => plan_wiring(c, &request.wiring)?,
        None => None,
    };
    debug!(dc_power_w, ?dc_ac_ratio, "installation sized");

    Ok(SizingReport {
        panel_name: request.panel_name.clone(),
        panel_power_w: request.panel_power_w,
        panel_count: request.panel_count,
        dc_power_w,
        target_ac_power_w,
        combination,
        dc_ac_ratio,
        string_layout: layout,
        mppt_shortfall,
        wiring,
    })
}

fn write_circuit(f: &mut fmt::Formatter<'_>, label: &str, c: &CircuitSizing) -> fmt::Result {
    writeln!(
        f,
        "  {label}: {:.2} kW @ {} V -> {:.2} A, MCCB {} A{}, {}",
        c.power_kw,
        c.voltage_v,
        c.current_a,
        c.breaker.rating_a,
        if c.breaker.saturated { " (max)" } else { "" },
        c.cable.designation
    )
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sizing Report ---")?;
        writeln!(
            f,
            "Array:                 {} x {} ({} W)",
            self.panel_count, self.panel_name, self.panel_power_w
        )?;
        writeln!(f, "DC power:              {:.2} kWp", self.dc_power_w / 1000.0)?;
        writeln!(
            f,
            "Inverter target:       {:.2} kW",
            self.target_ac_power_w / 1000.0
        )?;
        if let Some(l) = &self.string_layout {
            writeln!(
                f,
                "Strings:               {} x {} panels ({} left over)",
                l.strings, l.panels_per_string, l.remainder
            )?;
        }

        let Some(combo) = &self.combination else {
            return write!(f, "Inverters:             no combination within limits");
        };

        for e in &combo.entries {
            writeln!(
                f,
                "Inverters:             {} x {} ({} kW)",
                e.count, e.model.name, e.model.rated_power_kw
            )?;
        }
        writeln!(
            f,
            "Total AC power:        {:.2} kW ({:.2}% deviation)",
            combo.total_power_kw,
            combo.deviation * 100.0
        )?;
        if let Some(ratio) = self.dc_ac_ratio {
            writeln!(
                f,
                "DC/AC ratio:           {ratio:.2}{}",
                if is_well_sized(ratio) {
                    ""
                } else {
                    " (outside 1.05-1.21)"
                }
            )?;
        }
        if self.mppt_shortfall {
            writeln!(
                f,
                "MPPT inputs:           {} (fewer than strings)",
                combo.mppt_ports()
            )?;
        }

        if let Some(plan) = &self.wiring {
            writeln!(
                f,
                "Wiring ({}, {}, {}, {}):",
                plan.options.phase,
                plan.options.core,
                plan.options.insulation,
                plan.options.installation
            )?;
            for c in &plan.inverters {
                write_circuit(f, &format!("{} x{}", c.model.name, c.count), &c.circuit)?;
            }
            write_circuit(f, "Main switchboard", &plan.main)?;
            if plan.high_current {
                writeln!(f, "  High current: parallel cables required")?;
            }
        }
        Ok(())
    }
}
