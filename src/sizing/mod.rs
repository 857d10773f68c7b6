//! The sizing engine: array power, inverter search, electrical sizing.

/// Array power calculator.
pub mod array;
pub mod electrical;
/// Inverter combination optimizer.
pub mod optimizer;
pub mod types;
/// Per-circuit wiring plan.
pub mod wiring;

pub use electrical::{BreakerSelection, CableSelection, line_current, select_breaker, select_cable};
pub use optimizer::{CombinationEntry, InverterCombination, find_optimal_combination};
pub use types::{CoreType, Installation, Insulation, Phase};
pub use wiring::{WiringOptions, WiringPlan, plan_wiring};
