//! Inverter combination search.
//!
//! Picks one to three catalog models with integer counts whose summed
//! rated power lands close to a target AC power. The search is a bounded
//! brute force over model pairs and triples; the count limits keep it to a
//! few thousand candidates for any catalog size that occurs in practice,
//! and the result is the best candidate within those limits rather than a
//! global optimum over all integer counts.

use std::cmp::Ordering;
use std::ptr;

use serde::Serialize;
use tracing::debug;

use crate::catalog::inverter::InverterModel;

/// Maximum relative deviation `|total - target| / target`.
pub const MAX_DEVIATION: f64 = 0.05;
/// Total rated power may not exceed `target * MAX_OVERSHOOT`.
pub const MAX_OVERSHOOT: f64 = 1.10;
/// Largest allowed ratio between the biggest and smallest model mixed together.
pub const MAX_POWER_SPREAD: f64 = 1.6;
/// Deviations closer than this are treated as equal by the ranking.
pub const DEVIATION_TIE: f64 = 0.001;

const PAIR_MAX_COUNT: u32 = 5;
const TRIPLE_MAX_COUNT: u32 = 3;
const MAX_UNITS: u32 = 10;

/// A model and how many units of it are installed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationEntry {
    pub model: InverterModel,
    pub count: u32,
}

/// A set of inverters chosen to cover a target power.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverterCombination {
    /// Distinct models, in search order (largest rated power first).
    pub entries: Vec<CombinationEntry>,
    /// Sum of rated power times count (kW).
    pub total_power_kw: f64,
    /// `|total - target| / target`.
    pub deviation: f64,
    /// Total power divided by unit count (kW).
    pub average_power_kw: f64,
}

impl Default for InverterCombination {
    /// The "nothing fits" value: no units, zero power, infinite deviation.
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            total_power_kw: 0.0,
            deviation: f64::INFINITY,
            average_power_kw: 0.0,
        }
    }
}

impl InverterCombination {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of inverter units.
    pub fn unit_count(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Total MPPT inputs across all units.
    pub fn mppt_ports(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.model.mppt_count * e.count)
            .sum()
    }

    /// Largest over smallest rated power among the entries.
    pub fn power_spread(&self) -> Option<f64> {
        let powers = self.entries.iter().map(|e| e.model.rated_power_kw);
        let max = powers.clone().max_by(f64::total_cmp)?;
        let min = powers.min_by(f64::total_cmp)?;
        Some(max / min)
    }

    /// Ranking used by the search: fewer units, then lower deviation,
    /// then (at equal deviation) larger average unit power.
    ///
    /// Any non-empty combination beats the empty one.
    pub fn is_better_than(&self, other: &InverterCombination) -> bool {
        if self.is_empty() {
            return false;
        }
        if other.is_empty() {
            return true;
        }
        outranks(
            (self.unit_count(), self.deviation, self.average_power_kw),
            (other.unit_count(), other.deviation, other.average_power_kw),
        )
    }
}

/// Compares `(units, deviation, average_kw)` triples.
fn outranks(new: (u32, f64, f64), best: (u32, f64, f64)) -> bool {
    let (units, deviation, average) = new;
    let (best_units, best_deviation, best_average) = best;
    match units.cmp(&best_units) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => {
            if deviation < best_deviation {
                return true;
            }
            (deviation - best_deviation).abs() < DEVIATION_TIE && average > best_average
        }
    }
}

struct Search<'a> {
    target_kw: f64,
    best: Option<(u32, f64, f64, Vec<(&'a InverterModel, u32)>)>,
    evaluated: usize,
}

impl<'a> Search<'a> {
    fn new(target_kw: f64) -> Self {
        Self {
            target_kw,
            best: None,
            evaluated: 0,
        }
    }

    fn offer(&mut self, picks: &[(&'a InverterModel, u32)]) {
        self.evaluated += 1;
        let units: u32 = picks.iter().map(|&(_, n)| n).sum();
        if units == 0 {
            return;
        }
        let total: f64 = picks
            .iter()
            .map(|&(m, n)| m.rated_power_kw * f64::from(n))
            .sum();
        let deviation = (total - self.target_kw).abs() / self.target_kw;
        if deviation > MAX_DEVIATION || total > self.target_kw * MAX_OVERSHOOT {
            return;
        }
        let average = total / f64::from(units);

        let better = match &self.best {
            None => true,
            Some((u, d, a, _)) => outranks((units, deviation, average), (*u, *d, *a)),
        };
        if better {
            self.best = Some((units, deviation, average, merge(picks)));
        }
    }

    fn finish(self) -> Option<InverterCombination> {
        debug!(
            target_kw = self.target_kw,
            evaluated = self.evaluated,
            found = self.best.is_some(),
            "inverter search finished"
        );
        let (_, deviation, average_power_kw, picks) = self.best?;
        let entries: Vec<CombinationEntry> = picks
            .into_iter()
            .map(|(model, count)| CombinationEntry {
                model: model.clone(),
                count,
            })
            .collect();
        let total_power_kw = entries
            .iter()
            .map(|e| e.model.rated_power_kw * f64::from(e.count))
            .sum();
        Some(InverterCombination {
            entries,
            total_power_kw,
            deviation,
            average_power_kw,
        })
    }
}

/// Drops zero counts and folds repeated picks of the same catalog entry.
fn merge<'a>(picks: &[(&'a InverterModel, u32)]) -> Vec<(&'a InverterModel, u32)> {
    let mut merged: Vec<(&InverterModel, u32)> = Vec::with_capacity(picks.len());
    for &(model, count) in picks {
        if count == 0 {
            continue;
        }
        match merged.iter_mut().find(|(m, _)| ptr::eq(*m, model)) {
            Some((_, n)) => *n += count,
            None => merged.push((model, count)),
        }
    }
    merged
}

/// Finds the best inverter combination for `target_kw`.
///
/// Returns `None` when the target is not a positive finite number, the
/// catalog has no usable model, or no combination within the count limits
/// satisfies the deviation and overshoot constraints.
///
/// # Examples
///
/// ```
/// use pv_sizing::catalog::InverterModel;
/// use pv_sizing::sizing::optimizer::find_optimal_combination;
///
/// let catalog = vec![
///     InverterModel::new("a", "A 50", 50.0, 98.0, 4),
///     InverterModel::new("b", "B 100", 100.0, 98.0, 8),
/// ];
/// let best = find_optimal_combination(100.0, &catalog).expect("a 100 kW unit fits");
/// assert_eq!(best.unit_count(), 1);
/// assert_eq!(best.entries[0].model.id, "b");
/// ```
pub fn find_optimal_combination(
    target_kw: f64,
    catalog: &[InverterModel],
) -> Option<InverterCombination> {
    if !target_kw.is_finite() || target_kw <= 0.0 {
        return None;
    }

    let mut models: Vec<&InverterModel> = catalog
        .iter()
        .filter(|m| m.rated_power_kw.is_finite() && m.rated_power_kw > 0.0)
        .collect();
    if models.is_empty() {
        return None;
    }
    models.sort_by(|a, b| b.rated_power_kw.total_cmp(&a.rated_power_kw));

    let mut search = Search::new(target_kw);
    search_single(&mut search, &models);
    search_pairs(&mut search, &models);
    search_triples(&mut search, &models);
    search.finish()
}

fn search_single<'a>(search: &mut Search<'a>, models: &[&'a InverterModel]) {
    for &model in models {
        let count = (search.target_kw / model.rated_power_kw).round();
        if count >= 1.0 {
            search.offer(&[(model, count as u32)]);
        }
    }
}

fn search_pairs<'a>(search: &mut Search<'a>, models: &[&'a InverterModel]) {
    let n = models.len();
    for i in 0..n {
        for j in i..n {
            let (a, b) = (models[i], models[j]);
            if a.rated_power_kw / b.rated_power_kw > MAX_POWER_SPREAD {
                continue;
            }
            for c1 in 1..=PAIR_MAX_COUNT {
                for c2 in 0..=PAIR_MAX_COUNT {
                    if c2 == 0 && j == i {
                        continue;
                    }
                    if c1 + c2 > MAX_UNITS {
                        continue;
                    }
                    search.offer(&[(a, c1), (b, c2)]);
                }
            }
        }
    }
}

fn search_triples<'a>(search: &mut Search<'a>, models: &[&'a InverterModel]) {
    let n = models.len();
    for i in 0..n {
        for j in i..n {
            for k in j..n {
                let (a, b, c) = (models[i], models[j], models[k]);
                if a.rated_power_kw / c.rated_power_kw > MAX_POWER_SPREAD {
                    continue;
                }
                for c1 in 1..=TRIPLE_MAX_COUNT {
                    for c2 in 0..=TRIPLE_MAX_COUNT {
                        for c3 in 0..=TRIPLE_MAX_COUNT {
                            if (c2 == 0 && j == i) || (c3 == 0 && k == j) {
                                continue;
                            }
                            if c1 + c2 + c3 > MAX_UNITS {
                                continue;
                            }
                            search.offer(&[(a, c1), (b, c2), (c, c3)]);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InverterCatalog;

    fn model(id: &str, kw: f64) -> InverterModel {
        InverterModel::new(id, id, kw, 98.0, 4)
    }

    #[test]
    fn fewer_units_beat_equal_deviation() {
        let catalog = vec![model("fifty", 50.0), model("hundred", 100.0)];
        let best = find_optimal_combination(100.0, &catalog);
        let best = best.as_ref();
        assert_eq!(best.map(InverterCombination::unit_count), Some(1));
        assert_eq!(best.map(|b| b.entries[0].model.id.as_str()), Some("hundred"));
        assert_eq!(best.map(|b| b.deviation), Some(0.0));
    }

    #[test]
    fn tiny_target_finds_nothing() {
        let catalog = vec![model("hundred", 100.0)];
        assert_eq!(find_optimal_combination(1.0, &catalog), None);
    }

    #[test]
    fn non_positive_target_or_empty_catalog_finds_nothing() {
        let catalog = vec![model("ten", 10.0)];
        assert_eq!(find_optimal_combination(0.0, &catalog), None);
        assert_eq!(find_optimal_combination(-5.0, &catalog), None);
        assert_eq!(find_optimal_combination(f64::NAN, &catalog), None);
        assert_eq!(find_optimal_combination(50.0, &[]), None);
        assert_eq!(find_optimal_combination(50.0, &[model("zero", 0.0)]), None);
    }

    #[test]
    fn repeated_model_is_merged_into_one_entry() {
        let catalog = vec![model("ten", 10.0)];
        let best = find_optimal_combination(30.0, &catalog);
        let best = best.as_ref();
        assert_eq!(best.map(|b| b.entries.len()), Some(1));
        assert_eq!(best.map(InverterCombination::unit_count), Some(3));
        assert_eq!(best.map(|b| b.total_power_kw), Some(30.0));
    }

    #[test]
    fn mixes_two_models_when_single_model_misses() {
        // 54.17 kW target from 65 kWp: nothing single-model fits with <= 3 units
        let catalog = InverterCatalog::default();
        let best = find_optimal_combination(65.0 / 1.2, catalog.models());
        let best = best.as_ref();
        assert_eq!(best.map(InverterCombination::unit_count), Some(3));
        assert_eq!(best.map(|b| b.total_power_kw), Some(55.0));
        let ids: Vec<(&str, u32)> = best
            .map(|b| {
                b.entries
                    .iter()
                    .map(|e| (e.model.id.as_str(), e.count))
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(ids, vec![("solis-20", 2), ("solis-15", 1)]);
    }

    #[test]
    fn spread_limit_excludes_mismatched_pairs() {
        // 100 + 10 = 110 would hit exactly, but 100/10 exceeds the spread limit
        let catalog = vec![model("hundred", 100.0), model("ten", 10.0)];
        let best = find_optimal_combination(110.0, &catalog);
        let best = best.as_ref();
        assert_eq!(best.map(|b| b.entries.len()), Some(1));
        assert_eq!(best.and_then(InverterCombination::power_spread), Some(1.0));
    }

    #[test]
    fn ranking_prefers_lower_deviation_then_larger_units() {
        let a = InverterCombination {
            entries: vec![CombinationEntry {
                model: model("a", 50.0),
                count: 2,
            }],
            total_power_kw: 100.0,
            deviation: 0.02,
            average_power_kw: 50.0,
        };
        let mut b = a.clone();
        b.deviation = 0.01;
        assert!(b.is_better_than(&a));
        assert!(!a.is_better_than(&b));

        let mut c = a.clone();
        c.deviation = 0.0205;
        c.average_power_kw = 55.0;
        assert!(c.is_better_than(&a));

        assert!(a.is_better_than(&InverterCombination::default()));
        assert!(!InverterCombination::default().is_better_than(&a));
    }

    #[test]
    fn empty_combination_sentinel() {
        let empty = InverterCombination::default();
        assert!(empty.is_empty());
        assert_eq!(empty.unit_count(), 0);
        assert_eq!(empty.total_power_kw, 0.0);
        assert!(empty.deviation.is_infinite());
        assert_eq!(empty.power_spread(), None);
    }
}
