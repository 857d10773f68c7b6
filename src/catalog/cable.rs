//! Copper cable ampacity table (0.6/1 kV, PVC sheath).
//!
//! Figures are continuous current ratings in amperes per cross-section,
//! split by insulation, core arrangement and number of loaded conductors.
//! A zero figure means the arrangement is not rated for that size.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::sizing::types::{CoreType, Insulation, Phase};

/// Ampacity figures for one insulation material at one cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmpacitySet {
    /// Multi-core, two loaded conductors (single phase).
    pub multi_two_loaded: f64,
    /// Multi-core, three loaded conductors (three phase).
    pub multi_three_loaded: f64,
    /// Single-core, two loaded conductors.
    pub single_two_loaded: f64,
    /// Single-core, three loaded conductors in trefoil.
    pub single_three_trefoil: f64,
    /// Single-core, three loaded conductors flat and touching.
    pub single_three_flat: f64,
    /// Single-core, three loaded conductors spaced horizontally.
    pub single_three_spaced_horizontal: f64,
    /// Single-core, three loaded conductors spaced vertically.
    pub single_three_spaced_vertical: f64,
}

impl AmpacitySet {
    /// Figure used for the given arrangement, `None` when unrated.
    ///
    /// Three-phase single-core runs use the trefoil figure.
    pub fn get(&self, core: CoreType, phase: Phase) -> Option<f64> {
        let amps = match (core, phase) {
            (CoreType::Multi, Phase::Single) => self.multi_two_loaded,
            (CoreType::Multi, Phase::Three) => self.multi_three_loaded,
            (CoreType::Single, Phase::Single) => self.single_two_loaded,
            (CoreType::Single, Phase::Three) => self.single_three_trefoil,
        };
        (amps > 0.0).then_some(amps)
    }
}

/// Lookup key selecting one ampacity column of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmpacityKey {
    pub insulation: Insulation,
    pub core: CoreType,
    pub phase: Phase,
}

impl AmpacityKey {
    pub fn new(insulation: Insulation, core: CoreType, phase: Phase) -> Self {
        Self {
            insulation,
            core,
            phase,
        }
    }
}

impl fmt::Display for AmpacityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.insulation, self.core, self.phase)
    }
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableSize {
    /// Conductor cross-section (mm²).
    pub size_mm2: f64,
    pub pvc: AmpacitySet,
    pub xlpe: AmpacitySet,
}

impl CableSize {
    pub fn ampacity(&self, key: AmpacityKey) -> Option<f64> {
        let set = match key.insulation {
            Insulation::Pvc => &self.pvc,
            Insulation::Xlpe => &self.xlpe,
        };
        set.get(key.core, key.phase)
    }
}

/// Cable sizes ordered by ascending cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct CableTable {
    sizes: Vec<CableSize>,
}

impl CableTable {
    /// Builds a table, sorting rows by cross-section.
    pub fn new(mut sizes: Vec<CableSize>) -> Self {
        sizes.sort_by(|a, b| a.size_mm2.total_cmp(&b.size_mm2));
        Self { sizes }
    }

    /// The built-in 1.5–300 mm² copper table.
    pub fn standard() -> &'static CableTable {
        &STANDARD_TABLE
    }

    pub fn sizes(&self) -> &[CableSize] {
        &self.sizes
    }

    /// Rows rated for `key`, ascending, paired with their ampacity.
    pub fn rated(&self, key: AmpacityKey) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.sizes
            .iter()
            .filter_map(move |row| row.ampacity(key).map(|amps| (row.size_mm2, amps)))
    }

    /// Smallest listed cross-section of at least half of `main_mm2`,
    /// falling back to `main_mm2` itself.
    pub fn neutral_size(&self, main_mm2: f64) -> f64 {
        let half = main_mm2 / 2.0;
        self.sizes
            .iter()
            .map(|row| row.size_mm2)
            .find(|&size| size >= half)
            .unwrap_or(main_mm2)
    }
}

#[rustfmt::skip]
fn set(m2: f64, m3: f64, s2: f64, s3: f64, flat: f64, sh: f64, sv: f64) -> AmpacitySet {
    AmpacitySet {
        multi_two_loaded: m2,
        multi_three_loaded: m3,
        single_two_loaded: s2,
        single_three_trefoil: s3,
        single_three_flat: flat,
        single_three_spaced_horizontal: sh,
        single_three_spaced_vertical: sv,
    }
}

fn multi_only(m2: f64, m3: f64) -> AmpacitySet {
    set(m2, m3, 0.0, 0.0, 0.0, 0.0, 0.0)
}

fn row(size_mm2: f64, pvc: AmpacitySet, xlpe: AmpacitySet) -> CableSize {
    CableSize {
        size_mm2,
        pvc,
        xlpe,
    }
}

#[rustfmt::skip]
static STANDARD_TABLE: Lazy<CableTable> = Lazy::new(|| {
    CableTable::new(vec![
        row(1.5, multi_only(22.0, 18.5), multi_only(26.0, 23.0)),
        row(2.5, multi_only(30.0, 25.0), multi_only(36.0, 32.0)),
        row(4.0, multi_only(40.0, 34.0), multi_only(49.0, 42.0)),
        row(6.0, multi_only(51.0, 43.0), multi_only(63.0, 54.0)),
        row(10.0, multi_only(70.0, 60.0), multi_only(86.0, 75.0)),
        row(16.0, multi_only(94.0, 80.0), multi_only(115.0, 100.0)),
        row(25.0,
            set(119.0, 101.0, 131.0, 110.0, 114.0, 146.0, 130.0),
            set(149.0, 127.0, 161.0, 135.0, 141.0, 182.0, 161.0)),
        row(35.0,
            set(148.0, 126.0, 162.0, 137.0, 143.0, 181.0, 162.0),
            set(185.0, 158.0, 200.0, 169.0, 176.0, 226.0, 201.0)),
        row(50.0,
            set(180.0, 153.0, 196.0, 167.0, 174.0, 219.0, 197.0),
            set(225.0, 192.0, 242.0, 207.0, 216.0, 275.0, 246.0)),
        row(70.0,
            set(232.0, 196.0, 251.0, 216.0, 225.0, 281.0, 254.0),
            set(289.0, 246.0, 310.0, 268.0, 279.0, 353.0, 318.0)),
        row(95.0,
            set(282.0, 238.0, 304.0, 264.0, 275.0, 341.0, 311.0),
            set(352.0, 298.0, 377.0, 328.0, 342.0, 430.0, 389.0)),
        row(120.0,
            set(328.0, 276.0, 352.0, 308.0, 321.0, 396.0, 362.0),
            set(410.0, 346.0, 437.0, 383.0, 400.0, 500.0, 454.0)),
        row(150.0,
            set(379.0, 319.0, 406.0, 356.0, 372.0, 456.0, 419.0),
            set(473.0, 399.0, 504.0, 444.0, 464.0, 577.0, 527.0)),
        row(185.0,
            set(434.0, 364.0, 463.0, 409.0, 427.0, 521.0, 480.0),
            set(542.0, 456.0, 575.0, 510.0, 533.0, 661.0, 605.0)),
        row(240.0,
            set(514.0, 430.0, 546.0, 485.0, 507.0, 615.0, 569.0),
            set(641.0, 533.0, 679.0, 607.0, 634.0, 781.0, 719.0)),
        row(300.0,
            set(593.0, 497.0, 629.0, 561.0, 587.0, 709.0, 659.0),
            set(741.0, 621.0, 783.0, 703.0, 736.0, 902.0, 833.0)),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    fn key(insulation: Insulation, core: CoreType, phase: Phase) -> AmpacityKey {
        AmpacityKey::new(insulation, core, phase)
    }

    #[test]
    fn standard_table_shape() {
        let t = CableTable::standard();
        assert_eq!(t.sizes().len(), 16);
        assert_eq!(t.sizes().first().map(|r| r.size_mm2), Some(1.5));
        assert_eq!(t.sizes().last().map(|r| r.size_mm2), Some(300.0));
    }

    #[test]
    fn column_dispatch() {
        let t = CableTable::standard();
        let r300 = t.sizes()[15];
        assert_eq!(r300.ampacity(key(Insulation::Xlpe, CoreType::Multi, Phase::Three)), Some(621.0));
        assert_eq!(r300.ampacity(key(Insulation::Xlpe, CoreType::Multi, Phase::Single)), Some(741.0));
        assert_eq!(r300.ampacity(key(Insulation::Pvc, CoreType::Single, Phase::Three)), Some(561.0));
        assert_eq!(r300.ampacity(key(Insulation::Pvc, CoreType::Single, Phase::Single)), Some(629.0));
    }

    #[test]
    fn zero_figures_are_unrated() {
        let t = CableTable::standard();
        let small = t.sizes()[0];
        assert_eq!(small.ampacity(key(Insulation::Pvc, CoreType::Single, Phase::Three)), None);

        let single_core: Vec<f64> = t
            .rated(key(Insulation::Xlpe, CoreType::Single, Phase::Three))
            .map(|(size, _)| size)
            .collect();
        assert_eq!(single_core.first(), Some(&25.0));
        assert_eq!(single_core.len(), 10);
    }

    #[test]
    fn neutral_is_half_rounded_up_to_catalog() {
        let t = CableTable::standard();
        assert_eq!(t.neutral_size(300.0), 150.0);
        assert_eq!(t.neutral_size(95.0), 50.0);
        assert_eq!(t.neutral_size(16.0), 10.0);
        assert_eq!(t.neutral_size(1.5), 1.5);
    }

    #[test]
    fn neutral_falls_back_to_main_size() {
        let t = CableTable::new(vec![row(10.0, multi_only(70.0, 60.0), multi_only(86.0, 75.0))]);
        assert_eq!(t.neutral_size(50.0), 50.0);
    }

    #[test]
    fn new_sorts_rows() {
        let t = CableTable::new(vec![
            row(16.0, multi_only(94.0, 80.0), multi_only(115.0, 100.0)),
            row(4.0, multi_only(40.0, 34.0), multi_only(49.0, 42.0)),
        ]);
        assert_eq!(t.sizes()[0].size_mm2, 4.0);
    }
}
