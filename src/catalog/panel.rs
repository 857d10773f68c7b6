//! Solar panel models.

use serde::{Deserialize, Serialize};

/// A PV module as listed in the panel catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarPanel {
    pub id: String,
    pub name: String,
    /// Module width (mm).
    pub width_mm: f64,
    /// Module length (mm).
    pub length_mm: f64,
    /// Relative efficiency factor (0.0-1.0).
    pub efficiency: f64,
    /// Nameplate power (W).
    pub power_w: f64,
}

impl SolarPanel {
    /// Module footprint in square metres.
    pub fn area_m2(&self) -> f64 {
        self.width_mm * self.length_mm / 1_000_000.0
    }
}

fn panel(id: &str, name: &str, width_mm: f64, length_mm: f64, efficiency: f64, power_w: f64) -> SolarPanel {
    SolarPanel {
        id: id.to_string(),
        name: name.to_string(),
        width_mm,
        length_mm,
        efficiency,
        power_w,
    }
}

/// Built-in panel catalog.
pub fn default_panels() -> Vec<SolarPanel> {
    vec![
        panel("longi-645", "Longi 645W", 1134.0, 2384.0, 1.0, 645.0),
        panel("ja-solar-550", "JA Solar 550W", 1052.0, 2274.0, 0.98, 550.0),
        panel("jinko-530", "Jinko 530W", 1030.0, 2252.0, 0.97, 530.0),
        panel("trina-620", "Trina 620W", 1096.0, 2324.0, 0.99, 620.0),
    ]
}

/// Looks up a built-in panel by id.
pub fn find_panel(id: &str) -> Option<SolarPanel> {
    default_panels().into_iter().find(|p| p.id == id)
}
