//! Inverter models and the editable inverter catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single inverter model as listed in a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverterModel {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Rated AC output power (kW).
    pub rated_power_kw: f64,
    /// Conversion efficiency in percent (0, 100].
    pub efficiency_pct: f64,
    /// Number of MPPT inputs.
    pub mppt_count: u32,
}

impl InverterModel {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rated_power_kw: f64,
        efficiency_pct: f64,
        mppt_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rated_power_kw,
            efficiency_pct,
            mppt_count,
        }
    }

    /// Returns a description of the first problem with this entry, if any.
    pub fn check(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("id must not be empty".to_string());
        }
        if !self.rated_power_kw.is_finite() || self.rated_power_kw <= 0.0 {
            return Some(format!(
                "rated_power_kw must be > 0, got {}",
                self.rated_power_kw
            ));
        }
        if !self.efficiency_pct.is_finite()
            || self.efficiency_pct <= 0.0
            || self.efficiency_pct > 100.0
        {
            return Some(format!(
                "efficiency_pct must be in (0, 100], got {}",
                self.efficiency_pct
            ));
        }
        None
    }
}

/// An immutable snapshot of inverter models.
///
/// Edits return a new catalog; combinations computed from an earlier
/// snapshot own their model copies and are never affected.
#[derive(Debug, Clone, PartialEq)]
pub struct InverterCatalog {
    models: Arc<[InverterModel]>,
}

impl InverterCatalog {
    pub fn new(models: Vec<InverterModel>) -> Self {
        Self {
            models: models.into(),
        }
    }

    pub fn models(&self) -> &[InverterModel] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&InverterModel> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Returns a catalog with `model` appended.
    pub fn with_model(&self, model: InverterModel) -> Self {
        let mut models = self.models.to_vec();
        models.push(model);
        Self::new(models)
    }

    /// Returns a catalog without the model identified by `id`.
    pub fn without(&self, id: &str) -> Self {
        Self::new(
            self.models
                .iter()
                .filter(|m| m.id != id)
                .cloned()
                .collect(),
        )
    }

    /// Returns a catalog where the entry sharing `model.id` is replaced.
    ///
    /// If no entry has that id the catalog is returned unchanged.
    pub fn replace(&self, model: InverterModel) -> Self {
        Self::new(
            self.models
                .iter()
                .map(|m| {
                    if m.id == model.id {
                        model.clone()
                    } else {
                        m.clone()
                    }
                })
                .collect(),
        )
    }
}

impl Default for InverterCatalog {
    /// Solis ladder from 3 kW to 125 kW.
    fn default() -> Self {
        const LADDER: &[(f64, u32)] = &[
            (3.0, 4),
            (5.0, 4),
            (10.0, 6),
            (15.0, 6),
            (20.0, 8),
            (30.0, 8),
            (40.0, 8),
            (50.0, 10),
            (60.0, 12),
            (80.0, 16),
            (100.0, 20),
            (110.0, 20),
            (125.0, 20),
        ];
        Self::new(
            LADDER
                .iter()
                .map(|&(kw, mppt)| {
                    InverterModel::new(
                        format!("solis-{kw}"),
                        format!("Solis {kw}kW"),
                        kw,
                        98.0,
                        mppt,
                    )
                })
                .collect(),
        )
    }
}

impl From<Vec<InverterModel>> for InverterCatalog {
    fn from(models: Vec<InverterModel>) -> Self {
        Self::new(models)
    }
}
