//! TOML-based project configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::inverter::{InverterCatalog, InverterModel};
use crate::catalog::panel::find_panel;
use crate::io::catalog::read_catalog_path;
use crate::report::SizingRequest;
use crate::sizing::types::{CoreType, Installation, Insulation, Phase};
use crate::sizing::wiring::WiringOptions;

/// Top-level project configuration parsed from TOML.
///
/// All sections have defaults matching the `commercial` preset. Load
/// from TOML with [`ProjectConfig::from_toml_file`] or pick a built-in
/// preset with [`ProjectConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// PV array parameters.
    #[serde(default)]
    pub array: ArrayConfig,
    /// Installation choices for every circuit.
    #[serde(default)]
    pub wiring: WiringOptions,
    /// Inverter catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// PV array parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayConfig {
    /// Built-in panel id (e.g. `"longi-645"`).
    pub panel: String,
    /// Explicit panel power (W); overrides the catalog figure.
    pub panel_power_w: Option<f64>,
    /// Number of panels (must be > 0).
    pub panel_count: u32,
    /// Number of series strings (0 = not specified).
    pub strings: u32,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            panel: "longi-645".to_string(),
            panel_power_w: None,
            panel_count: 100,
            strings: 6,
        }
    }
}

/// Inverter catalog source: a CSV file, inline entries, or the default ladder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// CSV file with `id,name,rated_power_kw,efficiency_pct,mppt_count`.
    pub inverters_csv: Option<PathBuf>,
    /// Inline catalog entries.
    pub inverters: Vec<InverterModel>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"array.panel_count"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ProjectConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["rooftop", "commercial", "industrial"];

    /// 100 x 645 W on a three-phase XLPE multi-core installation.
    pub fn commercial() -> Self {
        Self {
            array: ArrayConfig::default(),
            wiring: WiringOptions::default(),
            catalog: CatalogConfig::default(),
        }
    }

    /// Small single-phase residential roof.
    pub fn rooftop() -> Self {
        Self {
            array: ArrayConfig {
                panel: "ja-solar-550".to_string(),
                panel_count: 20,
                strings: 2,
                ..ArrayConfig::default()
            },
            wiring: WiringOptions {
                phase: Phase::Single,
                core: CoreType::Multi,
                insulation: Insulation::Pvc,
                installation: Installation::Air,
            },
            catalog: CatalogConfig::default(),
        }
    }

    /// Ground-mounted plant near 1 MWp with buried single-core feeders.
    pub fn industrial() -> Self {
        Self {
            array: ArrayConfig {
                panel: "trina-620".to_string(),
                panel_count: 1600,
                strings: 80,
                ..ArrayConfig::default()
            },
            wiring: WiringOptions {
                phase: Phase::Three,
                core: CoreType::Single,
                insulation: Insulation::Xlpe,
                installation: Installation::Underground,
            },
            catalog: CatalogConfig::default(),
        }
    }

    /// Loads a project from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "rooftop" => Ok(Self::rooftop()),
            "commercial" => Ok(Self::commercial()),
            "industrial" => Ok(Self::industrial()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a project from a TOML file.
    ///
    /// A relative `catalog.inverters_csv` path is resolved against the
    /// directory holding the project file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("project", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if let (Some(csv), Some(dir)) = (&cfg.catalog.inverters_csv, path.parent())
            && csv.is_relative()
        {
            cfg.catalog.inverters_csv = Some(dir.join(csv));
        }
        Ok(cfg)
    }

    /// Parses a project from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let a = &self.array;

        match a.panel_power_w {
            Some(p) if !p.is_finite() || p <= 0.0 => {
                errors.push(ConfigError::new("array.panel_power_w", "must be > 0"));
            }
            Some(_) => {}
            None => {
                if find_panel(&a.panel).is_none() {
                    errors.push(ConfigError::new(
                        "array.panel",
                        format!(
                            "unknown panel \"{}\" (set array.panel_power_w for custom panels)",
                            a.panel
                        ),
                    ));
                }
            }
        }
        if a.panel_count == 0 {
            errors.push(ConfigError::new("array.panel_count", "must be > 0"));
        }

        let c = &self.catalog;
        if c.inverters_csv.is_some() && !c.inverters.is_empty() {
            errors.push(ConfigError::new(
                "catalog",
                "set either inverters_csv or inline inverters, not both",
            ));
        }
        for (i, model) in c.inverters.iter().enumerate() {
            if let Some(problem) = model.check() {
                errors.push(ConfigError::new(format!("catalog.inverters[{i}]"), problem));
            }
            if c.inverters[..i].iter().any(|m| m.id == model.id) {
                errors.push(ConfigError::new(
                    format!("catalog.inverters[{i}].id"),
                    format!("duplicate id \"{}\"", model.id),
                ));
            }
        }

        errors
    }

    /// Builds the inverter catalog this project uses.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the catalog CSV cannot be loaded.
    pub fn inverter_catalog(&self) -> Result<InverterCatalog, ConfigError> {
        if let Some(path) = &self.catalog.inverters_csv {
            return read_catalog_path(path)
                .map_err(|e| ConfigError::new("catalog.inverters_csv", e.to_string()));
        }
        if !self.catalog.inverters.is_empty() {
            return Ok(InverterCatalog::new(self.catalog.inverters.clone()));
        }
        Ok(InverterCatalog::default())
    }

    /// Turns the configuration into a sizing request over `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the panel cannot be resolved.
    pub fn to_request(&self, catalog: InverterCatalog) -> Result<SizingRequest, ConfigError> {
        let a = &self.array;
        let (panel_name, panel_power_w) = match (a.panel_power_w, find_panel(&a.panel)) {
            (Some(power), Some(panel)) => (panel.name, power),
            (Some(power), None) => (a.panel.clone(), power),
            (None, Some(panel)) => (panel.name, panel.power_w),
            (None, None) => {
                return Err(ConfigError::new(
                    "array.panel",
                    format!("unknown panel \"{}\"", a.panel),
                ));
            }
        };
        Ok(SizingRequest {
            panel_name,
            panel_power_w,
            panel_count: a.panel_count,
            strings: a.strings,
            catalog,
            wiring: self.wiring,
        })
    }
}
