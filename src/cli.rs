//! Command-line arguments for the `pv-sizing` binary.

use std::path::PathBuf;

use clap::Parser;

/// Sizes inverters, breakers and cables for a PV installation.
///
/// With neither `--project` nor `--preset` the `commercial` preset is used.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Project TOML file
    #[arg(long, conflicts_with = "preset")]
    pub project: Option<PathBuf>,
    /// Built-in preset (rooftop, commercial, industrial)
    #[arg(long)]
    pub preset: Option<String>,
    /// Inverter catalog CSV; replaces the project's catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Override the number of panels
    #[arg(long)]
    pub panel_count: Option<u32>,
    /// Write the wiring schedule to this CSV file
    #[arg(long)]
    pub schedule_out: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
    /// Start the REST API after sizing (requires the `api` feature)
    #[arg(long)]
    pub serve: bool,
    /// API server port
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Args {
    /// Preset to load when no project file is given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or("commercial")
    }
}
