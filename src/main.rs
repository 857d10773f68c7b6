//! PV sizing entry point: CLI wiring and config-driven sizing run.

mod cli;

use std::process;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pv_sizing::config::ProjectConfig;
use pv_sizing::io::catalog::read_catalog_path;
use pv_sizing::io::export::export_schedule;
use pv_sizing::report::size_system;

use crate::cli::Args;

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    // --project takes priority, then --preset, then commercial
    let mut project = match &args.project {
        Some(path) => ProjectConfig::from_toml_file(path),
        None => ProjectConfig::from_preset(args.preset_name()),
    }
    .unwrap_or_else(|e| fail(e));

    if let Some(count) = args.panel_count {
        project.array.panel_count = count;
    }

    let errors = project.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let catalog = match &args.catalog {
        Some(path) => read_catalog_path(path).unwrap_or_else(|e| fail(e)),
        None => project.inverter_catalog().unwrap_or_else(|e| fail(e)),
    };
    info!(models = catalog.len(), "inverter catalog ready");

    let request = project
        .to_request(catalog.clone())
        .unwrap_or_else(|e| fail(e));
    let report = size_system(&request).unwrap_or_else(|e| fail(e));

    println!("{report}");

    if let Some(path) = &args.schedule_out {
        match &report.wiring {
            Some(plan) => {
                if let Err(e) = export_schedule(plan, path) {
                    fail(format!("failed to write schedule: {e}"));
                }
                info!(path = %path.display(), "wiring schedule written");
            }
            None => warn!("no inverter combination, wiring schedule not written"),
        }
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(pv_sizing::api::AppState { report, catalog });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(format!("failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(pv_sizing::api::serve(state, addr)) {
            fail(format!("server error: {e}"));
        }
    }

    #[cfg(not(feature = "api"))]
    if args.serve {
        warn!(port = args.port, "built without the api feature, --serve ignored");
    }
}
