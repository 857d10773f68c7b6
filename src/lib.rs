//! Inverter selection and electrical sizing for grid-tied PV installations.

/// Inverter, panel, breaker and cable catalogs.
pub mod catalog;
pub mod config;
pub mod error;
/// CSV catalog import and wiring schedule export.
pub mod io;
pub mod report;
/// Array power, inverter search and electrical sizing.
pub mod sizing;

#[cfg(feature = "api")]
pub mod api;

pub use error::{Result, SizingError};
pub use report::{SizingReport, SizingRequest, size_system};
