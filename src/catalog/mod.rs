//! Static and user-supplied catalogs consumed by the sizing engine.

/// Standard breaker rating ladder.
pub mod breaker;
/// Cable ampacity table.
pub mod cable;
/// Inverter models and editable catalogs.
pub mod inverter;
/// PV module catalog.
pub mod panel;

pub use breaker::STANDARD_BREAKER_RATINGS_A;
pub use cable::{AmpacityKey, CableTable};
pub use inverter::{InverterCatalog, InverterModel};
pub use panel::SolarPanel;
