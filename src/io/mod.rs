/// Inverter catalog CSV import.
pub mod catalog;
/// Wiring schedule CSV export.
pub mod export;
