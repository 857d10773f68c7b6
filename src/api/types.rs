//! API request and error types.

use serde::{Deserialize, Serialize};

use crate::catalog::inverter::InverterCatalog;
use crate::report::SizingRequest;
use crate::sizing::wiring::WiringOptions;

/// Body of `POST /size`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeRequest {
    /// Label used in the report; defaults to `"custom"`.
    #[serde(default)]
    pub panel_name: Option<String>,
    /// Nameplate power of one panel (W).
    pub panel_power_w: f64,
    pub panel_count: u32,
    /// Series strings (0 = omit string layout).
    #[serde(default)]
    pub strings: u32,
    #[serde(default)]
    pub wiring: WiringOptions,
}

impl SizeRequest {
    /// Pairs the request with the server's catalog.
    pub fn into_sizing_request(self, catalog: InverterCatalog) -> SizingRequest {
        SizingRequest {
            panel_name: self.panel_name.unwrap_or_else(|| "custom".to_string()),
            panel_power_w: self.panel_power_w,
            panel_count: self.panel_count,
            strings: self.strings,
            catalog,
            wiring: self.wiring,
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
