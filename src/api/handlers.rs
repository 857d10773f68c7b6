//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::debug;

use super::AppState;
use super::types::{ErrorResponse, SizeRequest};
use crate::catalog::inverter::InverterModel;
use crate::report::{SizingReport, size_system};

/// `GET /report` → 200 + `SizingReport` JSON
pub async fn get_report(State(state): State<Arc<AppState>>) -> Json<SizingReport> {
    Json(state.report.clone())
}

/// `GET /catalog/inverters` → 200 + `Vec<InverterModel>` JSON
pub async fn get_inverters(State(state): State<Arc<AppState>>) -> Json<Vec<InverterModel>> {
    Json(state.catalog.models().to_vec())
}

/// Sizes the posted array against the server's catalog.
///
/// `POST /size` → 200 + `SizingReport` JSON
/// `POST /size` with zero panels or a panel power that is not > 0 → 400 + `ErrorResponse`
pub async fn post_size(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SizeRequest>,
) -> impl IntoResponse {
    if body.panel_count == 0 {
        return Err(bad_request("panel_count must be > 0".to_string()));
    }
    if !body.panel_power_w.is_finite() || body.panel_power_w <= 0.0 {
        return Err(bad_request("panel_power_w must be > 0".to_string()));
    }
    let request = body.into_sizing_request(state.catalog.clone());
    match size_system(&request) {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            debug!(error = %e, "rejected sizing request");
            Err(bad_request(e.to_string()))
        }
    }
}

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}
