//! REST API over the sizing engine.
//!
//! Routes:
//! - `GET /report`: the report computed at startup
//! - `GET /catalog/inverters`: the active inverter catalog
//! - `POST /size`: sizes an ad-hoc array against the active catalog

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::catalog::inverter::InverterCatalog;
use crate::report::SizingReport;

pub use types::{ErrorResponse, SizeRequest};

/// Immutable application state shared across all request handlers.
///
/// Built once after the startup sizing run and wrapped in `Arc`.
pub struct AppState {
    /// Report for the configured project.
    pub report: SizingReport,
    /// Catalog used for the report and for `POST /size`.
    pub catalog: InverterCatalog,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/report", get(handlers::get_report))
        .route("/catalog/inverters", get(handlers::get_inverters))
        .route("/size", post(handlers::post_size))
        .with_state(state)
}

/// Binds to `addr` and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
