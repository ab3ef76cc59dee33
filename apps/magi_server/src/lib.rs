//! HTTP surface for the Magi report.
//!
//! Every request resolves both charts afresh; only the ephemeris backends,
//! orb table and chart inputs are shared between requests.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{routing::get, Router};
use magi::{AspectEngine, Chart, PositionResolver};
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub resolver: PositionResolver,
    pub engine: AspectEngine,
    pub charts: [Chart; 2],
    pub request_timeout: Duration,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::report_text))
        .route("/run", get(handlers::report_text))
        .route("/report.json", get(handlers::report_json))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}
