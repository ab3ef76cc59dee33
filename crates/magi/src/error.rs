use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors surfaced to callers of the position and aspect pipeline.
///
/// Backend degradation never shows up here; it is absorbed by the resolver.
#[derive(Error, Debug)]
pub enum MagiError {
    #[error("Unsupported body: {name}")]
    UnsupportedBody { name: String },
    #[error("Invalid chart '{chart}': {reason}")]
    InvalidChart { chart: String, reason: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

impl MagiError {
    pub(crate) fn invalid_chart(chart: &str, reason: impl Into<String>) -> Self {
        Self::InvalidChart {
            chart: chart.to_string(),
            reason: reason.into(),
        }
    }
}
