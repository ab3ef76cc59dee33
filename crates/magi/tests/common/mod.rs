#![allow(dead_code)]

use chrono::{DateTime, Utc};
use magi::ephemeris::{BackendState, EphemerisAdapter, EphemerisError, Ephemerides, GeoLocation};
use magi::{Body, Chart, PositionResolver};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Longitudes that move linearly from the chart instant: `start + rate * hours`.
pub struct LinearEphemeris {
    pub epoch: DateTime<Utc>,
    pub motion: HashMap<Body, (f64, f64)>,
    pub calls: AtomicUsize,
}

impl LinearEphemeris {
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            epoch,
            motion: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, body: Body, start: f64, degrees_per_hour: f64) -> Self {
        self.motion.insert(body, (start, degrees_per_hour));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EphemerisAdapter for LinearEphemeris {
    fn name(&self) -> &str {
        "linear"
    }

    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        _location: GeoLocation,
    ) -> Result<f64, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (start, rate) = self.motion.get(&body).copied().unwrap_or((0.0, 0.0));
        let hours = (instant - self.epoch).num_seconds() as f64 / 3600.0;
        Ok((start + rate * hours).rem_euclid(360.0))
    }
}

/// Always answers with the same error.
pub struct FailingEphemeris(pub EphemerisError);

impl EphemerisAdapter for FailingEphemeris {
    fn name(&self) -> &str {
        "failing"
    }

    fn longitude(
        &self,
        _body: Body,
        _instant: DateTime<Utc>,
        _location: GeoLocation,
    ) -> Result<f64, EphemerisError> {
        Err(self.0.clone())
    }
}

pub fn test_chart() -> Chart {
    Chart::parse("Test Subject", "2000-01-01", "12:00", 0.0, 51.48, 0.0).unwrap()
}

pub fn epoch() -> DateTime<Utc> {
    test_chart().utc_instant().unwrap()
}

pub fn resolver_with(classical: BackendState, minor_body: BackendState) -> PositionResolver {
    PositionResolver::new(Arc::new(Ephemerides::from_parts(classical, minor_body)))
}

pub fn ready(adapter: impl EphemerisAdapter + 'static) -> BackendState {
    BackendState::Ready(Arc::new(adapter))
}

pub fn unavailable(reason: &str) -> BackendState {
    BackendState::Unavailable {
        reason: reason.to_string(),
    }
}
