use crate::bodies::Body;
use crate::chart::Chart;
use crate::ephemeris::{BackendState, EphemerisAdapter, EphemerisError, Ephemerides, GeoLocation};
use crate::error::MagiError;
use crate::positions::types::{Position, PositionMap};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Offset of the second sample used to tell direct from retrograde motion.
pub fn motion_probe() -> Duration {
    Duration::hours(1)
}

/// Signed longitude change from `current` to `future`, corrected for the
/// 360°/0° seam so the result lies in [-180, 180].
pub fn motion_delta(current: f64, future: f64) -> f64 {
    let delta = future - current;
    if delta < -180.0 {
        delta + 360.0
    } else if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Resolves a chart into one `Position` per roster body.
#[derive(Debug, Clone)]
pub struct PositionResolver {
    ephemerides: Arc<Ephemerides>,
}

impl PositionResolver {
    pub fn new(ephemerides: Arc<Ephemerides>) -> Self {
        Self { ephemerides }
    }

    pub fn ephemerides(&self) -> &Ephemerides {
        &self.ephemerides
    }

    /// Total over the roster. A malformed chart is rejected before any
    /// ephemeris query is made.
    pub fn resolve(&self, chart: &Chart) -> Result<PositionMap, MagiError> {
        chart.validate()?;
        let instant = chart.utc_instant()?;
        let probe_instant = instant.checked_add_signed(motion_probe()).ok_or_else(|| {
            MagiError::invalid_chart(
                &chart.name,
                format!("no room for a motion sample after {}", instant),
            )
        })?;

        let mut positions = PositionMap::new();
        for body in Body::ALL {
            let position = self.resolve_body(chart, body, instant, probe_instant)?;
            positions.insert(body, position);
        }
        Ok(positions)
    }

    fn resolve_body(
        &self,
        chart: &Chart,
        body: Body,
        instant: DateTime<Utc>,
        probe_instant: DateTime<Utc>,
    ) -> Result<Position, MagiError> {
        let adapter = match self.ephemerides.state_for(body) {
            BackendState::Ready(adapter) => adapter,
            BackendState::Unavailable { reason } => {
                log::warn!(
                    "{} set to 0° for {}: {} ephemeris unavailable ({})",
                    body,
                    chart.name,
                    body.backend(),
                    reason
                );
                return Ok(Position::degraded());
            }
        };

        let location = chart.location;
        let current = match query(adapter.as_ref(), chart, body, instant, location)? {
            Some(lon) => lon,
            None => return Ok(Position::degraded()),
        };

        if !body.tracks_motion() {
            return Ok(Position::new(current, false));
        }

        let future = query(adapter.as_ref(), chart, body, probe_instant, location)?;
        let is_retrograde = match future {
            Some(future) => motion_delta(current, future) < 0.0,
            None => false,
        };
        Ok(Position::new(current, is_retrograde))
    }
}

/// `Ok(None)` means the source is unavailable for this body and the caller
/// should substitute; every other failure is surfaced.
fn query(
    adapter: &dyn EphemerisAdapter,
    chart: &Chart,
    body: Body,
    instant: DateTime<Utc>,
    location: GeoLocation,
) -> Result<Option<f64>, MagiError> {
    match adapter.longitude(body, instant, location) {
        Ok(lon) => Ok(Some(lon)),
        Err(EphemerisError::Unavailable { backend, reason }) => {
            log::warn!(
                "{} unavailable for {} at {} from {} ephemeris: {}",
                body,
                chart.name,
                instant,
                backend,
                reason
            );
            Ok(None)
        }
        Err(EphemerisError::UnsupportedBody { .. }) => Err(MagiError::UnsupportedBody {
            name: body.name().to_string(),
        }),
        Err(e) => Err(MagiError::Ephemeris(e)),
    }
}
