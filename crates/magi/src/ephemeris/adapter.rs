use crate::bodies::Body;
use crate::ephemeris::types::{Frame, GeoLocation};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swisseph::swe::{calc_ut, julday};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("{backend} ephemeris does not serve {body}")]
    UnsupportedBody { backend: String, body: Body },
    #[error("{backend} ephemeris unavailable: {reason}")]
    Unavailable { backend: String, reason: String },
    #[error("Failed to calculate position for {body} at {datetime}: {message}")]
    CalculationFailed {
        body: Body,
        datetime: DateTime<Utc>,
        message: String,
    },
}

/// A source of ecliptic longitudes.
///
/// Implementations may block (file or network I/O); the resolver calls them
/// synchronously and applies no retry of its own.
pub trait EphemerisAdapter: Send + Sync {
    /// Human-readable backend name used in logs and errors.
    fn name(&self) -> &str;

    /// Ecliptic longitude of `body` in degrees at `instant`, seen from `location`.
    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        location: GeoLocation,
    ) -> Result<f64, EphemerisError>;
}

// Swiss Ephemeris flag bits
const FLG_SWIEPH: u32 = 2;
const FLG_MOSEPH: u32 = 4;
const FLG_HELCTR: u32 = 8;

// SE_CHIRON
const CHIRON_ID: u32 = 15;

// Swiss Ephemeris planet IDs for the classical source
const CLASSICAL_IDS: &[(Body, u32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
];

lazy_static::lazy_static! {
    // The C library keeps global state (file handles, cached positions).
    static ref SWISS_LOCK: Mutex<()> = Mutex::new(());
}

fn frame_flags(frame: Frame) -> u32 {
    match frame {
        Frame::Geocentric => 0,
        Frame::Heliocentric => FLG_HELCTR,
    }
}

fn swiss_longitude(
    code: u32,
    body: Body,
    instant: DateTime<Utc>,
    flags: u32,
) -> Result<f64, String> {
    let jd = datetime_to_julian_day(instant);
    let _guard = SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let result = calc_ut(jd, code, flags).map_err(|e| format!("Swiss Ephemeris error: {}", e))?;
    let lon = result.out[0];
    if !lon.is_finite() {
        return Err(format!("non-finite longitude for {}", body));
    }
    Ok(lon)
}

/// Earth's heliocentric longitude, opposite the Sun's geocentric one.
fn opposite_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0)
}

/// Classical-planet source: Sun through Pluto via the Swiss Ephemeris.
///
/// Uses the `.se1` data files when the directory exists and the bundled
/// Moshier analytic theory otherwise. In the heliocentric frame the Sun
/// slot carries the Earth's longitude.
pub struct SwissEphemerisAdapter {
    source: u32,
    frame: Frame,
}

impl SwissEphemerisAdapter {
    pub fn new(ephemeris_path: &Path, frame: Frame) -> Result<Self, EphemerisError> {
        let source = if ephemeris_path.is_dir() {
            FLG_SWIEPH
        } else {
            log::info!(
                "Swiss Ephemeris files not found at {}; classical bodies use the Moshier ephemeris",
                ephemeris_path.display()
            );
            FLG_MOSEPH
        };

        Ok(Self { source, frame })
    }

    pub fn uses_data_files(&self) -> bool {
        self.source & FLG_SWIEPH != 0
    }
}

impl EphemerisAdapter for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        "classical"
    }

    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        _location: GeoLocation,
    ) -> Result<f64, EphemerisError> {
        let code = CLASSICAL_IDS
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::UnsupportedBody {
                backend: self.name().to_string(),
                body,
            })?;

        let failed = |message| EphemerisError::CalculationFailed {
            body,
            datetime: instant,
            message,
        };

        if body == Body::Sun && self.frame == Frame::Heliocentric {
            return swiss_longitude(code, body, instant, self.source)
                .map(opposite_longitude)
                .map_err(failed);
        }
        swiss_longitude(code, body, instant, self.source | frame_flags(self.frame)).map_err(failed)
    }
}

/// Minor-body source: Chiron from the Swiss Ephemeris asteroid files.
///
/// Unlike the classical source there is no analytic fallback, so the
/// adapter refuses to initialise without a `seas_*.se1` file.
pub struct MinorBodyAdapter {
    asteroid_file: PathBuf,
    flags: u32,
}

impl MinorBodyAdapter {
    pub fn new(ephemeris_path: &Path, frame: Frame) -> Result<Self, EphemerisError> {
        let asteroid_file = find_asteroid_file(ephemeris_path)?;
        Ok(Self {
            asteroid_file,
            flags: FLG_SWIEPH | frame_flags(frame),
        })
    }

    pub fn asteroid_file(&self) -> &Path {
        &self.asteroid_file
    }
}

impl EphemerisAdapter for MinorBodyAdapter {
    fn name(&self) -> &str {
        "minor-body"
    }

    fn longitude(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        _location: GeoLocation,
    ) -> Result<f64, EphemerisError> {
        if body != Body::Chiron {
            return Err(EphemerisError::UnsupportedBody {
                backend: self.name().to_string(),
                body,
            });
        }

        // The asteroid files cover fixed epochs; outside them the body is simply not available.
        swiss_longitude(CHIRON_ID, body, instant, self.flags).map_err(|reason| {
            EphemerisError::Unavailable {
                backend: self.name().to_string(),
                reason,
            }
        })
    }
}

fn find_asteroid_file(dir: &Path) -> Result<PathBuf, EphemerisError> {
    let not_found = |message: &str| EphemerisError::FileNotFound {
        path: dir.display().to_string(),
        message: message.to_string(),
    };

    let entries = fs::read_dir(dir)
        .map_err(|e| not_found(&format!("Cannot read ephemeris directory: {}", e)))?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("seas") && n.ends_with(".se1"))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| not_found("No asteroid file (seas_*.se1) present; Chiron cannot be computed."))
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let year = dt.year();
    let month = dt.month();
    let day = dt.day();
    let hour = dt.hour() as f64;
    let minute = dt.minute() as f64;
    let second = dt.second() as f64;
    let hour_decimal = hour + minute / 60.0 + second / 3600.0;

    // GREG_CAL = 1
    julday(year, month as i32, day as i32, hour_decimal, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_body_requires_asteroid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sepl_18.se1"), b"").unwrap();
        match MinorBodyAdapter::new(dir.path(), Frame::Geocentric) {
            Err(EphemerisError::FileNotFound { .. }) => {}
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => panic!("adapter should not initialise without seas file"),
        }
    }

    #[test]
    fn test_minor_body_finds_asteroid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("seas_18.se1"), b"").unwrap();
        let adapter = MinorBodyAdapter::new(dir.path(), Frame::Geocentric).unwrap();
        assert!(adapter.asteroid_file().ends_with("seas_18.se1"));
    }

    #[test]
    fn test_opposite_longitude_wraps() {
        assert_eq!(opposite_longitude(10.0), 190.0);
        assert_eq!(opposite_longitude(270.0), 90.0);
        assert_eq!(opposite_longitude(180.0), 0.0);
    }

    #[test]
    fn test_missing_directory_falls_back_to_moshier() {
        let adapter =
            SwissEphemerisAdapter::new(Path::new("/nonexistent/magi/ephe"), Frame::Geocentric)
                .unwrap();
        assert!(!adapter.uses_data_files());
    }

    #[test]
    fn test_classical_rejects_chiron() {
        let adapter =
            SwissEphemerisAdapter::new(Path::new("/nonexistent/magi/ephe"), Frame::Geocentric)
                .unwrap();
        let location = GeoLocation { lat: 0.0, lon: 0.0 };
        assert!(matches!(
            adapter.longitude(Body::Chiron, Utc::now(), location),
            Err(EphemerisError::UnsupportedBody { .. })
        ));
    }
}
