use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Reference frame longitudes are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    #[default]
    Geocentric,
    Heliocentric,
}

impl FromStr for Frame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geocentric" => Ok(Frame::Geocentric),
            "heliocentric" => Ok(Frame::Heliocentric),
            other => Err(format!(
                "unknown frame '{}', expected 'geocentric' or 'heliocentric'",
                other
            )),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Geocentric => f.write_str("geocentric"),
            Frame::Heliocentric => f.write_str("heliocentric"),
        }
    }
}

/// Settings for the one-time ephemeris initialisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// Directory holding the Swiss Ephemeris `.se1` files
    pub path: PathBuf,
    pub frame: Frame,
}

impl EphemerisSettings {
    /// `SWISS_EPHEMERIS_PATH`, falling back to the conventional install location.
    pub fn default_path() -> PathBuf {
        env::var("SWISS_EPHEMERIS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
    }
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            frame: Frame::default(),
        }
    }
}
