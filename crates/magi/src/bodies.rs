//! The fixed roster of bodies a chart is computed for.
//!
//! Declaration order is the roster order; `Ord` follows it, so a
//! `BTreeMap<Body, _>` iterates Sun first and Chiron last.

use crate::error::MagiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
}

/// Which physical ephemeris source serves a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Classical,
    MinorBody,
}

impl Body {
    pub const ALL: [Body; 11] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::Chiron,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Chiron => "Chiron",
        }
    }

    /// Whether retrograde status is reported for this body.
    ///
    /// The luminaries never station geocentrically and Chiron comes from
    /// the minor-body source, which is sampled once.
    pub fn tracks_motion(self) -> bool {
        !matches!(self, Body::Sun | Body::Moon | Body::Chiron)
    }

    pub fn backend(self) -> BackendKind {
        match self {
            Body::Chiron => BackendKind::MinorBody,
            _ => BackendKind::Classical,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = MagiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MagiError::UnsupportedBody {
                name: wanted.to_string(),
            })
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Classical => f.write_str("classical"),
            BackendKind::MinorBody => f.write_str("minor-body"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_order_matches_ord() {
        let mut sorted = Body::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, Body::ALL.to_vec());
        assert_eq!(Body::ALL.first(), Some(&Body::Sun));
        assert_eq!(Body::ALL.last(), Some(&Body::Chiron));
    }

    #[test]
    fn test_motion_tracking() {
        assert!(!Body::Sun.tracks_motion());
        assert!(!Body::Moon.tracks_motion());
        assert!(!Body::Chiron.tracks_motion());
        assert!(Body::Mercury.tracks_motion());
        assert!(Body::Pluto.tracks_motion());
    }

    #[test]
    fn test_parse_body_names() {
        assert_eq!("mars".parse::<Body>().unwrap(), Body::Mars);
        assert_eq!(" Chiron ".parse::<Body>().unwrap(), Body::Chiron);
        match "ceres".parse::<Body>() {
            Err(MagiError::UnsupportedBody { name }) => assert_eq!(name, "ceres"),
            other => panic!("expected UnsupportedBody, got {:?}", other),
        }
    }

    #[test]
    fn test_backend_selection() {
        assert_eq!(Body::Chiron.backend(), BackendKind::MinorBody);
        assert_eq!(Body::Saturn.backend(), BackendKind::Classical);
    }
}
