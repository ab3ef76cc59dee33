use crate::bodies::Body;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One body's place in a chart. Built once per resolution, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Ecliptic longitude in degrees, [0, 360)
    pub longitude: f64,
    pub is_retrograde: bool,
    /// "Rx" when retrograde, empty otherwise
    pub rx_label: String,
    /// Set when the backend was unavailable and the 0° sentinel was substituted
    #[serde(default)]
    pub degraded: bool,
}

/// Positions keyed by body, iterated in roster order.
pub type PositionMap = BTreeMap<Body, Position>;

impl Position {
    pub fn new(longitude: f64, is_retrograde: bool) -> Self {
        Self {
            longitude: normalize_degrees(longitude),
            is_retrograde,
            rx_label: if is_retrograde { "Rx".to_string() } else { String::new() },
            degraded: false,
        }
    }

    /// The sentinel used when a body's source could not be queried.
    pub fn degraded() -> Self {
        Self {
            degraded: true,
            ..Self::new(0.0, false)
        }
    }
}

/// Map any finite angle onto [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
