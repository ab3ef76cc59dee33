use crate::bodies::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectClass {
    Hard,
    Soft,
}

impl AspectClass {
    /// Single-letter dimension tag used in reports: 'H' or 'S'.
    pub fn dimension(self) -> char {
        match self {
            AspectClass::Hard => 'H',
            AspectClass::Soft => 'S',
        }
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectClass::Hard => f.write_str("Hard"),
            AspectClass::Soft => f.write_str("Soft"),
        }
    }
}

/// A canonical separation angle and what it is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectDefinition {
    pub angle: u16,
    pub name: &'static str,
    pub class: AspectClass,
    pub symbol: &'static str,
}

/// Hard = 0, 90, 180; everything else soft.
pub const ASPECT_TABLE: [AspectDefinition; 7] = [
    AspectDefinition { angle: 0, name: "Conjunction", class: AspectClass::Hard, symbol: "☌" },
    AspectDefinition { angle: 30, name: "Semi-Sextile", class: AspectClass::Soft, symbol: "⚹" },
    AspectDefinition { angle: 60, name: "Sextile", class: AspectClass::Soft, symbol: "⚹" },
    AspectDefinition { angle: 90, name: "Square", class: AspectClass::Hard, symbol: "□" },
    AspectDefinition { angle: 120, name: "Trine", class: AspectClass::Soft, symbol: "△" },
    AspectDefinition { angle: 150, name: "Quincunx", class: AspectClass::Soft, symbol: "⚻" },
    AspectDefinition { angle: 180, name: "Opposition", class: AspectClass::Hard, symbol: "☍" },
];

/// Look up the definition for a canonical angle.
pub fn aspect_for_angle(angle: u16) -> Option<&'static AspectDefinition> {
    ASPECT_TABLE.iter().find(|def| def.angle == angle)
}

/// Whether one chart is compared with itself or two charts with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    Natal,
    Synastry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Magnitude {
    Major,
    Minor,
}

/// One aspect found between two bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectMatch {
    /// Canonical angle (0, 30, ... 180)
    pub angle: u16,
    pub aspect_name: &'static str,
    pub aspect_class: AspectClass,
    pub symbol: &'static str,
    /// Tolerance that admitted this match
    pub orb: f64,
    /// |separation - angle|
    pub deviation: f64,
    /// Chart-1 side
    pub body1: Body,
    /// Chart-2 side (same chart in natal mode)
    pub body2: Body,
    pub dimension: char,
}

impl AspectMatch {
    pub fn new(definition: &AspectDefinition, orb: f64, deviation: f64, body1: Body, body2: Body) -> Self {
        Self {
            angle: definition.angle,
            aspect_name: definition.name,
            aspect_class: definition.class,
            symbol: definition.symbol,
            orb,
            deviation,
            body1,
            body2,
            dimension: definition.class.dimension(),
        }
    }
}
