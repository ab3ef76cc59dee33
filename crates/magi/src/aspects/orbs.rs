//! Orb tolerances keyed by comparison mode and aspect magnitude.

use crate::aspects::types::{ComparisonMode, Magnitude};
use std::collections::HashMap;

type OrbKey = (ComparisonMode, Magnitude);

lazy_static::lazy_static! {
    // Synastry orbs are tighter than natal ones.
    static ref DEFAULT_ORBS: HashMap<OrbKey, f64> = HashMap::from([
        ((ComparisonMode::Natal, Magnitude::Major), 3.0),
        ((ComparisonMode::Natal, Magnitude::Minor), 1.0),
        ((ComparisonMode::Synastry, Magnitude::Major), 1.0),
        ((ComparisonMode::Synastry, Magnitude::Minor), 0.5),
    ]);
}

/// Tolerance table. Every (mode, magnitude) key is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbPolicy {
    table: HashMap<OrbKey, f64>,
}

impl OrbPolicy {
    pub fn orb(&self, mode: ComparisonMode, magnitude: Magnitude) -> f64 {
        self.table
            .get(&(mode, magnitude))
            .or_else(|| DEFAULT_ORBS.get(&(mode, magnitude)))
            .copied()
            .unwrap_or(0.0)
    }

    /// Replace one entry. Negative or non-finite values are clamped to 0.
    pub fn with_orb(mut self, mode: ComparisonMode, magnitude: Magnitude, degrees: f64) -> Self {
        let degrees = if degrees.is_finite() { degrees.max(0.0) } else { 0.0 };
        self.table.insert((mode, magnitude), degrees);
        self
    }
}

impl Default for OrbPolicy {
    fn default() -> Self {
        Self {
            table: DEFAULT_ORBS.clone(),
        }
    }
}
