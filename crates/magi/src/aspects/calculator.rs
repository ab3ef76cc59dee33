use crate::aspects::orbs::OrbPolicy;
use crate::aspects::types::{AspectMatch, ComparisonMode, Magnitude, ASPECT_TABLE};
use crate::bodies::Body;
use crate::positions::PositionMap;
use std::cmp::Ordering;

/// Minor-arc separation between two longitudes, always in [0, 180].
pub fn circular_diff(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs();
    raw_diff.min(360.0 - raw_diff)
}

/// Body pairs to compare, chart-1 side first.
///
/// Natal mode (`second` absent) yields each unordered pair once in roster
/// order and never pairs a body with itself. Synastry mode yields the full
/// cross product, including same-named bodies from the two charts.
pub fn candidate_pairs(first: &PositionMap, second: Option<&PositionMap>) -> Vec<(Body, Body)> {
    let bodies1: Vec<Body> = first.keys().copied().collect();
    match second {
        None => {
            let mut pairs = Vec::with_capacity(bodies1.len() * bodies1.len().saturating_sub(1) / 2);
            for i in 0..bodies1.len() {
                for j in (i + 1)..bodies1.len() {
                    pairs.push((bodies1[i], bodies1[j]));
                }
            }
            pairs
        }
        Some(second) => {
            let mut pairs = Vec::with_capacity(bodies1.len() * second.len());
            for &body1 in &bodies1 {
                for &body2 in second.keys() {
                    pairs.push((body1, body2));
                }
            }
            pairs
        }
    }
}

/// Matches body pairs against the aspect table.
#[derive(Debug, Clone, Default)]
pub struct AspectEngine {
    orbs: OrbPolicy,
}

impl AspectEngine {
    pub fn new(orbs: OrbPolicy) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbPolicy {
        &self.orbs
    }

    /// The tolerance applied in a given mode. Only the major orb is wired in.
    pub fn orb_for(&self, mode: ComparisonMode) -> f64 {
        self.orbs.orb(mode, Magnitude::Major)
    }

    pub fn natal(&self, positions: &PositionMap) -> Vec<AspectMatch> {
        self.match_aspects(positions, None)
    }

    pub fn synastry(&self, first: &PositionMap, second: &PositionMap) -> Vec<AspectMatch> {
        self.match_aspects(first, Some(second))
    }

    /// All aspects within orb, sorted by (angle, body1 name, body2 name).
    pub fn match_aspects(&self, first: &PositionMap, second: Option<&PositionMap>) -> Vec<AspectMatch> {
        let mode = match second {
            None => ComparisonMode::Natal,
            Some(_) => ComparisonMode::Synastry,
        };
        let orb = self.orb_for(mode);
        let other = second.unwrap_or(first);

        let mut matches = Vec::new();
        for (body1, body2) in candidate_pairs(first, second) {
            let (Some(p1), Some(p2)) = (first.get(&body1), other.get(&body2)) else {
                continue;
            };
            let diff = circular_diff(p1.longitude, p2.longitude);

            // Each angle is tested on its own; overlapping orbs may yield several matches.
            for definition in ASPECT_TABLE.iter() {
                let deviation = (diff - f64::from(definition.angle)).abs();
                if deviation <= orb {
                    matches.push(AspectMatch::new(definition, orb, deviation, body1, body2));
                }
            }
        }

        matches.sort_by(compare_matches);
        matches
    }
}

fn compare_matches(a: &AspectMatch, b: &AspectMatch) -> Ordering {
    a.angle
        .cmp(&b.angle)
        .then_with(|| a.body1.name().cmp(b.body1.name()))
        .then_with(|| a.body2.name().cmp(b.body2.name()))
}
