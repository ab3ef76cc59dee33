pub mod calculator;
pub mod orbs;
pub mod types;

pub use calculator::{candidate_pairs, circular_diff, AspectEngine};
pub use orbs::OrbPolicy;
pub use types::{
    aspect_for_angle, AspectClass, AspectDefinition, AspectMatch, ComparisonMode, Magnitude,
    ASPECT_TABLE,
};
