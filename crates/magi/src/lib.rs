
pub mod bodies;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod positions;
pub mod aspects;
pub mod report;

pub use bodies::{BackendKind, Body};
pub use chart::Chart;
pub use error::MagiError;
pub use ephemeris::{
    BackendState, EphemerisAdapter, EphemerisError, EphemerisSettings, Ephemerides, Frame,
    GeoLocation,
};
pub use positions::{Position, PositionMap, PositionResolver};
pub use aspects::{AspectEngine, AspectMatch, ComparisonMode, Magnitude, OrbPolicy};
pub use report::{ChartReport, SynastryReport};
