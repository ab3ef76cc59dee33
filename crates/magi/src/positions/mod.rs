pub mod resolver;
pub mod types;

pub use resolver::{motion_delta, motion_probe, PositionResolver};
pub use types::{normalize_degrees, Position, PositionMap};
