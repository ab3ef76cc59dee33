pub mod adapter;
pub mod registry;
pub mod types;

pub use adapter::{EphemerisAdapter, EphemerisError, MinorBodyAdapter, SwissEphemerisAdapter};
pub use registry::{BackendState, BackendStatus, Ephemerides};
pub use types::{EphemerisSettings, Frame, GeoLocation};
