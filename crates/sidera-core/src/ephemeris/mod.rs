pub mod analytic;
pub mod backend;
pub mod fixed;
pub mod selection;
#[cfg(feature = "swisseph")]
pub mod swiss;
pub mod time;
pub mod types;

pub use analytic::AnalyticBackend;
pub use backend::{EphemerisBackend, EphemerisError};
pub use fixed::FixedBackend;
pub use selection::{
    init_shared_backend, ranked_candidates, select_backend, shared_backend, SelectedBackend,
};
#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemerisBackend;
pub use types::{
    BackendKind, BackendPreference, Body, Capabilities, CelestialPosition, GeoLocation,
};
