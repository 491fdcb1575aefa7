use thiserror::Error;

use crate::ephemeris::{BackendKind, EphemerisError};

/// Errors surfaced by chart and time-variant computations.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Rejected before any computation
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("No ephemeris backend could be initialized: {0}")]
    BackendUnavailable(String),
    /// A provider failed mid-chart; nothing partial is returned
    #[error("Calculation failed on the {backend} backend: {source}")]
    Computation {
        backend: BackendKind,
        #[source]
        source: EphemerisError,
    },
    #[error("Chart was computed with the {natal} backend but the engine uses {active}")]
    BackendMismatch {
        natal: BackendKind,
        active: BackendKind,
    },
    #[error("Batch computation cancelled")]
    Cancelled,
}

impl ChartError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
