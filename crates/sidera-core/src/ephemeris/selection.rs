//! Ranked backend selection.
//!
//! Selection is a pure function over a candidate list. The process-wide default is
//! probed once through a `OnceLock` and read-only afterwards; tests and embedders
//! inject their own `SelectedBackend` instead.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use log::{debug, info, warn};

use crate::ephemeris::analytic::AnalyticBackend;
use crate::ephemeris::backend::EphemerisBackend;
use crate::ephemeris::fixed::FixedBackend;
use crate::ephemeris::types::{BackendKind, BackendPreference};

/// The backend one chart (or one process) is bound to.
#[derive(Clone)]
pub struct SelectedBackend {
    pub backend: Arc<dyn EphemerisBackend>,
    /// True only when the fixed fallback was chosen.
    pub degraded: bool,
}

impl SelectedBackend {
    pub fn new(backend: Arc<dyn EphemerisBackend>) -> Self {
        let degraded = backend.kind() == BackendKind::Fixed;
        Self { backend, degraded }
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }
}

impl std::fmt::Debug for SelectedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedBackend")
            .field("kind", &self.kind())
            .field("degraded", &self.degraded)
            .finish()
    }
}

/// Pick the first available candidate; with none, fall back to fixed positions.
pub fn select_backend(candidates: Vec<Arc<dyn EphemerisBackend>>) -> SelectedBackend {
    for candidate in candidates {
        if candidate.is_available() {
            info!("Using {} ephemeris backend", candidate.kind());
            return SelectedBackend::new(candidate);
        }
        debug!("{} ephemeris backend not available", candidate.kind());
    }
    warn!("No ephemeris backend available; charts will use fixed fallback positions");
    SelectedBackend::new(Arc::new(FixedBackend::new()))
}

/// Candidates in priority order for a preference.
pub fn ranked_candidates(
    preference: BackendPreference,
    ephemeris_path: Option<PathBuf>,
) -> Vec<Arc<dyn EphemerisBackend>> {
    let mut candidates: Vec<Arc<dyn EphemerisBackend>> = Vec::new();
    if matches!(preference, BackendPreference::Auto | BackendPreference::Precision) {
        if let Some(precision) = precision_backend(ephemeris_path) {
            candidates.push(precision);
        }
    }
    if preference != BackendPreference::Fixed {
        candidates.push(Arc::new(AnalyticBackend::new()));
    }
    candidates.push(Arc::new(FixedBackend::new()));
    candidates
}

#[cfg(feature = "swisseph")]
fn precision_backend(ephemeris_path: Option<PathBuf>) -> Option<Arc<dyn EphemerisBackend>> {
    match crate::ephemeris::swiss::SwissEphemerisBackend::new(ephemeris_path) {
        Ok(backend) => Some(Arc::new(backend)),
        Err(e) => {
            debug!("Skipping precision backend: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "swisseph"))]
fn precision_backend(_ephemeris_path: Option<PathBuf>) -> Option<Arc<dyn EphemerisBackend>> {
    debug!("Precision backend not compiled in (enable the `swisseph` feature)");
    None
}

static SHARED_BACKEND: OnceLock<SelectedBackend> = OnceLock::new();

/// Process-wide backend, probed once with the given preference. Later calls
/// return the first selection regardless of their arguments.
pub fn init_shared_backend(
    preference: BackendPreference,
    ephemeris_path: Option<PathBuf>,
) -> &'static SelectedBackend {
    SHARED_BACKEND.get_or_init(|| select_backend(ranked_candidates(preference, ephemeris_path)))
}

/// Process-wide backend with the default preference.
pub fn shared_backend() -> &'static SelectedBackend {
    init_shared_backend(BackendPreference::Auto, None)
}
