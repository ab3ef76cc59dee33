//! Process-wide ephemeris setup.
//!
//! `Ephemerides::init` is the single startup step that brings both sources up.
//! Its outcome is kept per backend so a failed minor-body source degrades
//! Chiron instead of taking the whole engine down.

use crate::bodies::{BackendKind, Body};
use crate::ephemeris::adapter::{EphemerisAdapter, MinorBodyAdapter, SwissEphemerisAdapter};
use crate::ephemeris::types::EphemerisSettings;
use serde::Serialize;
use std::env;
use std::fmt;
use std::sync::Arc;

/// Outcome of initialising one backend
#[derive(Clone)]
pub enum BackendState {
    Ready(Arc<dyn EphemerisAdapter>),
    Unavailable { reason: String },
}

impl BackendState {
    pub fn is_ready(&self) -> bool {
        matches!(self, BackendState::Ready(_))
    }
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendState::Ready(adapter) => f.debug_tuple("Ready").field(&adapter.name()).finish(),
            BackendState::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Serializable view of a backend, for health reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendStatus {
    pub backend: BackendKind,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Ephemerides {
    classical: BackendState,
    minor_body: BackendState,
}

impl Ephemerides {
    /// Initialise both Swiss Ephemeris backends. Never fails as a whole.
    pub fn init(settings: &EphemerisSettings) -> Self {
        if settings.path.is_dir() {
            // Read by the C library the first time it opens a data file.
            env::set_var("SE_EPHE_PATH", &settings.path);
        }

        let classical = match SwissEphemerisAdapter::new(&settings.path, settings.frame) {
            Ok(adapter) => BackendState::Ready(Arc::new(adapter)),
            Err(e) => BackendState::Unavailable {
                reason: e.to_string(),
            },
        };
        let minor_body = match MinorBodyAdapter::new(&settings.path, settings.frame) {
            Ok(adapter) => {
                log::info!(
                    "Minor-body ephemeris loaded from {}",
                    adapter.asteroid_file().display()
                );
                BackendState::Ready(Arc::new(adapter))
            }
            Err(e) => BackendState::Unavailable {
                reason: e.to_string(),
            },
        };

        let ephemerides = Self::from_parts(classical, minor_body);
        ephemerides.log_status();
        ephemerides
    }

    pub fn from_parts(classical: BackendState, minor_body: BackendState) -> Self {
        Self {
            classical,
            minor_body,
        }
    }

    pub fn state(&self, kind: BackendKind) -> &BackendState {
        match kind {
            BackendKind::Classical => &self.classical,
            BackendKind::MinorBody => &self.minor_body,
        }
    }

    pub fn state_for(&self, body: Body) -> &BackendState {
        self.state(body.backend())
    }

    pub fn is_ready(&self, kind: BackendKind) -> bool {
        self.state(kind).is_ready()
    }

    pub fn status(&self) -> Vec<BackendStatus> {
        [BackendKind::Classical, BackendKind::MinorBody]
            .into_iter()
            .map(|kind| match self.state(kind) {
                BackendState::Ready(_) => BackendStatus {
                    backend: kind,
                    ready: true,
                    reason: None,
                },
                BackendState::Unavailable { reason } => BackendStatus {
                    backend: kind,
                    ready: false,
                    reason: Some(reason.clone()),
                },
            })
            .collect()
    }

    fn log_status(&self) {
        for status in self.status() {
            match status.reason {
                None => log::info!("{} ephemeris ready", status.backend),
                Some(reason) => log::warn!(
                    "{} ephemeris unavailable, its bodies will read 0°: {}",
                    status.backend,
                    reason
                ),
            }
        }
    }
}
