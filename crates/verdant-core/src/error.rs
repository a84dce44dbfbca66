// ── Core error types ──
//
// User-facing errors from verdant-core. Consumers never see reqwest or
// serde failures directly; the `From<verdant_api::Error>` impl folds
// transport-layer errors into the two message-carrying variants whose
// Display strings are exactly what the error banner shows.

use thiserror::Error;

use verdant_api::model::OperationMode;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Sync/dispatch failures (banner text) ─────────────────────────
    /// The request never completed. The message already carries the
    /// fixed connectivity prefix from the transport layer.
    #[error("{message}")]
    Connection { message: String },

    /// The backend answered `success: false`; message is verbatim (or
    /// the per-operation fallback).
    #[error("{message}")]
    Backend { message: String },

    // ── Gate rejections (no request was issued) ──────────────────────
    #[error("Actuator controls are disabled in autonomous mode")]
    AutonomousMode,

    #[error("Operation mode is not known yet")]
    ModeUnknown,

    #[error("Controls are locked while a request is in flight")]
    Busy,

    // ── Conflicts ────────────────────────────────────────────────────
    /// The mode changed through another client between our last sync and
    /// the toggle attempt; the store now holds `actual`.
    #[error("Operation mode changed concurrently: expected {expected}, found {actual}")]
    ModeConflict {
        expected: OperationMode,
        actual: OperationMode,
    },

    // ── Lifecycle / configuration ────────────────────────────────────
    #[error("Controller is stopped")]
    ControllerStopped,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if this rejection came from the mode gate, meaning
    /// no request was ever issued to the backend.
    pub fn is_gate_rejection(&self) -> bool {
        matches!(self, Self::AutonomousMode | Self::ModeUnknown | Self::Busy)
    }

    /// Returns `true` for connectivity problems the next poll may resolve.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<verdant_api::Error> for CoreError {
    fn from(err: verdant_api::Error) -> Self {
        match err {
            verdant_api::Error::Backend { message } => Self::Backend { message },
            verdant_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            other => Self::Connection {
                message: other.to_string(),
            },
        }
    }
}
