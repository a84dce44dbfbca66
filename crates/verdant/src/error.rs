//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use verdant_config::ConfigError;
use verdant_core::CoreError;
use verdant_core::model::OperationMode;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const GATE: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(verdant::connection),
        help(
            "Check that the greenhouse backend is running and reachable.\n\
             Set the URL with --url or VERDANT_URL."
        )
    )]
    Connection { message: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(verdant::backend))]
    Backend { message: String },

    // ── Gate ─────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(verdant::controls_disabled),
        help(
            "Actuator writes need manual mode and an idle connection.\n\
             Switch with: verdant mode toggle"
        )
    )]
    ControlsDisabled { message: String },

    // ── Conflict ─────────────────────────────────────────────────────
    #[error("Operation mode changed concurrently: expected {expected}, found {actual}")]
    #[diagnostic(
        code(verdant::mode_conflict),
        help("Another client changed the mode; re-run against the new state.")
    )]
    ModeConflict {
        expected: OperationMode,
        actual: OperationMode,
    },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("No {resource} data available yet")]
    #[diagnostic(
        code(verdant::no_data),
        help("The backend has not produced a successful read for this resource.")
    )]
    NoData { resource: &'static str },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(verdant::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(verdant::config))]
    Config(#[from] ConfigError),

    // ── IO / serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(verdant::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::ControlsDisabled { .. } => exit_code::GATE,
            Self::ModeConflict { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Connection { message } => Self::Connection { message },

            CoreError::Backend { message } => Self::Backend { message },

            gate @ (CoreError::AutonomousMode | CoreError::ModeUnknown | CoreError::Busy) => {
                Self::ControlsDisabled {
                    message: gate.to_string(),
                }
            }

            CoreError::ModeConflict { expected, actual } => {
                Self::ModeConflict { expected, actual }
            }

            CoreError::ControllerStopped => Self::Backend {
                message: "Controller is stopped".into(),
            },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}
