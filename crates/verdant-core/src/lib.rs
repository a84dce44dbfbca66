// verdant-core: state synchronization and command dispatch for the
// greenhouse controller backend.
//
// The Controller keeps a reactive local snapshot (SyncState) in step
// with the backend by polling, and routes gated write commands through
// a command-then-resync protocol so displayed state always reflects
// backend truth.

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod store;

pub use command::{Command, CommandResult};
pub use config::ControllerConfig;
pub use controller::Controller;
pub use error::CoreError;
pub use store::{SyncState, SyncStatus};

/// Domain model types, re-exported from the API crate.
pub use verdant_api::model;
