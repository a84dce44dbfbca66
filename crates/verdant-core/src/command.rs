// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The
// controller's processor task serializes them, checks the mode gate,
// and performs the mandatory resync after each successful write.

use tokio::sync::oneshot;

use crate::error::CoreError;
use verdant_api::model::{Actuator, OperationMode, SwitchState};

/// A command envelope sent through the command channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// All write operations against the greenhouse backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch an actuator on or off.
    SetActuatorState {
        actuator: Actuator,
        state: SwitchState,
    },
    /// Set an actuator's drive strength. The duty cycle is constrained
    /// to [0, 4095] by the input surface, not re-validated here.
    SetActuatorPower { actuator: Actuator, duty_cycle: u16 },
    /// Flip manual <-> autonomous, re-reading the backend mode first.
    ToggleOperationMode,
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Actuator write acknowledged; the authoritative post-write state
    /// arrived through the actuator resync.
    Applied,
    /// Mode switch accepted; this is the mode the backend settled on.
    Mode(OperationMode),
}
