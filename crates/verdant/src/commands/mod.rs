// Command handlers, one module per resource.

pub mod actuators;
pub mod mode;
pub mod sensors;
pub mod watch;

use verdant_core::ControllerConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    config: ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Sensors => sensors::show(config, global).await,
        Command::Actuators => actuators::show(config, global).await,
        Command::Mode(args) => mode::handle(args, config, global).await,
        Command::Set(args) => actuators::set_state(args, config, global).await,
        Command::Power(args) => actuators::set_power(args, config, global).await,
        Command::Watch => watch::run(config).await,
        // Handled before dispatch; needs no backend connection.
        Command::Completions(_) => Ok(()),
    }
}
