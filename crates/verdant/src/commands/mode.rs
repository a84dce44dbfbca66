// `verdant mode` -- show or toggle the operation mode.

use verdant_core::{CommandResult, Controller, ControllerConfig};

use crate::cli::{GlobalOpts, ModeAction, ModeArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    args: ModeArgs,
    config: ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.action {
        None => show(config, global).await,
        Some(ModeAction::Toggle) => toggle(config, global).await,
    }
}

async fn show(config: ControllerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let mode =
        Controller::oneshot(config, |ctrl| async move { Ok(ctrl.operation_mode()) }).await?;
    let mode = mode.ok_or(CliError::NoData {
        resource: "operation mode",
    })?;
    output::print_mode(mode, &global.output)
}

async fn toggle(config: ControllerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let result =
        Controller::oneshot(config, |ctrl| async move { ctrl.toggle_operation_mode().await })
            .await?;

    if let CommandResult::Mode(mode) = result {
        output::print_mode(mode, &global.output)?;
    }
    Ok(())
}
