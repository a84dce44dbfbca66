// `verdant actuators` / `verdant set` / `verdant power`.
//
// Writes go through the controller's command-then-resync protocol, so
// the state printed afterwards is the backend's authoritative answer,
// including any clamping it applied.

use verdant_core::model::percentage_for;
use verdant_core::{Controller, ControllerConfig};

use crate::cli::{GlobalOpts, OutputFormat, PowerArgs, SetArgs};
use crate::error::CliError;
use crate::output;

pub async fn show(config: ControllerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let set = Controller::oneshot(config, |ctrl| async move { Ok(ctrl.actuators()) }).await?;
    let set = set.ok_or(CliError::NoData { resource: "actuator" })?;
    output::print_actuators(&set, &global.output)
}

pub async fn set_state(
    args: SetArgs,
    config: ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let SetArgs { actuator, state } = args;

    let set = Controller::oneshot(config, |ctrl| async move {
        ctrl.set_actuator_state(actuator, state).await?;
        Ok(ctrl.actuators())
    })
    .await?;

    if let Some(set) = set {
        output::print_actuators(&set, &global.output)?;
    }
    Ok(())
}

pub async fn set_power(
    args: PowerArgs,
    config: ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let PowerArgs {
        actuator,
        duty_cycle,
    } = args;

    // Interim label only -- the table below shows the backend's answer.
    if matches!(global.output, OutputFormat::Table) {
        println!(
            "Setting {actuator} to {}% (duty cycle {duty_cycle})...",
            percentage_for(duty_cycle)
        );
    }

    let set = Controller::oneshot(config, |ctrl| async move {
        ctrl.set_actuator_power(actuator, duty_cycle).await?;
        Ok(ctrl.actuators())
    })
    .await?;

    if let Some(set) = set {
        output::print_actuators(&set, &global.output)?;
    }
    Ok(())
}
