// `verdant sensors` -- one-shot sensor read.

use verdant_core::{Controller, ControllerConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn show(config: ControllerConfig, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = Controller::oneshot(config, |ctrl| async move { Ok(ctrl.sensors()) }).await?;
    let snapshot = snapshot.ok_or(CliError::NoData { resource: "sensor" })?;
    output::print_sensors(&snapshot, &global.output)
}
