// `verdant watch` -- continuous polling with live status lines.
//
// Arms the controller's polling scheduler and prints one line per
// settled poll; sync failures show up as error annotations rather than
// stopping the watch.

use verdant_core::{Controller, ControllerConfig};

use crate::error::CliError;
use crate::output;

pub async fn run(config: ControllerConfig) -> Result<(), CliError> {
    let mut config = config;
    config.auto_refresh = true;

    let controller = Controller::new(config)?;
    // Initial sync failures become error lines; keep watching anyway.
    let _ = controller.start().await;

    let mut status_rx = controller.store().subscribe_status();
    println!("Watching greenhouse state (Ctrl-C to stop)...");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = status_rx.borrow_and_update().clone();
                if status.loading {
                    continue;
                }
                println!(
                    "{}",
                    output::watch_line(
                        &status,
                        controller.operation_mode(),
                        controller.actuators().as_ref(),
                    )
                );
            }
        }
    }

    controller.shutdown().await;
    Ok(())
}
