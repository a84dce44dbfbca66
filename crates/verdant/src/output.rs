//! Output formatting: table or JSON.
//!
//! Tables use `tabled`; JSON serializes the model types via serde. The
//! `watch` command gets a compact one-line renderer.

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use verdant_core::SyncStatus;
use verdant_core::model::{ActuatorSet, OperationMode, SensorSnapshot};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Sensors ─────────────────────────────────────────────────────────

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "Reading")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn print_sensors(snapshot: &SensorSnapshot, format: &OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Table => {
            let rows = vec![
                SensorRow {
                    name: "Air temperature",
                    value: format!("{:.1} °C", snapshot.air_temperature),
                },
                SensorRow {
                    name: "Air humidity",
                    value: format!("{:.1} %", snapshot.air_humidity),
                },
                SensorRow {
                    name: "Light intensity",
                    value: format!("{:.0} lux", snapshot.light_intensity),
                },
                SensorRow {
                    name: "Soil humidity",
                    value: format!("{:.1} %", snapshot.soil_humidity),
                },
                SensorRow {
                    name: "Soil pH",
                    value: format!("{:.2}", snapshot.soil_ph),
                },
                SensorRow {
                    name: "Soil EC",
                    value: format!("{:.0} µS/cm", snapshot.soil_ec),
                },
                SensorRow {
                    name: "Soil temperature",
                    value: format!("{:.1} °C", snapshot.soil_temperature),
                },
                SensorRow {
                    name: "Water flow",
                    value: format!("{:.1} L/min", snapshot.water_flow),
                },
                SensorRow {
                    name: "Water amount",
                    value: format!("{:.1} L", snapshot.water_amount),
                },
                SensorRow {
                    name: "Voltage",
                    value: format!("{:.1} V", snapshot.voltage),
                },
                SensorRow {
                    name: "Current",
                    value: format!("{:.2} A", snapshot.current),
                },
                SensorRow {
                    name: "Power",
                    value: format!("{:.1} W", snapshot.power),
                },
                SensorRow {
                    name: "Energy",
                    value: format!("{:.1} Wh", snapshot.energy),
                },
                SensorRow {
                    name: "Frequency",
                    value: format!("{:.1} Hz", snapshot.frequency),
                },
            ];
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
    Ok(())
}

// ── Actuators ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ActuatorRow {
    #[tabled(rename = "Actuator")]
    name: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Duty cycle")]
    duty_cycle: u16,
}

pub fn print_actuators(set: &ActuatorSet, format: &OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(set)?),
        OutputFormat::Table => {
            let rows: Vec<ActuatorRow> = set
                .iter()
                .map(|(actuator, state)| ActuatorRow {
                    name: actuator.to_string(),
                    state: state.state.to_string(),
                    power: format!("{}%", state.percentage),
                    duty_cycle: state.duty_cycle,
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }
    Ok(())
}

// ── Operation mode ──────────────────────────────────────────────────

pub fn print_mode(mode: OperationMode, format: &OutputFormat) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "mode": mode }))?
            );
        }
        OutputFormat::Table => {
            match mode {
                OperationMode::Manual => {
                    println!("Operation mode: {}", "MANUAL".green().bold());
                    println!("Direct control of all actuators is enabled.");
                }
                OperationMode::Autonomous => {
                    println!("Operation mode: {}", "AUTONOMOUS".blue().bold());
                    println!("The backend control loop manages the climate; actuator controls are disabled.");
                }
            }
        }
    }
    Ok(())
}

// ── Watch ───────────────────────────────────────────────────────────

/// One compact line per settled poll for `verdant watch`.
pub fn watch_line(
    status: &SyncStatus,
    mode: Option<OperationMode>,
    actuators: Option<&ActuatorSet>,
) -> String {
    let stamp = status
        .last_update
        .map_or_else(|| "--:--:--".to_owned(), |t| t.format("%H:%M:%S").to_string());
    let mode_str = mode.map_or_else(|| "unknown".to_owned(), |m| m.to_string());

    let mut line = format!("{stamp}  mode={mode_str}");
    if let Some(set) = actuators {
        for (actuator, state) in set.iter() {
            line.push_str(&format!("  {actuator}={}({}%)", state.state, state.percentage));
        }
    }
    if let Some(ref error) = status.error {
        line.push_str(&format!("  error: {}", error.red()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_core::model::{ActuatorState, SwitchState};

    #[test]
    fn watch_line_shows_mode_and_actuators() {
        let state = ActuatorState {
            state: SwitchState::On,
            percentage: 50,
            duty_cycle: 2048,
        };
        let set = ActuatorSet {
            heater: state,
            light: state,
            fan: state,
            water_pump: state,
        };
        let status = SyncStatus::default();

        let line = watch_line(&status, Some(OperationMode::Manual), Some(&set));
        assert!(line.contains("mode=manual"));
        assert!(line.contains("heater=on(50%)"));
        assert!(line.contains("water_pump=on(50%)"));
        assert!(line.starts_with("--:--:--"));
    }

    #[test]
    fn watch_line_without_data_reads_unknown() {
        let status = SyncStatus::default();
        let line = watch_line(&status, None, None);
        assert!(line.contains("mode=unknown"));
    }
}
