//! Clap derive structures for the `verdant` CLI.
//!
//! Defines the command tree, global flags, and shared argument parsers.

use clap::{Args, Parser, Subcommand, ValueEnum};

use verdant_core::model::{Actuator, SwitchState};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// verdant -- greenhouse control panel for the command line
#[derive(Debug, Parser)]
#[command(
    name = "verdant",
    version,
    about = "Monitor and control a greenhouse backend from the command line",
    long_about = "Synchronizes sensor readings, actuator states, and the operation\n\
        mode from a greenhouse controller backend, and dispatches gated\n\
        write commands with a mandatory resync after every mutation.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend URL (overrides the config file)
    #[arg(long, short = 'u', env = "VERDANT_URL", global = true)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "VERDANT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "VERDANT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the latest sensor readings
    #[command(alias = "sens")]
    Sensors,

    /// Show the state of all actuators
    #[command(alias = "act")]
    Actuators,

    /// Show or toggle the operation mode
    Mode(ModeArgs),

    /// Switch an actuator on or off
    Set(SetArgs),

    /// Set an actuator's power level
    Power(PowerArgs),

    /// Poll continuously and print state as it changes
    Watch,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Per-Command Arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ModeArgs {
    #[command(subcommand)]
    pub action: Option<ModeAction>,
}

#[derive(Debug, Subcommand)]
pub enum ModeAction {
    /// Flip manual <-> autonomous
    Toggle,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Actuator name (heater, light, fan, water_pump)
    #[arg(value_parser = parse_actuator)]
    pub actuator: Actuator,

    /// Target state (on, off)
    #[arg(value_parser = parse_switch_state)]
    pub state: SwitchState,
}

#[derive(Debug, Args)]
pub struct PowerArgs {
    /// Actuator name (heater, light, fan, water_pump)
    #[arg(value_parser = parse_actuator)]
    pub actuator: Actuator,

    /// Drive strength in the backend's native duty-cycle domain
    #[arg(value_parser = clap::value_parser!(u16).range(0..=4095))]
    pub duty_cycle: u16,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

// ── Argument parsers ─────────────────────────────────────────────────

fn parse_actuator(s: &str) -> Result<Actuator, String> {
    s.parse()
        .map_err(|_| format!("unknown actuator '{s}' (expected heater, light, fan, water_pump)"))
}

fn parse_switch_state(s: &str) -> Result<SwitchState, String> {
    s.parse()
        .map_err(|_| format!("invalid state '{s}' (expected on or off)"))
}
