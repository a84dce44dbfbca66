// Wire types for the greenhouse backend API.
//
// Every payload here is a full-replacement snapshot: the backend sends
// the complete value on each read and the client swaps it in wholesale.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Upper bound of the PWM duty-cycle domain the backend natively controls.
pub const DUTY_CYCLE_MAX: u16 = 4095;

/// Derived display percentage for a duty cycle.
///
/// The backend is authoritative for the `percentage` field it reports;
/// this helper exists only for interim labels before a resync lands.
pub fn percentage_for(duty_cycle: u16) -> u8 {
    (f64::from(duty_cycle) / f64::from(DUTY_CYCLE_MAX) * 100.0).round() as u8
}

// ── Sensors ─────────────────────────────────────────────────────────

/// One point-in-time reading of every sensor the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub air_temperature: f64,
    pub air_humidity: f64,
    pub light_intensity: f64,
    pub soil_humidity: f64,
    pub soil_ph: f64,
    pub soil_ec: f64,
    pub soil_temperature: f64,
    pub water_flow: f64,
    pub water_amount: f64,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub energy: f64,
    pub frequency: f64,
}

// ── Actuators ───────────────────────────────────────────────────────

/// The fixed set of controllable actuators.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Actuator {
    Heater,
    Light,
    Fan,
    WaterPump,
}

/// On/off state of an actuator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SwitchState {
    On,
    Off,
}

/// Backend-reported state of a single actuator.
///
/// Invariant (held by the backend): `percentage ==
/// round(duty_cycle / 4095 * 100)`. The client never recomputes the
/// displayed percentage -- see [`percentage_for`] for the interim helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorState {
    pub state: SwitchState,
    pub percentage: u8,
    pub duty_cycle: u16,
}

/// All four actuator states, always complete once a read has succeeded.
///
/// Modeled as named fields rather than a map so a response missing an
/// actuator fails to decode instead of silently dropping a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorSet {
    pub heater: ActuatorState,
    pub light: ActuatorState,
    pub fan: ActuatorState,
    pub water_pump: ActuatorState,
}

impl ActuatorSet {
    /// Look up one actuator's state.
    pub fn get(&self, actuator: Actuator) -> ActuatorState {
        match actuator {
            Actuator::Heater => self.heater,
            Actuator::Light => self.light,
            Actuator::Fan => self.fan,
            Actuator::WaterPump => self.water_pump,
        }
    }

    /// Iterate all actuators in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (Actuator, ActuatorState)> {
        [
            (Actuator::Heater, self.heater),
            (Actuator::Light, self.light),
            (Actuator::Fan, self.fan),
            (Actuator::WaterPump, self.water_pump),
        ]
        .into_iter()
    }
}

// ── Operation mode ──────────────────────────────────────────────────

/// Global control-ownership flag: `manual` grants direct user control of
/// actuators; `autonomous` means the backend's own control loop governs
/// them and user writes are rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperationMode {
    Manual,
    Autonomous,
}

impl OperationMode {
    /// The logical complement, used when toggling.
    pub fn toggled(self) -> Self {
        match self {
            Self::Manual => Self::Autonomous,
            Self::Autonomous => Self::Manual,
        }
    }
}

// ── Response envelopes ──────────────────────────────────────────────

/// `{success, data, error?}` envelope used by the data endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// `{success, mode, error?}` envelope used by the mode endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ModeEnvelope {
    pub success: bool,
    pub mode: Option<OperationMode>,
    pub error: Option<String>,
}

/// `{success, error?}` acknowledgement envelope used by actuator writes.
#[derive(Debug, Deserialize)]
pub(crate) struct AckEnvelope {
    pub success: bool,
    pub error: Option<String>,
}
