// ── Mode gate ──
//
// Pure derivation of write-control availability from the last
// synchronized operation mode and the shared loading flag. The loading
// flag is global: one in-flight request of any kind disables every
// write control at once.

use verdant_api::model::OperationMode;

/// Whether the actuator write controls (on/off, power level) are enabled.
///
/// Requires the backend to be in manual mode and no request in flight.
pub fn actuator_controls_enabled(mode: Option<OperationMode>, loading: bool) -> bool {
    mode == Some(OperationMode::Manual) && !loading
}

/// Whether the mode-toggle control is enabled.
///
/// Requires the mode to be known (first sync completed) and no request
/// in flight; toggling works from either mode.
pub fn mode_toggle_enabled(mode: Option<OperationMode>, loading: bool) -> bool {
    mode.is_some() && !loading
}
