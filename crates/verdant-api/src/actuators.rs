// Actuator endpoints: bulk state read plus the two per-actuator writes.
//
// Writes return only an acknowledgement; the authoritative post-write
// state comes from the mandatory resync read issued by the caller.

use serde_json::json;
use tracing::debug;

use crate::client::GreenhouseClient;
use crate::error::Error;
use crate::model::{Actuator, ActuatorSet, SwitchState};

impl GreenhouseClient {
    /// Fetch the state of all four actuators.
    ///
    /// `GET /api/actuators`
    pub async fn actuators(&self) -> Result<ActuatorSet, Error> {
        let url = self.api_url("actuators");
        debug!("fetching actuators");
        self.get_data(url, "Failed to fetch actuators").await
    }

    /// Switch an actuator on or off.
    ///
    /// `POST /api/actuators/{name}` with `{"state": "on"|"off"}`
    pub async fn set_actuator_state(
        &self,
        actuator: Actuator,
        state: SwitchState,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("actuators/{actuator}"));
        debug!(%actuator, %state, "switching actuator");
        self.post_ack(
            url,
            &json!({ "state": state }),
            &format!("Failed to control {actuator}"),
        )
        .await
    }

    /// Set an actuator's drive strength.
    ///
    /// `POST /api/actuators/{name}` with `{"duty_cycle": 0..=4095}`.
    /// The duty cycle is constrained to the backend's domain by the input
    /// surface; it is not re-validated here.
    pub async fn set_actuator_power(
        &self,
        actuator: Actuator,
        duty_cycle: u16,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("actuators/{actuator}"));
        debug!(%actuator, duty_cycle, "setting actuator power");
        self.post_ack(
            url,
            &json!({ "duty_cycle": duty_cycle }),
            &format!("Failed to control {actuator}"),
        )
        .await
    }
}
