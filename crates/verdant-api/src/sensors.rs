// Sensor read endpoint.

use tracing::debug;

use crate::client::GreenhouseClient;
use crate::error::Error;
use crate::model::SensorSnapshot;

impl GreenhouseClient {
    /// Fetch the current snapshot of all sensor readings.
    ///
    /// `GET /api/sensors`
    pub async fn sensors(&self) -> Result<SensorSnapshot, Error> {
        let url = self.api_url("sensors");
        debug!("fetching sensors");
        self.get_data(url, "Failed to fetch sensors").await
    }
}
