// Operation mode endpoints.

use serde_json::json;
use tracing::debug;

use crate::client::GreenhouseClient;
use crate::error::Error;
use crate::model::OperationMode;

impl GreenhouseClient {
    /// Fetch the current operation mode.
    ///
    /// `GET /api/operation_mode`
    pub async fn operation_mode(&self) -> Result<OperationMode, Error> {
        let url = self.api_url("operation_mode");
        debug!("fetching operation mode");
        self.get_mode(url, "Failed to fetch operation mode").await
    }

    /// Request a mode switch and return the mode the backend settled on.
    ///
    /// `POST /api/operation_mode` with `{"mode": "manual"|"autonomous"}`.
    /// The returned mode is authoritative -- callers adopt it rather than
    /// their requested target.
    pub async fn set_operation_mode(&self, mode: OperationMode) -> Result<OperationMode, Error> {
        let url = self.api_url("operation_mode");
        debug!(%mode, "switching operation mode");
        self.post_mode(
            url,
            &json!({ "mode": mode }),
            "Failed to change operation mode",
        )
        .await
    }
}
