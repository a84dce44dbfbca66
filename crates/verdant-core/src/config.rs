// ── Runtime controller configuration ──
//
// Describes *how* to reach the greenhouse backend and how the polling
// scheduler behaves. Never touches disk -- the CLI builds one from
// verdant-config and hands it in.

use std::time::Duration;

use url::Url;

/// Fixed period of the polling scheduler, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3_000;

/// Configuration for connecting to a greenhouse backend.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Backend root URL (e.g. `http://greenhouse.local:5000`); the `/api`
    /// prefix is appended per request.
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Polling period for the auto-refresh scheduler.
    pub poll_interval: Duration,
    /// Whether the polling scheduler starts armed.
    pub auto_refresh: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".parse().expect("default URL is valid"),
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            auto_refresh: true,
        }
    }
}
