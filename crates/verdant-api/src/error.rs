use thiserror::Error;

/// Top-level error type for the `verdant-api` crate.
///
/// Exactly two failure kinds exist at this boundary: the request never
/// completed (transport), or the backend answered with a well-formed
/// envelope carrying `success: false` (backend). `verdant-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout,
    /// unreadable body).
    #[error("Failed to connect to backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body was not a well-formed envelope. Carries the raw
    /// body for debugging.
    #[error("Failed to connect to backend: invalid response: {message}")]
    Deserialization { message: String, body: String },

    // ── Backend ─────────────────────────────────────────────────────
    /// A well-formed envelope with `success: false`. The message is the
    /// backend-supplied `error` string, or a per-operation fallback when
    /// the envelope carries none.
    #[error("{message}")]
    Backend { message: String },
}

impl Error {
    /// Returns `true` if the request itself failed to complete --
    /// connectivity problems the next poll tick may resolve.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Deserialization { .. })
    }

    /// Returns `true` if the backend rejected the operation through the
    /// envelope (`success: false`).
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// Returns `true` if this was a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}
