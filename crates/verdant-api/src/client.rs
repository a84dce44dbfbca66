// Greenhouse backend HTTP client
//
// Wraps `reqwest::Client` with fixed-base URL construction and envelope
// unwrapping. All endpoint modules (sensors, actuators, mode) are
// implemented as inherent methods via separate files to keep this module
// focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{AckEnvelope, DataEnvelope, ModeEnvelope, OperationMode};
use crate::transport::TransportConfig;

/// Raw HTTP client for the greenhouse controller backend.
///
/// Handles the `{success, data|mode, error}` envelope and URL
/// construction under the fixed `/api` base path. All methods return
/// unwrapped payloads -- the envelope is decoded exactly once here and
/// callers never branch on its shape.
pub struct GreenhouseClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GreenhouseClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://greenhouse.local:5000`);
    /// the `/api` prefix is appended per request.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL under the fixed API base: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let full = format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        );
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a data endpoint and unwrap its `{success, data, error}` envelope.
    pub(crate) async fn get_data<T: DeserializeOwned>(
        &self,
        url: Url,
        fallback: &str,
    ) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_data(resp, fallback).await
    }

    /// GET the mode endpoint and unwrap its `{success, mode, error}` envelope.
    pub(crate) async fn get_mode(&self, url: Url, fallback: &str) -> Result<OperationMode, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_mode(resp, fallback).await
    }

    /// POST to the mode endpoint and unwrap the returned mode.
    pub(crate) async fn post_mode(
        &self,
        url: Url,
        body: &impl Serialize,
        fallback: &str,
    ) -> Result<OperationMode, Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_mode(resp, fallback).await
    }

    /// POST a write and unwrap the bare `{success, error}` acknowledgement.
    pub(crate) async fn post_ack(
        &self,
        url: Url,
        body: &impl Serialize,
        fallback: &str,
    ) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        let envelope: AckEnvelope = decode(resp).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(backend_error(envelope.error, fallback))
        }
    }
}

// ── Envelope decoding ────────────────────────────────────────────────

/// Read the body and decode it as `E`, attaching the raw body on failure.
async fn decode<E: DeserializeOwned>(resp: reqwest::Response) -> Result<E, Error> {
    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })
}

async fn parse_data<T: DeserializeOwned>(
    resp: reqwest::Response,
    fallback: &str,
) -> Result<T, Error> {
    let envelope: DataEnvelope<T> = decode(resp).await?;
    if envelope.success {
        envelope.data.ok_or_else(|| Error::Deserialization {
            message: "success envelope missing `data`".into(),
            body: String::new(),
        })
    } else {
        Err(backend_error(envelope.error, fallback))
    }
}

async fn parse_mode(resp: reqwest::Response, fallback: &str) -> Result<OperationMode, Error> {
    let envelope: ModeEnvelope = decode(resp).await?;
    if envelope.success {
        envelope.mode.ok_or_else(|| Error::Deserialization {
            message: "success envelope missing `mode`".into(),
            body: String::new(),
        })
    } else {
        Err(backend_error(envelope.error, fallback))
    }
}

/// Backend-supplied message verbatim, or the per-operation fallback.
fn backend_error(error: Option<String>, fallback: &str) -> Error {
    Error::Backend {
        message: error.unwrap_or_else(|| fallback.to_owned()),
    }
}
