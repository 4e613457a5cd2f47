//! Transport contract and the default blocking HTTP implementation
//!
//! A [`Transport`] takes a serialized envelope and returns the parsed JSON
//! payload of the reply. It knows nothing about JSON-RPC semantics: a remote
//! `error` object is a perfectly good payload. Anything that prevents a
//! payload from being obtained is an `Err`.
//!
//! Transports are shared by every call made through one client, from any
//! number of threads, hence the `Send + Sync` bound.

use std::time::Duration;
use zbxrpc_core::{Error, Result};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = concat!("zbxrpc/", env!("CARGO_PKG_VERSION"));

/// Longest body excerpt kept in `Error::Http`
const MAX_ERROR_BODY: usize = 512;

/// Request/response exchange with the API endpoint
pub trait Transport: Send + Sync {
    /// POST `body` with the given content type and return the parsed reply
    fn send(&self, body: &str, content_type: &str) -> Result<serde_json::Value>;

    /// Release underlying resources
    ///
    /// Called once by [`ZabbixClient::destroy`](crate::ZabbixClient::destroy).
    fn close(&self) {}
}

/// Blocking HTTP transport backed by a `ureq` agent
///
/// The agent keeps a connection pool, so one `HttpTransport` should be reused
/// for all calls to the same endpoint.
///
/// # Status handling
///
/// - 2xx: body must parse as JSON, otherwise `Error::InvalidResponse`
/// - other status with a JSON body: the body is returned as the payload
/// - other status without a JSON body: `Error::Http`
/// - connection failures and timeouts: `Error::Transport`
pub struct HttpTransport {
    url: String,
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpTransport {
    /// Create a transport with default timeout and user agent
    pub fn new(url: &str) -> Result<Self> {
        Self::with_options(url, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a transport with explicit options
    ///
    /// # Errors
    ///
    /// `Error::InvalidUrl` if `url` does not parse or is not http(s).
    pub fn with_options(url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let url = validate_url(url)?;
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Ok(Self {
            url,
            agent,
            user_agent: user_agent.to_string(),
        })
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Transport for HttpTransport {
    fn send(&self, body: &str, content_type: &str) -> Result<serde_json::Value> {
        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", content_type)
            .set("User-Agent", &self.user_agent)
            .send_string(body);

        match response {
            Ok(response) => {
                let text = response.into_string()?;
                serde_json::from_str(&text)
                    .map_err(|e| Error::InvalidResponse(format!("body is not JSON: {}", e)))
            }
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                match serde_json::from_str::<serde_json::Value>(&text) {
                    Ok(payload) if payload.is_object() => {
                        tracing::debug!(status, "Non-2xx status carrying a JSON payload");
                        Ok(payload)
                    }
                    _ => Err(Error::Http {
                        status,
                        body: truncate(&text, MAX_ERROR_BODY),
                    }),
                }
            }
            Err(ureq::Error::Transport(e)) => Err(Error::Transport(e.to_string())),
        }
    }
}

/// Parse and normalize an endpoint URL
pub(crate) fn validate_url(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url.trim())
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        other => Err(Error::InvalidUrl(format!("unsupported scheme {}", other))),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
