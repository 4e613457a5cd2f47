//! Zabbix API client
//!
//! `ZabbixClient` owns the transport handle and the session token and routes
//! every call through [`ZabbixClient::dispatch`], which attaches the token,
//! sends the envelope and folds the reply into an [`ApiResult`].
//!
//! # Client Lifecycle
//!
//! 1. **Build**: [`ClientBuilder`](crate::ClientBuilder) or [`ZabbixClient::new`]
//! 2. **Login**: obtain a session token
//! 3. **Use**: raw calls or the resource helpers (`hostgroup_*`, `host_*`, ...)
//! 4. **Destroy**: release the transport; later calls fail with
//!    `Error::TransportClosed`
//!
//! # Cloning
//!
//! `ZabbixClient` is cheaply cloneable using `Arc` internally. All clones
//! share the same transport and session, so a login through one clone
//! authenticates all of them.
//!
//! # Thread Safety
//!
//! The client is `Send + Sync`. Calls block the calling thread only; any
//! number of threads may call concurrently.

use crate::session::Session;
use crate::transport::Transport;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use zbxrpc_core::{codec, ApiResult, EnvelopeBuilder, Error, ParamsKind, Result};

/// Methods whose params carry credentials
const SECRET_METHODS: &[&str] = &["user.login"];

/// Methods the API rejects when an `auth` member is present
const ANONYMOUS_METHODS: &[&str] = &["apiinfo.version", "user.login"];

/// Blocking client for the Zabbix JSON-RPC API
#[derive(Clone)]
pub struct ZabbixClient {
    pub(crate) transport: Arc<RwLock<Option<Arc<dyn Transport>>>>,
    pub(crate) session: Arc<Session>,
    pub(crate) metrics: Option<Arc<crate::ClientMetrics>>,
}

impl std::fmt::Debug for ZabbixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZabbixClient")
            .field("authenticated", &self.session.is_authenticated())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl ZabbixClient {
    /// Create a client for `url` with the default HTTP transport
    pub fn new(url: &str) -> Result<Self> {
        crate::ClientBuilder::new(url).build()
    }

    /// Create a client on top of an existing transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::from_parts(Arc::new(transport), None)
    }

    pub(crate) fn from_parts(
        transport: Arc<dyn Transport>,
        metrics: Option<Arc<crate::ClientMetrics>>,
    ) -> Self {
        Self {
            transport: Arc::new(RwLock::new(Some(transport))),
            session: Arc::new(Session::new()),
            metrics,
        }
    }

    /// Session state shared by all clones
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current session token
    pub fn auth_token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// True once [`destroy`](Self::destroy) has run
    pub fn is_closed(&self) -> bool {
        self.transport
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }

    fn current_transport(&self) -> Result<Arc<dyn Transport>> {
        self.transport
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(Error::TransportClosed)
    }

    /// Build, authenticate, send and normalize one call
    ///
    /// The session token is attached when the builder carries no `auth` of
    /// its own, except for `apiinfo.version` and `user.login`. Remote errors
    /// come back as a failed [`ApiResult`]; `Err` means no JSON-RPC response
    /// was obtained.
    #[tracing::instrument(
        skip(self, builder),
        fields(method = tracing::field::Empty, id = tracing::field::Empty)
    )]
    pub fn dispatch(&self, builder: EnvelopeBuilder) -> Result<ApiResult> {
        let start = Instant::now();
        let mut envelope = builder.build()?;
        if envelope.auth.is_none() && !ANONYMOUS_METHODS.contains(&envelope.method.as_str()) {
            envelope.auth = self.session.token();
        }

        let span = tracing::Span::current();
        span.record("method", envelope.method.as_str());
        if let Some(id) = envelope.id {
            span.record("id", id);
        }

        if SECRET_METHODS.contains(&envelope.method.as_str()) {
            tracing::debug!("Calling Zabbix API");
        } else {
            tracing::debug!(params = %envelope.params.to_value(), "Calling Zabbix API");
        }

        let outcome = self
            .current_transport()
            .and_then(|transport| {
                let body = codec::encode_envelope(&envelope)?;
                transport.send(&body, codec::CONTENT_TYPE)
            })
            .and_then(codec::decode_response);

        let duration = start.elapsed().as_secs_f64();
        let response = match outcome {
            Ok(response) => response,
            Err(error) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(&envelope.method, "error", duration);
                    m.record_error(error.kind());
                }
                tracing::error!(error = %error, "Call failed");
                return Err(error);
            }
        };

        let result = ApiResult::from_response(response);
        if result.is_success() {
            if let Some(ref m) = self.metrics {
                m.record_request(&envelope.method, "success", duration);
            }
            tracing::debug!(duration_secs = duration, "Call Zabbix API Success");
        } else {
            if let Some(ref m) = self.metrics {
                m.record_request(&envelope.method, "error", duration);
                m.record_error("remote");
            }
            tracing::warn!(
                code = result.code,
                message = %result.message,
                data = %result.data,
                "Zabbix API returned an error"
            );
        }

        Ok(result)
    }

    /// Call an arbitrary API method
    ///
    /// `params` may be an object, an array or `null`.
    ///
    /// ```rust,no_run
    /// use serde_json::json;
    /// use zbxrpc_client::ZabbixClient;
    ///
    /// # fn example() -> zbxrpc_core::Result<()> {
    /// let client = ZabbixClient::new("http://127.0.0.1/zabbix/api_jsonrpc.php")?;
    /// client.login("Admin", "zabbix")?;
    /// let _triggers = client.call("trigger.get", json!({"only_true": true}))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn call(&self, method: &str, params: serde_json::Value) -> Result<ApiResult> {
        self.dispatch(EnvelopeBuilder::new().method(method).params(params)?)
    }

    /// Remote API version; needs no session
    pub fn api_version(&self) -> Result<ApiResult> {
        let builder = EnvelopeBuilder::new()
            .method("apiinfo.version")
            .init_params(ParamsKind::Ordered)?;
        self.dispatch(builder)
    }

    /// Authenticate and store the session token
    ///
    /// Any previous token is discarded first, so a failed login always leaves
    /// the client unauthenticated. Returns `Ok(false)` when the API rejects
    /// the credentials.
    #[tracing::instrument(skip(self, password))]
    pub fn login(&self, user: &str, password: &str) -> Result<bool> {
        self.session.clear();

        let builder = EnvelopeBuilder::new()
            .method("user.login")
            .put("user", serde_json::Value::from(user))?
            .put("password", serde_json::Value::from(password))?;
        let result = self.dispatch(builder)?;

        let token = match (&result.data, result.is_success()) {
            (serde_json::Value::String(token), true) if !token.is_empty() => Some(token.clone()),
            _ => None,
        };

        let success = token.is_some();
        if let Some(ref m) = self.metrics {
            m.record_login(success);
        }

        match token {
            Some(token) => {
                self.session.set_token(token);
                tracing::info!("Login succeeded");
            }
            None => tracing::info!(code = result.code, message = %result.message, "Login failed"),
        }
        Ok(success)
    }

    /// End the session
    ///
    /// The token is cleared whatever the API answers. Without a session this
    /// is a local no-op returning success.
    pub fn logout(&self) -> Result<ApiResult> {
        let Some(token) = self.session.token() else {
            return Ok(ApiResult::success(serde_json::Value::Bool(true)));
        };

        let builder = EnvelopeBuilder::new()
            .method("user.logout")
            .auth(token)
            .init_params(ParamsKind::Ordered)?;
        let outcome = self.dispatch(builder);
        self.session.clear();
        tracing::info!("Logged out");
        outcome
    }

    /// Release the transport and forget the session
    ///
    /// Idempotent. Clones share the transport, so this closes all of them.
    pub fn destroy(&self) {
        let transport = self
            .transport
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        self.session.clear();

        if let Some(transport) = transport {
            transport.close();
            tracing::info!("Client destroyed");
        }
    }
}
