//! Fluent construction of request envelopes
//!
//! # Id allocation
//!
//! Envelopes built without an explicit id get one from a process-wide counter
//! that starts at 1 and is only ever incremented. Every builder in the process
//! shares it, whichever client created the builder, so two envelopes built
//! concurrently never carry the same allocated id.
//!
//! # Params variant lock
//!
//! The first call to [`init_params`](EnvelopeBuilder::init_params),
//! [`put`](EnvelopeBuilder::put), [`append`](EnvelopeBuilder::append) or
//! [`params`](EnvelopeBuilder::params) fixes the shape of the parameter
//! container. Later calls must agree with it.
//!
//! # Examples
//!
//! ```rust
//! use zbxrpc_core::{EnvelopeBuilder, Params, ParamsKind};
//! use serde_json::json;
//!
//! let envelope = EnvelopeBuilder::new()
//!     .method("hostgroup.create")
//!     .init_params(ParamsKind::Keyed)?
//!     .put("name", json!("linux servers"))?
//!     .build()?;
//!
//! assert_eq!(envelope.method, "hostgroup.create");
//! assert!(envelope.id.is_some());
//!
//! // An ordered builder refuses keyed mutation
//! let err = EnvelopeBuilder::new()
//!     .init_params(ParamsKind::Ordered)?
//!     .put("name", json!("x"));
//! assert!(err.is_err());
//! # Ok::<(), zbxrpc_core::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::types::{Envelope, Params, ParamsKind, JSONRPC_VERSION};
use std::sync::atomic::{AtomicI64, Ordering};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

/// Allocate the next request id
///
/// Atomic post-increment of the process-wide counter.
pub fn next_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Builder for [`Envelope`]
///
/// `build()` consumes the builder, so a builder yields exactly one envelope.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    jsonrpc: String,
    method: Option<String>,
    params: Params,
    auth: Option<String>,
    id: Option<i64>,
}

impl Default for EnvelopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeBuilder {
    /// Create a builder with no method, no params, no auth and no id
    pub fn new() -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: None,
            params: Params::None,
            auth: None,
            id: None,
        }
    }

    /// Override the protocol tag
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.jsonrpc = version.into();
        self
    }

    /// Set the remote method name
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Attach a session token explicitly
    ///
    /// Not needed in normal use: the client attaches its session token to
    /// every envelope that has none.
    pub fn auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Set an explicit id instead of allocating one
    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Initialize the parameter container with an empty instance of `kind`
    ///
    /// Re-initializing with the kind already held keeps the current contents.
    ///
    /// # Errors
    ///
    /// `Error::InvalidState` if the container already holds the other kind.
    pub fn init_params(mut self, kind: ParamsKind) -> Result<Self> {
        match self.params.kind() {
            None => self.params = Params::empty(kind),
            Some(current) if current == kind => {}
            Some(current) => {
                return Err(Error::InvalidState {
                    current: current.as_str(),
                    requested: kind.as_str(),
                })
            }
        }
        Ok(self)
    }

    /// Insert a key into keyed params
    ///
    /// An uninitialized container becomes keyed.
    ///
    /// # Errors
    ///
    /// `Error::WrongVariant` if the container is ordered.
    pub fn put(mut self, key: impl Into<String>, value: serde_json::Value) -> Result<Self> {
        if self.params.is_none() {
            self.params = Params::empty(ParamsKind::Keyed);
        }
        match &mut self.params {
            Params::Keyed(map) => {
                map.insert(key.into(), value);
                Ok(self)
            }
            other => Err(Error::WrongVariant {
                expected: ParamsKind::Keyed.as_str(),
                actual: other.kind_name(),
            }),
        }
    }

    /// Append a value to ordered params
    ///
    /// An uninitialized container becomes ordered.
    ///
    /// # Errors
    ///
    /// `Error::WrongVariant` if the container is keyed.
    pub fn append(mut self, value: serde_json::Value) -> Result<Self> {
        if self.params.is_none() {
            self.params = Params::empty(ParamsKind::Ordered);
        }
        match &mut self.params {
            Params::Ordered(list) => {
                list.push(value);
                Ok(self)
            }
            other => Err(Error::WrongVariant {
                expected: ParamsKind::Ordered.as_str(),
                actual: other.kind_name(),
            }),
        }
    }

    /// Fill params from an arbitrary JSON value
    ///
    /// Objects are merged into keyed params, arrays are appended to ordered
    /// params and `null` leaves the container untouched.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidParams` for strings, numbers and booleans
    /// - `Error::InvalidState` if the value's shape conflicts with the container
    pub fn params(self, value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(self),
            serde_json::Value::Object(map) => {
                let mut builder = self.init_params(ParamsKind::Keyed)?;
                if let Params::Keyed(existing) = &mut builder.params {
                    existing.extend(map);
                }
                Ok(builder)
            }
            serde_json::Value::Array(list) => {
                let mut builder = self.init_params(ParamsKind::Ordered)?;
                if let Params::Ordered(existing) = &mut builder.params {
                    existing.extend(list);
                }
                Ok(builder)
            }
            scalar => Err(Error::InvalidParams(format!(
                "params must be an object or an array, got {}",
                scalar
            ))),
        }
    }

    /// Kind currently held by the parameter container
    pub fn params_kind(&self) -> Option<ParamsKind> {
        self.params.kind()
    }

    /// Produce the envelope, allocating an id if none was set
    ///
    /// # Errors
    ///
    /// `Error::MissingMethod` if no non-empty method name was given.
    pub fn build(self) -> Result<Envelope> {
        let method = match self.method {
            Some(method) if !method.is_empty() => method,
            _ => return Err(Error::MissingMethod),
        };
        let id = self.id.unwrap_or_else(next_id);

        Ok(Envelope {
            jsonrpc: self.jsonrpc,
            method,
            params: self.params,
            auth: self.auth,
            id: Some(id),
        })
    }
}
