//! Session token holder
//!
//! The token is read by every dispatch and written only by login, logout and
//! destroy. Readers always see the latest completed write; a call racing an
//! in-flight login may go out with either the old or the new token.

use std::sync::RwLock;

/// Authentication state of one client
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    /// Create an unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if logged in
    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    pub(crate) fn set_token(&self, token: String) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }

    /// Forget the token; returns the previous one
    pub(crate) fn clear(&self) -> Option<String> {
        self.token.write().unwrap_or_else(|e| e.into_inner()).take()
    }
}
