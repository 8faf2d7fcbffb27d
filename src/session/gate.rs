//! The session gate: cookie envelope plus token verification.

use crate::error::AuthResult;
use crate::session::{CookieAttributes, CookieStore};
use crate::token::TokenCodec;
use crate::SESSION_COOKIE_NAME;

/// Composes the token codec with a cookie store into the session lifecycle:
/// attach on login, read-and-verify on every request, detach on logout.
///
/// An absent cookie is simply "not authenticated", never an error. A cookie
/// that fails verification is treated the same way.
pub struct SessionGate<S: CookieStore> {
    store: S,
    codec: TokenCodec,
    cookie_name: String,
    attributes: CookieAttributes,
}

impl<S: CookieStore> SessionGate<S> {
    /// Create a gate over a cookie store.
    ///
    /// `production` selects whether the cookie is marked secure.
    pub fn new(store: S, codec: TokenCodec, production: bool) -> Self {
        Self {
            store,
            codec,
            cookie_name: SESSION_COOKIE_NAME.to_string(),
            attributes: CookieAttributes::session(production),
        }
    }

    /// Use a different cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Store a session token in the cookie envelope.
    pub fn attach(&self, token: &str) -> AuthResult<()> {
        self.store.set(&self.cookie_name, token, &self.attributes)
    }

    /// Remove the session cookie.
    pub fn detach(&self) -> AuthResult<()> {
        self.store.delete(&self.cookie_name)
    }

    /// The raw cookie value, if any.
    pub fn current_token(&self) -> AuthResult<Option<String>> {
        self.store.get(&self.cookie_name)
    }

    /// Whether the current request carries a valid session.
    ///
    /// A cookie store failure reads as unauthenticated rather than an
    /// error; access decisions fail closed.
    pub fn is_authenticated(&self) -> bool {
        match self.current_token() {
            Ok(Some(token)) => self.codec.verify(&token),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "cookie store failed during auth check");
                false
            }
        }
    }

    /// The codec this gate verifies with.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// The underlying cookie store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
