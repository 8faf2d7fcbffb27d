//! Cookie store trait and cookie attribute types.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::AuthResult;
use crate::SESSION_COOKIE_MAX_AGE;

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// Attributes applied when the session cookie is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Not readable from client-side script
    pub http_only: bool,
    /// Only sent over HTTPS
    pub secure: bool,
    pub same_site: SameSite,
    /// Seconds until the browser discards the cookie
    pub max_age_seconds: u64,
    pub path: String,
}

impl CookieAttributes {
    /// The session cookie policy: http-only, secure outside development,
    /// same-site lax, 7-day max-age, root path.
    ///
    /// The max-age is the only bound on session lifetime; the token itself
    /// carries no expiry.
    pub fn session(production: bool) -> Self {
        Self {
            http_only: true,
            secure: production,
            same_site: SameSite::Lax,
            max_age_seconds: SESSION_COOKIE_MAX_AGE,
            path: "/".to_string(),
        }
    }
}

/// Trait for cookie storage backends.
///
/// Implement this over your web framework's request/response cookie jar.
/// Backend failures surface as [`AuthError::CookieStore`]; the gate does no
/// retries of its own.
///
/// [`AuthError::CookieStore`]: crate::AuthError::CookieStore
///
/// # Example
///
/// ```rust,ignore
/// use soloauth::session::{CookieStore, CookieAttributes};
/// use soloauth::AuthResult;
///
/// struct AxumJar { /* framework handle */ }
///
/// impl CookieStore for AxumJar {
///     fn set(&self, name: &str, value: &str, attrs: &CookieAttributes) -> AuthResult<()> {
///         // map attrs onto the framework's cookie builder
///         Ok(())
///     }
///     // ... get, delete
/// }
/// ```
pub trait CookieStore: Send + Sync {
    /// Set a cookie with the given attributes.
    fn set(&self, name: &str, value: &str, attributes: &CookieAttributes) -> AuthResult<()>;

    /// Get a cookie value, `None` if absent.
    fn get(&self, name: &str) -> AuthResult<Option<String>>;

    /// Delete a cookie. Deleting an absent cookie is not an error.
    fn delete(&self, name: &str) -> AuthResult<()>;
}

/// In-process cookie store for tests and demos.
///
/// Holds values in a `RwLock<HashMap>` and ignores attributes beyond
/// storing them alongside the value.
#[derive(Default)]
pub struct MemoryCookieStore {
    cookies: RwLock<HashMap<String, (String, CookieAttributes)>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes the cookie was last set with, for assertions.
    pub fn attributes(&self, name: &str) -> Option<CookieAttributes> {
        let cookies = self.cookies.read().unwrap();
        cookies.get(name).map(|(_, attrs)| attrs.clone())
    }
}

impl CookieStore for MemoryCookieStore {
    fn set(&self, name: &str, value: &str, attributes: &CookieAttributes) -> AuthResult<()> {
        let mut cookies = self.cookies.write().unwrap();
        cookies.insert(name.to_string(), (value.to_string(), attributes.clone()));
        Ok(())
    }

    fn get(&self, name: &str) -> AuthResult<Option<String>> {
        let cookies = self.cookies.read().unwrap();
        Ok(cookies.get(name).map(|(value, _)| value.clone()))
    }

    fn delete(&self, name: &str) -> AuthResult<()> {
        let mut cookies = self.cookies.write().unwrap();
        cookies.remove(name);
        Ok(())
    }
}
