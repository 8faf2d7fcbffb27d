//! Error types for the soloauth library.

use thiserror::Error;

/// Result type alias for soloauth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors surfaced to the route layer.
///
/// Malformed or forged tokens are never errors: verification resolves them
/// to `false`. Misconfiguration is logged and handled fail-closed rather
/// than raised. What remains is the rate-limit condition and failures of
/// the cookie store, the only fallible collaborator.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Too many failed login attempts from this client
    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    /// The cookie store collaborator failed
    #[error("Cookie store error: {0}")]
    CookieStore(String),
}

impl AuthError {
    /// Returns true if this error is due to rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AuthError::RateLimited(_))
    }

    /// Seconds the client should wait before retrying, if rate limited
    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            AuthError::RateLimited(secs) => Some(*secs),
            _ => None,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            AuthError::RateLimited(_) => 429,
            AuthError::CookieStore(_) => 500,
        }
    }
}
