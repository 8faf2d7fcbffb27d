//! # soloauth - Single-Admin Session Authentication
//!
//! The authentication core for a single-admin site backend: self-signed
//! session tokens, a login rate limiter, and a session gate over an
//! externalized cookie store.
//!
//! ## Features
//!
//! - **Token Codec**: stateless `timestamp.nonce.signature` tokens signed
//!   with HMAC-SHA256, verified with constant-time comparison
//! - **Login Rate Limiter**: per-client sliding-window-start failure
//!   counters (10 failures / 15 minutes by default)
//! - **Session Gate**: cookie-envelope management and a boolean
//!   authentication predicate for route handlers
//!
//! ## Quick Start
//!
//! ```rust
//! use soloauth::prelude::*;
//! use soloauth::session::MemoryCookieStore;
//!
//! let codec = TokenCodec::new(b"a-long-random-secret-from-the-environment");
//! let gate = SessionGate::new(MemoryCookieStore::new(), codec, false);
//! let service = AuthService::new(
//!     gate,
//!     AdminCredentials::new(Some("admin"), Some("hunter2")),
//!     LoginRateLimiter::default_config(),
//! );
//!
//! match service.login("203.0.113.9", "admin", "hunter2").unwrap() {
//!     LoginOutcome::Accepted { .. } => assert!(service.is_authenticated()),
//!     other => panic!("login refused: {:?}", other),
//! }
//! ```
//!
//! There is no server-side session table: a token proves itself by its
//! signature. The flip side is that revoking sessions means rotating the
//! signing secret, which invalidates every outstanding token at once.

pub mod credentials;
pub mod error;
pub mod rate_limit;
pub mod service;
pub mod session;
pub mod token;

// Re-exports for convenience
pub use credentials::AdminCredentials;
pub use error::{AuthError, AuthResult};
pub use rate_limit::{client_identity, LoginRateLimiter, RateLimiterConfig};
pub use service::{AuthService, LoginOutcome};
pub use session::{CookieAttributes, CookieStore, SessionGate};
pub use token::TokenCodec;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "soloauth_session";

/// Session cookie max-age in seconds (7 days); the sole bound on session
/// lifetime, since tokens carry no expiry
pub const SESSION_COOKIE_MAX_AGE: u64 = 7 * 24 * 60 * 60;

/// Nonce length in bytes before hex encoding
pub const NONCE_LENGTH: usize = 32;

/// Maximum token length accepted by verification (well-formed tokens are
/// ~140 bytes)
pub const MAX_TOKEN_LENGTH: usize = 256;

/// Shared bucket identity for clients with no forwarding headers
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Placeholder secret that must be replaced in deployment
pub const PLACEHOLDER_SECRET: &str = "default-secret-change-me";

/// Prelude module for common imports
pub mod prelude {
    pub use crate::credentials::AdminCredentials;
    pub use crate::error::{AuthError, AuthResult};
    pub use crate::rate_limit::{client_identity, LoginRateLimiter, RateLimiterConfig};
    pub use crate::service::{AuthService, LoginOutcome};
    pub use crate::session::{CookieAttributes, CookieStore, SessionGate};
    pub use crate::token::TokenCodec;
}
