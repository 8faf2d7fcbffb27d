//! The authentication surface consumed by the route layer.
//!
//! Sequencing at the login endpoint: rate-limit check, then credential
//! check, then on success clear the counter, issue a token and attach it to
//! the cookie envelope. On failure the counter is bumped. Rate limiting is
//! a distinct outcome with a retry hint, not an authentication failure.

use serde::Serialize;

use crate::credentials::AdminCredentials;
use crate::error::{AuthError, AuthResult};
use crate::rate_limit::LoginRateLimiter;
use crate::session::{CookieStore, SessionGate};

/// Outcome of a login attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    /// Credentials matched; the token is already attached to the cookie
    /// envelope and is returned for callers that need it directly.
    Accepted { token: String },

    /// Credentials did not match (or the admin identity is unconfigured).
    InvalidCredentials,

    /// The client is over the failure threshold; no credential check ran.
    RateLimited { retry_after_seconds: u64 },
}

impl LoginOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, LoginOutcome::Accepted { .. })
    }
}

/// Composes the rate limiter, credential check, token codec and session
/// gate into the three operations the route layer needs.
///
/// # Example
///
/// ```rust
/// use soloauth::{AdminCredentials, AuthService, SessionGate, TokenCodec};
/// use soloauth::rate_limit::LoginRateLimiter;
/// use soloauth::session::MemoryCookieStore;
///
/// let codec = TokenCodec::new(b"a-long-random-secret-from-the-environment");
/// let gate = SessionGate::new(MemoryCookieStore::new(), codec, false);
/// let service = AuthService::new(
///     gate,
///     AdminCredentials::new(Some("admin"), Some("hunter2")),
///     LoginRateLimiter::default_config(),
/// );
///
/// let outcome = service.login("192.0.2.1", "admin", "hunter2").unwrap();
/// assert!(outcome.accepted());
/// assert!(service.is_authenticated());
/// ```
pub struct AuthService<S: CookieStore> {
    gate: SessionGate<S>,
    credentials: AdminCredentials,
    limiter: LoginRateLimiter,
}

impl<S: CookieStore> AuthService<S> {
    pub fn new(
        gate: SessionGate<S>,
        credentials: AdminCredentials,
        limiter: LoginRateLimiter,
    ) -> Self {
        Self {
            gate,
            credentials,
            limiter,
        }
    }

    /// Handle a login attempt from `client_id` (see
    /// [`client_identity`](crate::rate_limit::client_identity)).
    ///
    /// Errors only when the cookie store collaborator fails; credential and
    /// rate-limit conditions are outcomes, not errors.
    pub fn login(&self, client_id: &str, username: &str, password: &str) -> AuthResult<LoginOutcome> {
        match self.limiter.check(client_id) {
            Ok(()) => {}
            Err(AuthError::RateLimited(retry_after_seconds)) => {
                return Ok(LoginOutcome::RateLimited {
                    retry_after_seconds,
                });
            }
            Err(err) => return Err(err),
        }

        if !self.credentials.verify(username, password) {
            self.limiter.record_failure(client_id);
            return Ok(LoginOutcome::InvalidCredentials);
        }

        self.limiter.clear(client_id);
        let token = self.gate.codec().issue();
        self.gate.attach(&token)?;

        tracing::info!(client = %client_id, "admin login accepted");
        Ok(LoginOutcome::Accepted { token })
    }

    /// Detach the current session.
    pub fn logout(&self) -> AuthResult<()> {
        self.gate.detach()
    }

    /// Whether the current request carries a valid session.
    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    /// The session gate, for direct cookie access.
    pub fn gate(&self) -> &SessionGate<S> {
        &self.gate
    }

    /// The rate limiter, shared with any other endpoint that wants it.
    pub fn limiter(&self) -> &LoginRateLimiter {
        &self.limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::RateLimiterConfig;
    use crate::session::{CookieAttributes, MemoryCookieStore};
    use crate::token::TokenCodec;

    /// Cookie store whose every operation fails, standing in for a broken
    /// framework jar.
    struct FailingStore;

    impl CookieStore for FailingStore {
        fn set(&self, _: &str, _: &str, _: &CookieAttributes) -> AuthResult<()> {
            Err(AuthError::CookieStore("jar unavailable".to_string()))
        }

        fn get(&self, _: &str) -> AuthResult<Option<String>> {
            Err(AuthError::CookieStore("jar unavailable".to_string()))
        }

        fn delete(&self, _: &str) -> AuthResult<()> {
            Err(AuthError::CookieStore("jar unavailable".to_string()))
        }
    }

    fn service() -> AuthService<MemoryCookieStore> {
        service_with_limiter(LoginRateLimiter::default_config())
    }

    fn service_with_limiter(limiter: LoginRateLimiter) -> AuthService<MemoryCookieStore> {
        let codec = TokenCodec::new(b"test-secret-key-32bytes-long!!!!");
        let gate = SessionGate::new(MemoryCookieStore::new(), codec, false);
        let credentials = AdminCredentials::new(Some("admin"), Some("hunter2"));
        AuthService::new(gate, credentials, limiter)
    }

    #[test]
    fn test_login_lifecycle() {
        let service = service();
        assert!(!service.is_authenticated());

        let outcome = service.login("192.0.2.1", "admin", "hunter2").unwrap();
        let LoginOutcome::Accepted { token } = &outcome else {
            panic!("expected acceptance, got {:?}", outcome);
        };
        assert!(service.gate().codec().verify(token));
        assert!(service.is_authenticated());

        service.logout().unwrap();
        assert!(!service.is_authenticated());
    }

    #[test]
    fn test_bad_credentials_counted() {
        let service = service();

        let outcome = service.login("192.0.2.2", "admin", "wrong").unwrap();
        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
        assert_eq!(service.limiter().failure_count("192.0.2.2"), 1);
        assert!(!service.is_authenticated());
    }

    #[test]
    fn test_success_clears_failures() {
        let service = service();

        for _ in 0..3 {
            service.login("192.0.2.3", "admin", "wrong").unwrap();
        }
        assert_eq!(service.limiter().failure_count("192.0.2.3"), 3);

        let outcome = service.login("192.0.2.3", "admin", "hunter2").unwrap();
        assert!(outcome.accepted());
        assert_eq!(service.limiter().failure_count("192.0.2.3"), 0);
    }

    #[test]
    fn test_lockout_blocks_even_correct_password() {
        let service = service_with_limiter(LoginRateLimiter::new(
            RateLimiterConfig::default().with_max_failures(2),
        ));

        service.login("192.0.2.4", "admin", "wrong").unwrap();
        service.login("192.0.2.4", "admin", "wrong").unwrap();

        let outcome = service.login("192.0.2.4", "admin", "hunter2").unwrap();
        let LoginOutcome::RateLimited {
            retry_after_seconds,
        } = outcome
        else {
            panic!("expected rate limiting, got {:?}", outcome);
        };
        assert!(retry_after_seconds > 0);

        // No token attached, failure count untouched by the rejected attempt
        assert!(!service.is_authenticated());
        assert_eq!(service.limiter().failure_count("192.0.2.4"), 2);
    }

    #[test]
    fn test_lockout_scoped_to_client() {
        let service = service_with_limiter(LoginRateLimiter::new(
            RateLimiterConfig::default().with_max_failures(1),
        ));

        service.login("192.0.2.5", "admin", "wrong").unwrap();
        assert!(matches!(
            service.login("192.0.2.5", "admin", "hunter2").unwrap(),
            LoginOutcome::RateLimited { .. }
        ));

        assert!(service
            .login("192.0.2.6", "admin", "hunter2")
            .unwrap()
            .accepted());
    }

    #[test]
    fn test_unconfigured_admin_locks_out_logins() {
        let codec = TokenCodec::new(b"test-secret-key-32bytes-long!!!!");
        let gate = SessionGate::new(MemoryCookieStore::new(), codec, false);
        let service = AuthService::new(
            gate,
            AdminCredentials::new(None, None),
            LoginRateLimiter::default_config(),
        );

        let outcome = service.login("192.0.2.7", "admin", "hunter2").unwrap();
        assert!(matches!(outcome, LoginOutcome::InvalidCredentials));
    }

    #[test]
    fn test_cookie_store_failure_propagates_from_login() {
        let codec = TokenCodec::new(b"test-secret-key-32bytes-long!!!!");
        let gate = SessionGate::new(FailingStore, codec, false);
        let service = AuthService::new(
            gate,
            AdminCredentials::new(Some("admin"), Some("hunter2")),
            LoginRateLimiter::default_config(),
        );

        // Correct credentials, but the token cannot be attached
        let result = service.login("192.0.2.8", "admin", "hunter2");
        assert!(matches!(result, Err(AuthError::CookieStore(_))));

        // The broken jar also reads as unauthenticated, not as an error
        assert!(!service.is_authenticated());
        assert!(matches!(service.logout(), Err(AuthError::CookieStore(_))));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(LoginOutcome::RateLimited {
            retry_after_seconds: 899,
        })
        .unwrap();
        assert_eq!(json["outcome"], "rate_limited");
        assert_eq!(json["retry_after_seconds"], 899);
    }
}
