//! Per-client rate limiting for login attempts.
//!
//! This module protects the login endpoint against brute-force attacks by
//! tracking failed attempts per client identity. The counter is a
//! sliding-window-start: the whole window resets once the time since the
//! first failure exceeds the window length, giving O(1) space per client
//! instead of a log of individual attempts.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::error::{AuthError, AuthResult};
use crate::UNKNOWN_CLIENT;

/// Configuration for the login rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Failed attempts allowed before lockout (default: 10)
    pub max_failures: u32,

    /// Window measured from the first failure (default: 15 minutes)
    pub window: Duration,

    /// Maximum number of clients to track (prevents memory exhaustion)
    pub max_tracked_clients: usize,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_failures: 10,
            window: Duration::from_secs(15 * 60),
            max_tracked_clients: 10_000,
        }
    }
}

impl RateLimiterConfig {
    /// Set the number of failures allowed before lockout.
    pub fn with_max_failures(mut self, max: u32) -> Self {
        self.max_failures = max;
        self
    }

    /// Set the window length.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Set the maximum number of tracked clients.
    pub fn with_max_tracked(mut self, max: usize) -> Self {
        self.max_tracked_clients = max;
        self
    }
}

/// Failure tracking for a single client identity.
#[derive(Debug, Clone)]
struct FailureRecord {
    /// Failed attempts since the window started
    failures: u32,
    /// When the first failure of the current window happened
    window_start: Instant,
}

/// Login rate limiter keyed by client identity.
///
/// Thread-safe; clones share the same state. State lives only in process
/// memory, so a restart clears all counters.
///
/// # Example
///
/// ```rust
/// use soloauth::rate_limit::{LoginRateLimiter, RateLimiterConfig};
///
/// let limiter = LoginRateLimiter::new(RateLimiterConfig::default());
///
/// let client = "192.0.2.7";
/// if limiter.check(client).is_ok() {
///     // run the credential check; on failure:
///     limiter.record_failure(client);
/// }
/// ```
pub struct LoginRateLimiter {
    config: RateLimiterConfig,
    records: Arc<RwLock<HashMap<String, FailureRecord>>>,
}

impl LoginRateLimiter {
    /// Create a rate limiter with the given configuration.
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a rate limiter with the default configuration.
    pub fn default_config() -> Self {
        Self::new(RateLimiterConfig::default())
    }

    /// Check whether a client may attempt a login.
    ///
    /// Returns `Ok(())` if allowed. Returns `Err(AuthError::RateLimited)`
    /// with the whole seconds remaining in the window (rounded up) while the
    /// client is over the failure threshold. An expired record is removed
    /// here, so the next failure starts a fresh window.
    pub fn check(&self, client: &str) -> AuthResult<()> {
        self.check_at(client, Instant::now())
    }

    /// Record a failed login attempt for a client.
    ///
    /// Creates a record with count 1, or increments in place preserving the
    /// window start. Enforcement is the caller's job via [`check`]; this
    /// only counts.
    ///
    /// [`check`]: LoginRateLimiter::check
    pub fn record_failure(&self, client: &str) {
        self.record_failure_at(client, Instant::now());
    }

    /// Remove all rate-limit state for a client (successful login).
    pub fn clear(&self, client: &str) {
        let mut records = self.records.write().unwrap();
        records.remove(client);
    }

    /// Number of failures currently recorded for a client.
    pub fn failure_count(&self, client: &str) -> u32 {
        let records = self.records.read().unwrap();
        records.get(client).map(|r| r.failures).unwrap_or(0)
    }

    /// Current number of tracked clients.
    pub fn tracked_count(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// `check` against an explicit clock, for deterministic window tests.
    pub(crate) fn check_at(&self, client: &str, now: Instant) -> AuthResult<()> {
        // Write lock: an expired record is dropped on the spot, and the
        // check-then-decide sequence must not interleave with increments.
        let mut records = self.records.write().unwrap();

        let Some(record) = records.get(client) else {
            return Ok(());
        };
        let failures = record.failures;

        let elapsed = now.saturating_duration_since(record.window_start);
        if elapsed > self.config.window {
            records.remove(client);
            return Ok(());
        }

        if failures >= self.config.max_failures {
            let remaining = self.config.window - elapsed;
            tracing::warn!(
                client = %client,
                failures,
                retry_after = remaining.as_secs(),
                "login rate limit exceeded"
            );
            return Err(AuthError::RateLimited(ceil_secs(remaining)));
        }

        Ok(())
    }

    /// `record_failure` against an explicit clock.
    pub(crate) fn record_failure_at(&self, client: &str, now: Instant) {
        let mut records = self.records.write().unwrap();

        // Sweep expired records if at capacity
        if records.len() >= self.config.max_tracked_clients && !records.contains_key(client) {
            let window = self.config.window;
            records.retain(|_, r| now.saturating_duration_since(r.window_start) <= window);
        }

        let in_window = records
            .get(client)
            .map(|r| now.saturating_duration_since(r.window_start) <= self.config.window)
            .unwrap_or(false);

        if in_window {
            if let Some(record) = records.get_mut(client) {
                record.failures += 1;
            }
        } else {
            // First failure, or a failure after window expiry: new window
            records.insert(
                client.to_string(),
                FailureRecord {
                    failures: 1,
                    window_start: now,
                },
            );
        }
    }
}

impl Clone for LoginRateLimiter {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            records: Arc::clone(&self.records),
        }
    }
}

/// Derive a client identity from proxy forwarding headers.
///
/// Takes the first entry of `X-Forwarded-For` (trimmed), then `X-Real-IP`,
/// then the literal `"unknown"`. Clients with no forwarding headers all
/// share the `"unknown"` bucket on purpose: a shared budget beats an
/// unlimited one for anonymous traffic.
pub fn client_identity(forwarded_for: Option<&str>, real_ip: Option<&str>) -> String {
    if let Some(forwarded) = forwarded_for {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    match real_ip {
        Some(ip) if !ip.is_empty() => ip.to_string(),
        _ => UNKNOWN_CLIENT.to_string(),
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}
