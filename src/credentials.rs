//! Admin credential checking.
//!
//! The system has exactly one admin identity, configured out of band
//! (environment, secrets manager). There is no user table. Missing
//! configuration puts the checker into fail-closed mode: every login is
//! rejected until the deployment is fixed.

use subtle::ConstantTimeEq;

/// Checks candidate credentials against the configured admin identity.
///
/// The password comparison is constant-time to avoid leaking prefix or
/// length information through response timing. The username comparison is
/// ordinary equality; usernames are not secrets.
///
/// # Example
///
/// ```rust
/// use soloauth::AdminCredentials;
///
/// let creds = AdminCredentials::new(Some("admin"), Some("hunter2"));
/// assert!(creds.verify("admin", "hunter2"));
/// assert!(!creds.verify("admin", "wrong"));
///
/// // Unconfigured deployments fail closed
/// let unset = AdminCredentials::new(None, None);
/// assert!(!unset.verify("admin", "hunter2"));
/// ```
#[derive(Clone)]
pub struct AdminCredentials {
    username: Option<String>,
    password: Option<String>,
}

impl AdminCredentials {
    /// Create a checker from configured admin credentials.
    ///
    /// A missing or empty username or password is a deployment
    /// misconfiguration: it is logged at error severity and every
    /// subsequent check returns false.
    pub fn new(username: Option<&str>, password: Option<&str>) -> Self {
        let username = username.filter(|u| !u.is_empty()).map(str::to_string);
        let password = password.filter(|p| !p.is_empty()).map(str::to_string);

        if username.is_none() || password.is_none() {
            tracing::error!("admin credentials are not configured; all logins will be rejected");
        }

        Self { username, password }
    }

    /// Check a candidate username/password pair.
    ///
    /// Returns false when the pair does not match or when the admin
    /// identity is unconfigured. Never errs.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let (Some(expected_user), Some(expected_pass)) = (&self.username, &self.password) else {
            return false;
        };

        let user_ok = username == expected_user.as_str();
        let pass_ok: bool = password
            .as_bytes()
            .ct_eq(expected_pass.as_bytes())
            .into();

        user_ok && pass_ok
    }

    /// Whether the admin identity is fully configured.
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}
