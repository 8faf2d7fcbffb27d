//! Session token issuance and verification.
//!
//! Tokens are self-contained: `timestamp.nonce.signature`, all hex, signed
//! with HMAC-SHA256 so no server-side session table is needed. Verification
//! uses constant-time comparison to prevent timing attacks.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::{MAX_TOKEN_LENGTH, NONCE_LENGTH, PLACEHOLDER_SECRET};

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies self-signed session tokens.
///
/// A token is the string `timestamp.nonce.signature` where:
/// - `timestamp` is milliseconds since the Unix epoch in lowercase hex
///   (entropy only, not an expiry mechanism),
/// - `nonce` is 32 cryptographically random bytes, hex-encoded,
/// - `signature` is the hex-encoded HMAC-SHA256 of `timestamp.nonce`
///   under the server secret.
///
/// Tokens carry no expiry field; their effective lifetime is bounded by the
/// session cookie's max-age. Rotating the secret invalidates every
/// outstanding token at once; there is no selective revocation.
///
/// # Example
///
/// ```rust
/// use soloauth::TokenCodec;
///
/// let codec = TokenCodec::new(b"a-long-random-secret-from-the-environment");
/// let token = codec.issue();
/// assert!(codec.verify(&token));
/// assert!(!codec.verify("a.b.c"));
/// ```
#[derive(Clone)]
pub struct TokenCodec {
    secret: Vec<u8>,
}

impl TokenCodec {
    /// Create a codec with the given signing secret.
    ///
    /// An empty or placeholder secret is a deployment misconfiguration and
    /// is logged loudly; construction still succeeds because lockout is
    /// enforced by the credential check, not here.
    pub fn new(secret: &[u8]) -> Self {
        if secret.is_empty() {
            tracing::error!("signing secret is not configured; all sessions will be forgeable");
        } else if secret == PLACEHOLDER_SECRET.as_bytes() {
            tracing::error!("signing secret is still the placeholder value; set a real secret");
        }
        Self {
            secret: secret.to_vec(),
        }
    }

    /// Issue a new session token.
    ///
    /// Consumes 32 bytes from the thread-local CSPRNG. Nonce uniqueness is a
    /// property of the random source, not an explicit check.
    pub fn issue(&self) -> String {
        let timestamp = format!("{:x}", chrono::Utc::now().timestamp_millis());

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = hex::encode(nonce_bytes);

        let payload = format!("{}.{}", timestamp, nonce);
        let signature = hex::encode(self.compute_signature(&payload));

        format!("{}.{}", payload, signature)
    }

    /// Verify a session token.
    ///
    /// Returns `false` (never an error) for wrong segment count, oversized
    /// input, a non-hex signature segment, or a signature mismatch. The
    /// signature comparison is constant-time over the decoded bytes.
    pub fn verify(&self, token: &str) -> bool {
        // Length check to prevent DoS; well-formed tokens are ~140 bytes
        if token.len() > MAX_TOKEN_LENGTH {
            return false;
        }

        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return false;
        }
        let (timestamp, nonce, provided_hex) = (parts[0], parts[1], parts[2]);

        // Malformed hex fails closed
        let provided_sig = match hex::decode(provided_hex) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let payload = format!("{}.{}", timestamp, nonce);
        let expected_sig = self.compute_signature(&payload);

        // ct_eq over slices of unequal length resolves to false
        provided_sig.ct_eq(&expected_sig).into()
    }

    fn compute_signature(&self, payload: &str) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &[u8] = b"test-secret-key-32bytes-long!!!!";

    #[test]
    fn test_issue_and_verify() {
        let codec = TokenCodec::new(TEST_SECRET);
        let token = codec.issue();
        assert!(codec.verify(&token));
    }

    #[test]
    fn test_token_shape() {
        let codec = TokenCodec::new(TEST_SECRET);
        let token = codec.issue();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        // hex millisecond timestamp
        assert!(i64::from_str_radix(parts[0], 16).is_ok());
        // 32-byte nonce, 32-byte HMAC-SHA256 digest
        assert_eq!(parts[1].len(), NONCE_LENGTH * 2);
        assert_eq!(parts[2].len(), 64);
        assert!(token.len() <= MAX_TOKEN_LENGTH);
    }

    #[test]
    fn test_nonce_uniqueness() {
        let codec = TokenCodec::new(TEST_SECRET);
        assert_ne!(codec.issue(), codec.issue());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = TokenCodec::new(TEST_SECRET);
        let other = TokenCodec::new(b"another-secret-32-bytes-long!!!!");

        let token = codec.issue();
        assert!(!other.verify(&token));
    }

    #[test]
    fn test_structural_rejection() {
        let codec = TokenCodec::new(TEST_SECRET);

        assert!(!codec.verify(""));
        assert!(!codec.verify("a.b"));
        assert!(!codec.verify("a.b.c.d"));
        assert!(!codec.verify(&"a".repeat(MAX_TOKEN_LENGTH + 1)));
    }

    #[test]
    fn test_non_hex_signature_rejected() {
        let codec = TokenCodec::new(TEST_SECRET);

        // not hex at all, and odd-length hex
        assert!(!codec.verify("1a2b.deadbeef.zzzz"));
        assert!(!codec.verify("1a2b.deadbeef.abc"));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = TokenCodec::new(TEST_SECRET);
        let token = codec.issue();

        // Flip every signature hex character in turn; all must fail
        let sig_start = token.rfind('.').unwrap() + 1;
        for i in sig_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'0' { b'1' } else { b'0' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert!(!codec.verify(&tampered), "flip at {} accepted", i);
        }
    }

    #[test]
    fn test_tampered_nonce_rejected() {
        let codec = TokenCodec::new(TEST_SECRET);
        let token = codec.issue();

        let parts: Vec<&str> = token.split('.').collect();
        let mut nonce = parts[1].to_string();
        let swapped = if nonce.starts_with('0') { "1" } else { "0" };
        nonce.replace_range(0..1, swapped);

        let tampered = format!("{}.{}.{}", parts[0], nonce, parts[2]);
        assert!(!codec.verify(&tampered));
    }

    #[test]
    fn test_truncated_signature_rejected() {
        let codec = TokenCodec::new(TEST_SECRET);
        let token = codec.issue();

        // Shorter decoded signature: unequal lengths, still just false
        let truncated = &token[..token.len() - 2];
        assert!(!codec.verify(truncated));
    }
}
