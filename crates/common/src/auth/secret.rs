use std::fmt;

use super::error::AuthError;
use crate::crypto::{digest, DIGEST_HEX_LEN};

/// Number of characters of the secret that may appear in logs
const LOG_PREFIX_LEN: usize = 6;

/// The deployment's reference password hash, trimmed and lowercased.
///
/// Doubles as the HMAC key for tokens. `Debug` and `Display` only ever show a
/// short prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct ReferenceSecret(String);

impl ReferenceSecret {
    /// Normalize a configured hash. Blank input counts as not configured.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AuthError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AuthError::MissingConfiguration);
        }

        let secret = Self(normalized);
        if !secret.is_sha256_hex() {
            // still usable as a key, but no password will ever hash to it
            tracing::warn!(
                secret = %secret,
                "reference password hash is not a {}-character hex digest",
                DIGEST_HEX_LEN
            );
        }
        Ok(secret)
    }

    /// The reference secret for `password`.
    pub fn from_password(password: &str) -> Self {
        Self(digest(password.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The leading characters of the secret, safe to log.
    pub fn log_prefix(&self) -> &str {
        match self.0.char_indices().nth(LOG_PREFIX_LEN) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }

    fn is_sha256_hex(&self) -> bool {
        self.0.len() == DIGEST_HEX_LEN && self.0.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Debug for ReferenceSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceSecret({}...)", self.log_prefix())
    }
}

impl fmt::Display for ReferenceSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...", self.log_prefix())
    }
}
