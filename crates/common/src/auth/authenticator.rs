use std::sync::Arc;
use std::time::Duration;

use super::clock::{Clock, SystemClock};
use super::error::AuthError;
use super::secret::ReferenceSecret;
use crate::crypto::{constant_time_eq, Token};

/// Checks bearer tokens presented to protected endpoints.
#[derive(Debug, Clone)]
pub struct TokenAuthenticator {
    secret: Option<ReferenceSecret>,
    max_age: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl TokenAuthenticator {
    /// An authenticator with no expiry: tokens live as long as the secret.
    pub fn new(secret: Option<ReferenceSecret>) -> Self {
        Self {
            secret,
            max_age: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Reject tokens issued more than `max_age` away from now, in either direction.
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Whether `token` is authentic (and fresh, if a maximum age is set).
    ///
    /// Total over all inputs: absent, malformed or forged tokens are `false`.
    pub fn verify(&self, token: Option<&str>) -> bool {
        let (Some(secret), Some(raw)) = (self.secret.as_ref(), token) else {
            return false;
        };
        let Ok(token) = Token::parse(raw) else {
            return false;
        };

        let expected = Token::signature_for(token.issued_at(), secret.as_bytes());
        let authentic = constant_time_eq(expected.as_bytes(), token.signature().as_bytes());
        // evaluated regardless of the signature outcome
        let fresh = self.is_fresh(token.issued_at());

        authentic && fresh
    }

    /// [`verify`](Self::verify) as a `Result`, for handlers that propagate with `?`.
    pub fn authorize(&self, token: Option<&str>) -> Result<(), AuthError> {
        if self.verify(token) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    fn is_fresh(&self, issued_at: u64) -> bool {
        let Some(max_age) = self.max_age else {
            return true;
        };
        let max_age_ms = u64::try_from(max_age.as_millis()).unwrap_or(u64::MAX);
        let now = self.clock.now_millis();
        now.abs_diff(issued_at) <= max_age_ms
    }
}
