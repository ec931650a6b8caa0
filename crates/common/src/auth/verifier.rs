use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::error::AuthError;
use super::secret::ReferenceSecret;
use crate::crypto::{constant_time_eq, digest, Token};

/// Exchanges the access password for a bearer token.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    secret: Option<ReferenceSecret>,
    clock: Arc<dyn Clock>,
}

impl CredentialVerifier {
    pub fn new(secret: Option<ReferenceSecret>) -> Self {
        Self {
            secret,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Hash `password`, compare it to the reference secret in constant time, and
    /// mint a token stamped with the current time on a match.
    ///
    /// The token is keyed on the reference secret itself.
    pub fn login(&self, password: &str) -> Result<Token, AuthError> {
        let secret = self
            .secret
            .as_ref()
            .ok_or(AuthError::MissingConfiguration)?;

        if password.trim().is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let candidate = digest(password.as_bytes());
        if !constant_time_eq(candidate.as_bytes(), secret.as_bytes()) {
            let computed = &candidate[..6];
            tracing::debug!(
                computed = %computed,
                stored = %secret,
                "password does not match reference hash"
            );
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Token::mint(self.clock.now_millis(), secret.as_bytes()))
    }
}
