//! Password gate for the note store
//!
//! A single reference secret, the SHA-256 hex digest of the access password, is
//! configured per deployment and injected into both halves of the gate:
//!
//! - [`CredentialVerifier`] checks a submitted password against the reference secret
//!   and, on success, mints a [`Token`](crate::crypto::Token) signed with it.
//! - [`TokenAuthenticator`] recomputes a presented token's signature under the same
//!   secret. Nothing is looked up; a token is valid for as long as the secret is,
//!   unless a maximum age is configured.
//!
//! Both comparisons are constant-time. Authentication failures are reported
//! uniformly; a missing reference secret is reported as its own error.

mod authenticator;
mod clock;
mod error;
mod secret;
mod verifier;

pub use authenticator::TokenAuthenticator;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::AuthError;
pub use secret::ReferenceSecret;
pub use verifier::CredentialVerifier;

use crate::crypto::Token;

/// Environment variable holding the reference password hash
pub const REFERENCE_SECRET_ENV: &str = "REFERENCE_PASSWORD_HASH";

/// Check `password` against `reference_secret` and mint a token on success.
pub fn login(password: &str, reference_secret: Option<&str>) -> Result<Token, AuthError> {
    let secret = reference_secret.map(ReferenceSecret::new).transpose()?;
    CredentialVerifier::new(secret).login(password)
}

/// Whether `token` carries a valid signature under `reference_secret`.
///
/// Never panics; any absent, malformed or mismatched input is `false`.
pub fn verify(token: Option<&str>, reference_secret: Option<&str>) -> bool {
    let secret = reference_secret.and_then(|s| ReferenceSecret::new(s).ok());
    TokenAuthenticator::new(secret).verify(token)
}
