use crate::crypto::TokenError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The deployment has no reference secret. A server fault, not a bad password.
    #[error("reference password hash is not configured")]
    MissingConfiguration,
    #[error("invalid password")]
    InvalidCredentials,
    #[error("password required")]
    EmptyPassword,
    #[error("malformed token")]
    MalformedToken,
    #[error("unauthorized")]
    Unauthorized,
}

impl From<TokenError> for AuthError {
    fn from(_: TokenError) -> Self {
        AuthError::MalformedToken
    }
}
