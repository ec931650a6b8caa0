/**
 * Hashing primitives and the bearer token format.
 *  - SHA-256 digests and HMAC-SHA-256 signatures
 *  - `<issued-at>.<signature>` token codec
 */
pub mod crypto;
/**
 * The password gate.
 *  Credential verification at login and token
 *  authentication on every protected request,
 *  both keyed on the configured reference hash.
 */
pub mod auth;
/**
 * Note records as the client writes them.
 *  The server treats the stored collection as
 *  opaque JSON; these types are for tooling.
 */
pub mod note;
/**
 * Build version information captured
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::auth::{
        AuthError, Clock, CredentialVerifier, FixedClock, ReferenceSecret, SystemClock,
        TokenAuthenticator,
    };
    pub use crate::crypto::{digest, hmac, Token, TokenError};
    pub use crate::note::{AiAnalysis, Note, ResourceType};
    pub use crate::version::build_info;
}
