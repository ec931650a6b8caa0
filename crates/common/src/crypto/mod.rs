//! Cryptographic primitives for the Jotter password gate
//!
//! Everything here is a pure function of its inputs:
//!
//! - **Digest**: SHA-256 of a secret, rendered as lowercase hex. The deployment's
//!   reference secret is the digest of the access password.
//! - **Signature**: HMAC-SHA-256 of a message under a key, rendered as lowercase hex.
//! - **Token**: `<issued-at-ms>.<signature>` where the signature is the HMAC of the
//!   decimal timestamp keyed on the reference secret.
//!
//! Strings are always hashed as their UTF-8 bytes, and hex output is always
//! lowercase, so the same input yields the same output on every platform.
//!
//! Comparisons of secret-derived values go through [`constant_time_eq`].

mod hash;
mod token;

pub use hash::{constant_time_eq, digest, hmac, DIGEST_HEX_LEN};
pub use token::{Token, TokenError, TOKEN_DELIMITER};
