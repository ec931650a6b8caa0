use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of `secret`, as lowercase hex.
pub fn digest(secret: &[u8]) -> String {
    hex::encode(Sha256::digest(secret))
}

/// HMAC-SHA-256 of `message` keyed on `key`, as lowercase hex.
pub fn hmac(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Compare two byte strings without branching on their contents.
///
/// Inputs of different length compare unequal; only the length is observable.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
