use std::fmt;
use std::str::FromStr;

use super::hash::hmac;

/// Separator between the issued-at timestamp and the signature
pub const TOKEN_DELIMITER: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
}

/// A bearer token: `<issued-at-ms>.<hex signature>`.
///
/// The token carries no expiry and no server-side state. Its only claim is the
/// moment it was issued, signed under the key it was minted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    issued_at: u64,
    signature: String,
}

impl Token {
    /// Sign `issued_at` (as its decimal string) under `key_material`.
    pub fn mint(issued_at: u64, key_material: &[u8]) -> Self {
        Self {
            issued_at,
            signature: Self::signature_for(issued_at, key_material),
        }
    }

    /// The signature a token issued at `issued_at` must carry under `key_material`.
    pub fn signature_for(issued_at: u64, key_material: &[u8]) -> String {
        hmac(key_material, issued_at.to_string().as_bytes())
    }

    /// Split a raw token into its two parts.
    ///
    /// Requires exactly one delimiter with a non-empty part on each side, and a
    /// canonical decimal timestamp (digits only, no leading zeros) so that the
    /// signed message is exactly the text the client presented. The signature is
    /// not inspected here.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let mut parts = raw.split(TOKEN_DELIMITER);
        let (Some(issued_at), Some(signature), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        if issued_at.is_empty() || signature.is_empty() {
            return Err(TokenError::Malformed);
        }
        if !issued_at.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::Malformed);
        }
        if issued_at.len() > 1 && issued_at.starts_with('0') {
            return Err(TokenError::Malformed);
        }
        let issued_at = issued_at.parse::<u64>().map_err(|_| TokenError::Malformed)?;

        Ok(Self {
            issued_at,
            signature: signature.to_string(),
        })
    }

    pub fn issued_at(&self) -> u64 {
        self.issued_at
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.issued_at, TOKEN_DELIMITER, self.signature)
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{digest, DIGEST_HEX_LEN};

    const ISSUED_AT: u64 = 1_700_000_000_000;

    fn key() -> String {
        digest(b"opensesame")
    }

    #[test]
    fn test_mint_format() {
        let token = Token::mint(ISSUED_AT, key().as_bytes()).to_string();
        let (ts, sig) = token.split_once('.').unwrap();
        assert_eq!(ts, "1700000000000");
        assert_eq!(sig.len(), DIGEST_HEX_LEN);
        assert_eq!(
            sig,
            "d31b60f08105281e9f2186319cc7732259a14ed1a7348f2755d01efad84a8a2b"
        );
    }

    #[test]
    fn test_mint_is_deterministic() {
        let a = Token::mint(ISSUED_AT, key().as_bytes());
        let b = Token::mint(ISSUED_AT, key().as_bytes());
        assert_eq!(a.to_string(), b.to_string());

        let later = Token::mint(ISSUED_AT + 1, key().as_bytes());
        assert_ne!(a.signature(), later.signature());
    }

    #[test]
    fn test_parse_roundtrip() {
        let token = Token::mint(ISSUED_AT, key().as_bytes());
        let parsed: Token = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
        assert_eq!(parsed.issued_at(), ISSUED_AT);
    }

    #[test]
    fn test_parse_keeps_signature_verbatim() {
        let parsed = Token::parse("42.not-hex-at-all").unwrap();
        assert_eq!(parsed.issued_at(), 42);
        assert_eq!(parsed.signature(), "not-hex-at-all");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let cases = [
            "",
            ".",
            "1700000000000",
            "1700000000000.",
            ".abcdef",
            "1.2.3",
            "1700000000000.abc.def",
            "abc.def",
            "-1.abc",
            "+1.abc",
            " 1.abc",
            "01.abc",
            "1e3.abc",
            "99999999999999999999999.abc",
        ];
        for case in cases {
            assert_eq!(
                Token::parse(case),
                Err(TokenError::Malformed),
                "expected {:?} to be rejected",
                case
            );
        }
    }

    #[test]
    fn test_parse_accepts_zero_timestamp() {
        assert_eq!(Token::parse("0.ab").unwrap().issued_at(), 0);
    }
}
