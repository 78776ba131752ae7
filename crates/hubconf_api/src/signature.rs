//! Verification of the `X-Hub-Signature-256` header GitHub sends with
//! every event of a webhook that has a secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;

type HmacSha256 = Hmac<Sha256>;

/// Header holding `sha256=<hex encoded HMAC-SHA256 of the body>`.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

const PREFIX: &str = "sha256=";

/// Returns true when `signature` is the HMAC-SHA256 of `body` keyed with
/// `secret`. The comparison runs in constant time.
pub fn verify(body: &[u8], secret: &[u8], signature: Option<&str>) -> bool {
    let Some(expected) = signature
        .and_then(|s| s.trim().strip_prefix(PREFIX))
        .and_then(|hex_digest| hex::decode(hex_digest).ok())
    else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}
