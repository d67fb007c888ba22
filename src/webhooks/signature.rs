//! Webhook signature verification (HMAC-SHA256).
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw payload bytes and
//! sends the result in the `X-Hub-Signature-256` header as `sha256=<hex>`.
//! Verification runs before any parsing; a payload that fails it is rejected
//! outright.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies a webhook signature header against the payload and shared secret.
///
/// Returns `false` for malformed headers (wrong prefix, invalid hex) as well
/// as for signature mismatches; it never panics. The comparison is
/// constant-time via the HMAC library.
///
/// # Examples
///
/// ```
/// use suggestion_bot::webhooks::{compute_signature, format_signature_header, verify_signature};
///
/// let payload = b"{}";
/// let secret = b"shared-secret";
/// let header = format_signature_header(&compute_signature(payload, secret));
///
/// assert!(verify_signature(payload, &header, secret));
/// assert!(!verify_signature(payload, &header, b"other-secret"));
/// ```
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    let claimed = match decode_signature_header(signature_header) {
        Some(bytes) => bytes,
        None => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload);

    mac.verify_slice(&claimed).is_ok()
}

/// Computes the raw HMAC-SHA256 signature of a payload.
///
/// Used by tests to produce valid headers for synthetic deliveries.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a raw signature as a `sha256=<hex>` header value.
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha256={}", hex::encode(signature))
}

/// Decodes a `sha256=<hex>` header into raw bytes; `None` if malformed.
fn decode_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix("sha256=")?;
    hex::decode(hex_sig).ok()
}
