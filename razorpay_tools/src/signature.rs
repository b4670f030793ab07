//! Razorpay payment signatures.
//!
//! When a payment completes, the checkout widget hands the storefront `razorpay_order_id`, `razorpay_payment_id` and
//! `razorpay_signature`. The signature is the hex-encoded HMAC-SHA256 of `"{order_id}|{payment_id}"`, keyed with the
//! account's key secret. Only the server knows the secret, so a matching signature proves the completion came from
//! Razorpay.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(secret: &str, order_id: &str, payment_id: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Some(mac)
}

/// Calculates the signature Razorpay would send for this order and payment.
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    keyed_mac(secret, order_id, payment_id).map(|mac| hex::encode(mac.finalize().into_bytes())).unwrap_or_default()
}

/// Checks `signature` against the expected lowercase hex digest in constant time. The comparison is on the exact
/// string, so padded or re-cased digests do not match.
pub fn verify_payment_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let expected = payment_signature(secret, order_id, payment_id);
    !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(signature.as_bytes()))
}
