use rand::RngExt;
use subtle::ConstantTimeEq;

use crate::domain::types::{MANUAL_CODE_LEN, TOKEN_LEN};

/// Charset for check-in tokens (mixed-case alphanumeric).
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Proof of presence submitted by an attendee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Token read from the QR code or a check-in link.
    Token(String),
    /// Short numeric fallback read aloud by the organizer.
    ManualCode(String),
}

pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

pub fn generate_manual_code() -> String {
    let mut rng = rand::rng();
    (0..MANUAL_CODE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Compare two byte slices in constant time. Slices of different lengths never match.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
