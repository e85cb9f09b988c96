//! Security utilities for payment tokens and one-time codes.

use subtle::ConstantTimeEq;

/// Prefix of tokens issued by the credentials provider.
pub const TOKEN_PREFIX: &str = "tok_ap2_";

/// Generates an opaque payment token: `tok_ap2_` followed by 12 hex characters.
pub fn generate_payment_token() -> String {
    let bytes: [u8; 6] = rand::random();
    format!("{}{}", TOKEN_PREFIX, hex::encode(bytes))
}

/// Compares a submitted one-time code with the expected one in constant time.
pub fn verify_code(input: &str, expected: &str) -> bool {
    input.as_bytes().ct_eq(expected.as_bytes()).into()
}
