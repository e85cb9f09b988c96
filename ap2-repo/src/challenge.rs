//! Challenge code generators.

use ap2_types::{ChallengeCodeGenerator, MandateId};
use rand::Rng;

/// Code accepted by the demo when no other generator is configured.
pub const DEMO_CODE: &str = "123456";

/// Always expects the same code.
#[derive(Debug, Clone)]
pub struct FixedCode(String);

impl FixedCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl Default for FixedCode {
    fn default() -> Self {
        Self::new(DEMO_CODE)
    }
}

impl ChallengeCodeGenerator for FixedCode {
    fn generate(&self, _mandate_id: &MandateId) -> String {
        self.0.clone()
    }
}

/// Expects a fresh random numeric code per challenge.
#[derive(Debug, Clone)]
pub struct RandomDigits {
    len: usize,
}

impl RandomDigits {
    pub fn new(len: usize) -> Self {
        Self { len: len.max(1) }
    }
}

impl Default for RandomDigits {
    fn default() -> Self {
        Self::new(6)
    }
}

impl ChallengeCodeGenerator for RandomDigits {
    fn generate(&self, _mandate_id: &MandateId) -> String {
        let mut rng = rand::rng();
        (0..self.len)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }
}
