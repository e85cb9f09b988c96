//! One-time code generation port.

use crate::domain::MandateId;

/// Produces the code a payment challenge expects.
///
/// Codes are never delivered out of band in this system; the prompt shown to
/// the caller includes the code.
pub trait ChallengeCodeGenerator: Send + Sync + 'static {
    fn generate(&self, mandate_id: &MandateId) -> String;
}
