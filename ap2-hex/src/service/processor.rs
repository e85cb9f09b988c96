//! Payment processor: the challenge/response state machine.

use std::sync::Arc;

use dashmap::DashMap;

use ap2_repo::{FixedCode, security::verify_code};
use ap2_types::{
    ChallengeCodeGenerator, CredentialResolver, MandateId, PaymentError, PaymentMandate,
    PaymentOutcome, PaymentStatus, Receipt,
};

/// Prompt returned with every challenge.
pub const CHALLENGE_MESSAGE: &str = "Step-up authentication required. Please provide OTP.";

/// Brand printed when the resolved method lists no card network.
const UNKNOWN_BRAND: &str = "unknown";

/// Drives a payment mandate through credential resolution, a one-time-code
/// challenge and settlement.
///
/// A mandate first submitted without a code is parked in the pending set
/// until the matching code arrives:
///
/// ```text
/// INITIATED ──no code──▶ CHALLENGE_REQUIRED ──correct code──▶ SUCCESS
///     │                        │  ▲
///     │                        └──┘ wrong code (stays pending)
///     └──bad token / no method──▶ FAILED
/// ```
///
/// There is no retry limit and no expiry. The pending map is the only
/// mutable state; every read-compare-delete on it is atomic per mandate.
pub struct PaymentChallengeCoordinator<C: CredentialResolver> {
    resolver: Arc<C>,
    codes: Box<dyn ChallengeCodeGenerator>,
    pending: DashMap<MandateId, String>,
}

impl<C: CredentialResolver> PaymentChallengeCoordinator<C> {
    /// Creates a coordinator expecting the fixed demo code.
    pub fn new(resolver: Arc<C>) -> Self {
        Self::with_code_generator(resolver, FixedCode::default())
    }

    /// Creates a coordinator with a custom code generator.
    pub fn with_code_generator(
        resolver: Arc<C>,
        codes: impl ChallengeCodeGenerator,
    ) -> Self {
        Self {
            resolver,
            codes: Box::new(codes),
            pending: DashMap::new(),
        }
    }

    /// Starts or completes a payment.
    ///
    /// Without a code (or with an empty one) a challenge is recorded for the
    /// mandate, replacing any earlier one. With a code, the pending
    /// challenge is consumed only if the code matches.
    #[tracing::instrument(
        skip(self, mandate, code),
        fields(mandate_id = %mandate.mandate_id, amount = %mandate.amount, has_code = code.is_some())
    )]
    pub async fn initiate_payment(
        &self,
        mandate: &PaymentMandate,
        code: Option<&str>,
    ) -> Result<PaymentOutcome, PaymentError> {
        tracing::debug!(status = %PaymentStatus::Initiated, "resolving payment credential");

        let method = self
            .resolver
            .resolve(&mandate.payment_token, &mandate.mandate_id)
            .await
            .inspect_err(|e| {
                tracing::warn!(status = %PaymentStatus::Failed, error = %e, "credential rejected")
            })?;

        let Some(code) = code.filter(|c| !c.is_empty()) else {
            return Ok(self.issue_challenge(&mandate.mandate_id));
        };

        self.redeem(&mandate.mandate_id, code)?;

        let receipt = Receipt::new(mandate.amount, method.brand().unwrap_or(UNKNOWN_BRAND));
        tracing::info!(
            status = %PaymentStatus::Success,
            receipt_id = %receipt.id,
            card_brand = %receipt.card_brand,
            "payment settled"
        );
        Ok(PaymentOutcome::Success { receipt })
    }

    /// Whether a challenge is waiting for a code for this mandate.
    pub fn is_pending(&self, mandate_id: &MandateId) -> bool {
        self.pending.contains_key(mandate_id)
    }

    /// Number of open challenges.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn issue_challenge(&self, mandate_id: &MandateId) -> PaymentOutcome {
        let expected = self.codes.generate(mandate_id);
        // No real delivery channel: the prompt carries the code.
        let display_text = format!("Enter the code sent to your device (Mock: {})", expected);
        self.pending.insert(mandate_id.clone(), expected);

        tracing::info!(status = %PaymentStatus::ChallengeRequired, "challenge issued");
        PaymentOutcome::ChallengeRequired {
            message: CHALLENGE_MESSAGE.to_string(),
            display_text,
        }
    }

    fn redeem(&self, mandate_id: &MandateId, code: &str) -> Result<(), PaymentError> {
        match self
            .pending
            .remove_if(mandate_id, |_, expected| verify_code(code, expected))
        {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(
                    pending = self.pending.contains_key(mandate_id),
                    "incorrect challenge code"
                );
                Err(PaymentError::IncorrectCode)
            }
        }
    }
}
