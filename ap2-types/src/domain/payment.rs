//! Payment processor outcomes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Name printed on every receipt issued by the demo merchant.
pub const MERCHANT_DISPLAY_NAME: &str = "Merchant Agent 01";

/// States of the payment challenge state machine.
///
/// `Initiated` is transient and never returned to callers; `Failed` is
/// reported through an error rather than an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Initiated,
    ChallengeRequired,
    Success,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Initiated => write!(f, "INITIATED"),
            PaymentStatus::ChallengeRequired => write!(f, "CHALLENGE_REQUIRED"),
            PaymentStatus::Success => write!(f, "SUCCESS"),
            PaymentStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Proof of a settled payment. Never persisted beyond the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Receipt {
    #[schema(example = "rcpt_0123456789abcdef0123456789abcdef")]
    pub id: String,
    #[schema(example = 118.0)]
    pub amount: Decimal,
    #[schema(example = "Merchant Agent 01")]
    pub merchant: String,
    #[schema(example = "visa")]
    pub card_brand: String,
}

impl Receipt {
    pub fn new(amount: Decimal, card_brand: impl Into<String>) -> Self {
        Self {
            id: format!("rcpt_{}", Uuid::new_v4().simple()),
            amount,
            merchant: MERCHANT_DISPLAY_NAME.to_string(),
            card_brand: card_brand.into(),
        }
    }
}

/// Externally observable result of a payment initiation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentOutcome {
    /// A one-time code must be submitted for the same mandate.
    ChallengeRequired {
        message: String,
        display_text: String,
    },
    /// The code was accepted and the payment settled.
    Success { receipt: Receipt },
}

impl PaymentOutcome {
    pub fn status(&self) -> PaymentStatus {
        match self {
            PaymentOutcome::ChallengeRequired { .. } => PaymentStatus::ChallengeRequired,
            PaymentOutcome::Success { .. } => PaymentStatus::Success,
        }
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            PaymentOutcome::Success { receipt } => Some(receipt),
            PaymentOutcome::ChallengeRequired { .. } => None,
        }
    }
}
