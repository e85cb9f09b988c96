//! Mandates exchanged between the shopping, merchant and processor agents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::catalog::CartItem;
use super::money::{Currency, Money};
use crate::error::DomainError;

/// Currency assumed when a payment mandate does not name one.
pub const DEFAULT_CURRENCY: &str = "INR";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Identifier of a single payment attempt.
///
/// Chosen by the shopping agent, so it is an opaque string rather than a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "mandate_7f3a9c21")]
pub struct MandateId(String);

impl MandateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh `mandate_<hex>` identifier.
    pub fn generate() -> Self {
        Self(format!("mandate_{}", short_hex(8)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MandateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MandateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MandateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Returns the first `len` hex characters of a random UUID (max 32).
pub(crate) fn short_hex(len: usize) -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(len);
    hex
}

/// The merchant's signed offer for a set of items.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartMandate {
    #[schema(example = "cart_1a2b3c4d")]
    pub cart_id: String,
    #[schema(example = "merchant_agent_01")]
    pub merchant_id: String,
    pub items: Vec<CartItem>,
    #[schema(example = 118.0)]
    pub total_price: Decimal,
    #[serde(default)]
    pub currency: Currency,
    /// Placeholder signature; no real signing is performed
    #[schema(example = "sig_merch_0123456789abcdef")]
    pub merchant_signature: String,
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl CartMandate {
    /// Builds and placeholder-signs a cart for the given items.
    ///
    /// # Validation
    /// - All line prices must be non-negative
    pub fn sign(
        merchant_id: impl Into<String>,
        items: Vec<CartItem>,
        currency: Currency,
    ) -> Result<Self, DomainError> {
        let mut total = Money::zero(currency);
        for item in &items {
            let line = Money::new(item.price, currency)?.times(item.quantity);
            total = total.checked_add(line)?;
        }

        Ok(Self {
            cart_id: format!("cart_{}", short_hex(8)),
            merchant_id: merchant_id.into(),
            items,
            total_price: total.amount(),
            currency,
            merchant_signature: format!("sig_merch_{}", short_hex(16)),
            created_at: Utc::now(),
        })
    }

    pub fn total(&self) -> Result<Money, DomainError> {
        Money::new(self.total_price, self.currency)
    }
}

/// The user's authorization to pay for a cart with a tokenized credential.
///
/// Immutable once submitted; the `mandate_id` identifies one payment attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentMandate {
    pub mandate_id: MandateId,
    #[schema(example = "cart_1a2b3c4d")]
    pub cart_id: String,
    #[schema(example = 118.0)]
    pub amount: Decimal,
    /// ISO code as sent by the shopping agent; not checked against the cart
    #[serde(default = "default_currency")]
    #[schema(example = "INR")]
    pub currency: String,
    /// Token issued by the credentials provider
    #[schema(example = "tok_visa_4242")]
    pub payment_token: String,
    /// Placeholder user signature
    #[schema(example = "sig_user_demo")]
    pub user_signature: String,
}

impl PaymentMandate {
    /// Creates a mandate paying the full cart total with the given token.
    pub fn for_cart(
        cart: &CartMandate,
        payment_token: impl Into<String>,
        user_signature: impl Into<String>,
    ) -> Self {
        Self {
            mandate_id: MandateId::generate(),
            cart_id: cart.cart_id.clone(),
            amount: cart.total_price,
            currency: cart.currency.to_string(),
            payment_token: payment_token.into(),
            user_signature: user_signature.into(),
        }
    }
}
