//! Credentials provider model: stored payment methods, addresses and tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::mandate::MandateId;

/// Kind of stored payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodType {
    Card,
}

/// A card network and the credential formats it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CardNetwork {
    #[schema(example = "visa")]
    pub name: String,
    #[schema(example = json!(["DPAN"]))]
    pub formats: Vec<String>,
}

/// A payment method stored in the user's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    /// Human-readable name, also used to pick a method when tokenizing
    #[schema(example = "Acme Bank Visa ending in 4242")]
    pub alias: String,
    pub network: Vec<CardNetwork>,
    #[schema(example = "crypt_abc123")]
    pub cryptogram: String,
    #[schema(example = "tok_visa_4242")]
    pub token: String,
    #[schema(example = "Bugs Bunny")]
    pub card_holder_name: String,
}

impl PaymentMethod {
    /// Brand shown on receipts: the name of the first listed network.
    pub fn brand(&self) -> Option<&str> {
        self.network.first().map(|n| n.name.as_str())
    }
}

/// Postal address used for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShippingAddress {
    pub recipient: String,
    pub organization: String,
    pub address_line: Vec<String>,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub phone_number: String,
}

/// Issuance record behind a payment token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub email_address: String,
    pub payment_method_alias: Option<String>,
    /// Mandate the token was last resolved for. Recorded, never enforced.
    pub payment_mandate_id: Option<MandateId>,
}

impl TokenRecord {
    pub fn new(email_address: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            email_address: email_address.into(),
            payment_method_alias: alias,
            payment_mandate_id: None,
        }
    }

    /// Picks the method this token refers to.
    ///
    /// An exact alias match wins; otherwise the account's first method is
    /// used. The fallback is a demo policy, not a general resolution rule.
    pub fn select<'a>(&self, methods: &'a [PaymentMethod]) -> Option<&'a PaymentMethod> {
        self.payment_method_alias
            .as_deref()
            .and_then(|alias| methods.iter().find(|m| m.alias == alias))
            .or_else(|| methods.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(alias: &str, network: &str) -> PaymentMethod {
        PaymentMethod {
            method_type: PaymentMethodType::Card,
            alias: alias.to_string(),
            network: vec![CardNetwork {
                name: network.to_string(),
                formats: vec!["DPAN".to_string()],
            }],
            cryptogram: "crypt".to_string(),
            token: format!("tok_{network}"),
            card_holder_name: "Bugs Bunny".to_string(),
        }
    }

    #[test]
    fn test_select_prefers_alias_match() {
        let methods = vec![card("Visa 4242", "visa"), card("Amex 0005", "amex")];
        let record = TokenRecord::new("a@b.c", Some("Amex 0005".into()));
        assert_eq!(record.select(&methods).unwrap().alias, "Amex 0005");
    }

    #[test]
    fn test_select_falls_back_to_first_method() {
        let methods = vec![card("Visa 4242", "visa"), card("Amex 0005", "amex")];
        let record = TokenRecord::new("a@b.c", Some("Unknown card".into()));
        assert_eq!(record.select(&methods).unwrap().alias, "Visa 4242");

        let no_alias = TokenRecord::new("a@b.c", None);
        assert_eq!(no_alias.select(&methods).unwrap().alias, "Visa 4242");
    }

    #[test]
    fn test_select_empty_wallet() {
        let record = TokenRecord::new("a@b.c", Some("Visa 4242".into()));
        assert!(record.select(&[]).is_none());
    }

    #[test]
    fn test_payment_method_wire_shape() {
        let json = serde_json::to_value(card("Visa 4242", "visa")).unwrap();
        assert_eq!(json["type"], "CARD");
        assert_eq!(json["network"][0]["name"], "visa");
    }

    #[test]
    fn test_brand() {
        assert_eq!(card("Visa 4242", "visa").brand(), Some("visa"));
        let mut bare = card("x", "visa");
        bare.network.clear();
        assert_eq!(bare.brand(), None);
    }
}
