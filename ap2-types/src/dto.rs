//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AgentActionLog, PaymentMandate, Product};

/// Account used when a wallet request does not name one.
pub const DEFAULT_USER_EMAIL: &str = "bugsbunny@gmail.com";

fn default_user_email() -> String {
    DEFAULT_USER_EMAIL.to_string()
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "AP2 Demo Backend")]
    pub service: String,
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Merchant DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Catalog entry as listed to agents.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    #[schema(example = "p1")]
    pub id: String,
    #[schema(example = "Fresh Tomato Hybrid")]
    pub name: String,
    #[schema(example = 38.0)]
    pub price: Decimal,
    pub description: String,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            price: p.price,
            description: p.description.clone(),
        }
    }
}

/// Response listing the whole catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductSummary>,
    #[schema(example = 14)]
    pub total: usize,
}

/// Request to check whether a product exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateProductRequest {
    #[schema(example = "coca cola")]
    pub product_name: String,
}

/// Result of a product validation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateProductResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidateProductResponse {
    pub fn found(product: &Product) -> Self {
        Self {
            exists: true,
            product_id: Some(product.id.clone()),
            name: Some(product.name.clone()),
            price: Some(product.price),
            description: Some(product.description.clone()),
            message: None,
        }
    }

    pub fn missing(requested: &str) -> Self {
        Self {
            exists: false,
            product_id: None,
            name: None,
            price: None,
            description: None,
            message: Some(format!("Product '{}' not found in catalog", requested)),
        }
    }
}

/// One requested line in a cart: a free-text product name and a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemRequest {
    #[schema(example = "Coca Cola")]
    pub name: String,
    #[schema(example = 2)]
    pub quantity: u32,
}

/// Request to build a cart mandate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCartRequest {
    pub items: Vec<CartItemRequest>,
}

/// Response after appending to the agent log.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogAgentActionResponse {
    #[schema(example = "logged")]
    pub status: String,
    pub total_logs: usize,
}

/// Full agent audit log.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgentLogsResponse {
    pub logs: Vec<AgentActionLog>,
    pub total: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Credentials provider DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query selecting the wallet owner.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WalletQuery {
    /// Account email; defaults to the demo user
    #[serde(default = "default_user_email")]
    #[param(example = "bugsbunny@gmail.com")]
    pub user_email: String,
}

impl Default for WalletQuery {
    fn default() -> Self {
        Self {
            user_email: default_user_email(),
        }
    }
}

/// Request to tokenize a stored payment method.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenizeRequest {
    #[serde(default = "default_user_email")]
    #[schema(example = "bugsbunny@gmail.com")]
    pub email: String,
    /// Alias of the method to tokenize; the first method is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Acme Bank Visa ending in 4242")]
    pub alias: Option<String>,
}

/// Response carrying a freshly issued payment token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenizeResponse {
    #[schema(example = "tok_ap2_0123456789ab")]
    pub token: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment processor DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to start or confirm a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InitiatePaymentRequest {
    pub payment_mandate: PaymentMandate,
    /// One-time code; omit on the first call to receive a challenge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "123456")]
    pub otp: Option<String>,
}

impl InitiatePaymentRequest {
    /// The submitted code, treating an empty string as no code at all.
    pub fn code(&self) -> Option<&str> {
        self.otp.as_deref().filter(|code| !code.is_empty())
    }
}
