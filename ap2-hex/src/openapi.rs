//! OpenAPI document and path documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use ap2_types::domain::{
    AgentActionLog, CardNetwork, CartItem, CartMandate, Currency, MandateId, PaymentMandate,
    PaymentMethod, PaymentMethodType, PaymentOutcome, PaymentStatus, Receipt, ShippingAddress,
};
use ap2_types::dto::{
    AgentLogsResponse, CartItemRequest, CreateCartRequest, HealthResponse, InitiatePaymentRequest,
    LogAgentActionResponse, ProductListResponse, ProductSummary, TokenizeRequest,
    TokenizeResponse, ValidateProductRequest, ValidateProductResponse, WalletQuery,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::inbound::AGENT_HEADER;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// List the merchant catalog
#[utoipa::path(
    get,
    path = "/merchant/products",
    tag = "merchant",
    responses(
        (status = 200, description = "All products", body = ProductListResponse)
    )
)]
async fn list_products() {}

/// Check whether a product exists (case-insensitive exact name)
#[utoipa::path(
    post,
    path = "/merchant/validate_product",
    tag = "merchant",
    request_body = ValidateProductRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidateProductResponse)
    )
)]
async fn validate_product() {}

/// Build a signed cart mandate
#[utoipa::path(
    post,
    path = "/merchant/create_cart",
    tag = "merchant",
    request_body = CreateCartRequest,
    security(("shopping_agent" = [])),
    responses(
        (status = 200, description = "Signed cart mandate", body = CartMandate),
        (status = 403, description = "Unknown shopping agent")
    )
)]
async fn create_cart() {}

/// Append an entry to the agent audit log
#[utoipa::path(
    post,
    path = "/merchant/log_agent_action",
    tag = "merchant",
    request_body = AgentActionLog,
    responses(
        (status = 200, description = "Entry stored", body = LogAgentActionResponse)
    )
)]
async fn log_agent_action() {}

/// Read the agent audit log
#[utoipa::path(
    get,
    path = "/merchant/agent_logs",
    tag = "merchant",
    responses(
        (status = 200, description = "All entries in insertion order", body = AgentLogsResponse)
    )
)]
async fn agent_logs() {}

/// List stored payment methods
#[utoipa::path(
    get,
    path = "/wallet/methods",
    tag = "wallet",
    params(WalletQuery),
    responses(
        (status = 200, description = "Payment methods (empty for unknown accounts)", body = Vec<PaymentMethod>)
    )
)]
async fn payment_methods() {}

/// Get the account's shipping address
#[utoipa::path(
    get,
    path = "/wallet/address",
    tag = "wallet",
    params(WalletQuery),
    responses(
        (status = 200, description = "Shipping address", body = ShippingAddress),
        (status = 404, description = "Unknown account")
    )
)]
async fn shipping_address() {}

/// Issue a payment token for a stored method
#[utoipa::path(
    post,
    path = "/wallet/tokenize",
    tag = "wallet",
    request_body = TokenizeRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenizeResponse),
        (status = 400, description = "Invalid request")
    )
)]
async fn tokenize() {}

/// Start a payment or answer its one-time-code challenge
#[utoipa::path(
    post,
    path = "/processor/initiate_payment",
    tag = "processor",
    request_body = InitiatePaymentRequest,
    responses(
        (status = 200, description = "CHALLENGE_REQUIRED or SUCCESS", body = PaymentOutcome),
        (status = 400, description = "Invalid token, no payment method, or incorrect code"),
        (status = 422, description = "Mandate is missing fields or has mistyped fields"),
        (status = 429, description = "Rate limit exceeded")
    )
)]
async fn initiate_payment() {}

/// OpenAPI documentation for the AP2 demo API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AP2 Demo Backend API",
        version = "1.0.0",
        description = "Merchant, credentials provider and payment processor agents for the Agent Payments Protocol demo.\n\n## Shopping agents\n\nCallers identify themselves with the `shopping-agent-id` header. Cart creation is restricted to known agents; requests are rate limited per agent.\n\n## Payment flow\n\n1. `POST /merchant/create_cart`\n2. `POST /wallet/tokenize`\n3. `POST /processor/initiate_payment` without `otp` to receive a challenge\n4. `POST /processor/initiate_payment` again with the code",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_products,
        validate_product,
        create_cart,
        log_agent_action,
        agent_logs,
        payment_methods,
        shipping_address,
        tokenize,
        initiate_payment,
    ),
    components(
        schemas(
            HealthResponse,
            ProductSummary,
            ProductListResponse,
            ValidateProductRequest,
            ValidateProductResponse,
            CartItemRequest,
            CreateCartRequest,
            CartItem,
            CartMandate,
            Currency,
            AgentActionLog,
            LogAgentActionResponse,
            AgentLogsResponse,
            PaymentMethodType,
            CardNetwork,
            PaymentMethod,
            ShippingAddress,
            TokenizeRequest,
            TokenizeResponse,
            MandateId,
            PaymentMandate,
            InitiatePaymentRequest,
            PaymentStatus,
            PaymentOutcome,
            Receipt,
        )
    ),

    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "merchant", description = "Catalog, cart mandates and agent audit log"),
        (name = "wallet", description = "Credentials provider: payment methods and tokens"),
        (name = "processor", description = "Payment initiation and one-time-code challenge"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for the shopping-agent header.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "shopping_agent",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(AGENT_HEADER))),
            );
        }
    }
}
