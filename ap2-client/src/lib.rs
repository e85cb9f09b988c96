//! # AP2 Client SDK
//!
//! A typed Rust client for the AP2 demo backend, acting as a shopping agent.

use ap2_types::{
    AgentActionLog, AgentLogsResponse, CartItemRequest, CartMandate, CreateCartRequest,
    HealthResponse, InitiatePaymentRequest, LogAgentActionResponse, PaymentMandate,
    PaymentMethod, PaymentOutcome, ProductListResponse, ShippingAddress, TokenizeRequest,
    TokenizeResponse, ValidateProductRequest, ValidateProductResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Header naming the calling shopping agent.
pub const AGENT_HEADER: &str = "shopping-agent-id";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// AP2 API client.
pub struct Ap2Client {
    base_url: String,
    agent_id: Option<String>,
    http: Client,
}

impl Ap2Client {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent_id: None,
            http: Client::new(),
        }
    }

    /// Sets the shopping agent id sent with every request.
    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the health report.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/health", &[]).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Merchant
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_products(&self) -> Result<ProductListResponse, ClientError> {
        self.get("/merchant/products", &[]).await
    }

    pub async fn validate_product(
        &self,
        product_name: &str,
    ) -> Result<ValidateProductResponse, ClientError> {
        let req = ValidateProductRequest {
            product_name: product_name.to_string(),
        };
        self.post("/merchant/validate_product", &req).await
    }

    /// Asks the merchant for a signed cart mandate.
    pub async fn create_cart(
        &self,
        items: Vec<CartItemRequest>,
    ) -> Result<CartMandate, ClientError> {
        self.post("/merchant/create_cart", &CreateCartRequest { items })
            .await
    }

    pub async fn log_agent_action(
        &self,
        entry: &AgentActionLog,
    ) -> Result<LogAgentActionResponse, ClientError> {
        self.post("/merchant/log_agent_action", entry).await
    }

    pub async fn agent_logs(&self) -> Result<AgentLogsResponse, ClientError> {
        self.get("/merchant/agent_logs", &[]).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Wallet
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn payment_methods(&self, user_email: &str) -> Result<Vec<PaymentMethod>, ClientError> {
        self.get("/wallet/methods", &[("user_email", user_email)])
            .await
    }

    pub async fn shipping_address(&self, user_email: &str) -> Result<ShippingAddress, ClientError> {
        self.get("/wallet/address", &[("user_email", user_email)])
            .await
    }

    /// Issues a payment token; `alias` picks the card, else the first one.
    pub async fn tokenize(&self, email: &str, alias: Option<&str>) -> Result<String, ClientError> {
        let req = TokenizeRequest {
            email: email.to_string(),
            alias: alias.map(String::from),
        };
        let resp: TokenizeResponse = self.post("/wallet/tokenize", &req).await?;
        Ok(resp.token)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Processor
    // ─────────────────────────────────────────────────────────────────────────

    /// Submits a payment mandate, with the one-time code once challenged.
    pub async fn initiate_payment(
        &self,
        payment_mandate: &PaymentMandate,
        otp: Option<&str>,
    ) -> Result<PaymentOutcome, ClientError> {
        let req = InitiatePaymentRequest {
            payment_mandate: payment_mandate.clone(),
            otp: otp.map(String::from),
        };
        self.post("/processor/initiate_payment", &req).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let mut req = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query);
        if let Some(agent) = &self.agent_id {
            req = req.header(AGENT_HEADER, agent);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let mut req = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        if let Some(agent) = &self.agent_id {
            req = req.header(AGENT_HEADER, agent);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(body),
            })
        }
    }
}

/// Pulls the most specific message out of an error body.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["detail", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|e| e.as_str()).map(String::from))
        })
        .unwrap_or(body)
}
