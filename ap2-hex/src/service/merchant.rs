//! Merchant agent: catalog, cart mandates and the agent audit log.

use std::sync::Arc;

use ap2_types::{
    AgentActionLog, AgentLogRepository, AgentLogsResponse, AppError, CartItem, CartMandate,
    CatalogRepository, CreateCartRequest, Currency, LogAgentActionResponse, ProductListResponse,
    ProductSummary, ValidateProductRequest, ValidateProductResponse,
};

/// Identifier the merchant signs cart mandates with.
pub const MERCHANT_ID: &str = "merchant_agent_01";

/// Shopping agents allowed to request carts unless configured otherwise.
pub const DEFAULT_KNOWN_AGENTS: [&str; 2] = ["trusted_shopping_agent", "demo_frontend"];

/// Application service for the merchant role.
pub struct MerchantService<R: CatalogRepository + AgentLogRepository> {
    repo: Arc<R>,
    known_agents: Vec<String>,
}

impl<R: CatalogRepository + AgentLogRepository> MerchantService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            known_agents: DEFAULT_KNOWN_AGENTS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Replaces the list of shopping agents allowed to create carts.
    pub fn with_known_agents(mut self, agents: Vec<String>) -> Self {
        self.known_agents = agents;
        self
    }

    pub fn known_agents(&self) -> &[String] {
        &self.known_agents
    }

    pub fn is_known_agent(&self, agent_id: &str) -> bool {
        self.known_agents.iter().any(|a| a == agent_id)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn list_products(&self) -> Result<ProductListResponse, AppError> {
        let products = self.repo.list_products().await?;
        Ok(ProductListResponse {
            total: products.len(),
            products: products.iter().map(ProductSummary::from).collect(),
        })
    }

    /// Checks whether a product exists, ignoring case.
    pub async fn validate_product(
        &self,
        req: ValidateProductRequest,
    ) -> Result<ValidateProductResponse, AppError> {
        let found = self.repo.find_product_by_name(&req.product_name).await?;
        Ok(match found {
            Some(product) => ValidateProductResponse::found(&product),
            None => ValidateProductResponse::missing(&req.product_name),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Cart Mandates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Builds a signed cart mandate for a known shopping agent.
    ///
    /// Requested items that match no catalog product are dropped.
    pub async fn create_cart(
        &self,
        agent_id: &str,
        req: CreateCartRequest,
    ) -> Result<CartMandate, AppError> {
        if !self.is_known_agent(agent_id) {
            return Err(AppError::Forbidden(format!(
                "Unauthorized Shopping Agent: {}",
                agent_id
            )));
        }

        let mut items = Vec::with_capacity(req.items.len());
        for requested in &req.items {
            match self.repo.match_product(&requested.name).await? {
                Some(product) => items.push(CartItem::from_product(&product, requested.quantity)),
                None => tracing::debug!(item = %requested.name, "no catalog match, skipping"),
            }
        }

        let cart = CartMandate::sign(MERCHANT_ID, items, Currency::default())?;
        let total = cart.total()?;
        tracing::info!(
            cart_id = %cart.cart_id,
            agent_id,
            items = cart.items.len(),
            total = %total,
            "cart mandate signed"
        );
        Ok(cart)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Agent Audit Log
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn log_agent_action(
        &self,
        entry: AgentActionLog,
    ) -> Result<LogAgentActionResponse, AppError> {
        let total_logs = self.repo.append_log(entry).await?;
        Ok(LogAgentActionResponse {
            status: "logged".into(),
            total_logs,
        })
    }

    pub async fn agent_logs(&self) -> Result<AgentLogsResponse, AppError> {
        let logs = self.repo.list_logs().await?;
        Ok(AgentLogsResponse {
            total: logs.len(),
            logs,
        })
    }
}
