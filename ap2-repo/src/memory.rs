//! In-memory adapter backing every port.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;

use ap2_types::{
    AgentActionLog, AgentLogRepository, CatalogRepository, CredentialError, CredentialResolver,
    MandateId, PaymentMethod, Product, RepoError, ShippingAddress, TokenRecord, WalletRepository,
};

use crate::security::generate_payment_token;
use crate::seed::{self, Account};

/// Process-lifetime store for the catalog, accounts, issued tokens and the
/// agent audit log.
///
/// Catalog and accounts are read-only after construction. Issued tokens and
/// log entries are the only mutable state and are safe to share across
/// request tasks.
pub struct InMemoryStore {
    products: Vec<Product>,
    accounts: HashMap<String, Account>,
    tokens: DashMap<String, TokenRecord>,
    agent_logs: Mutex<Vec<AgentActionLog>>,
}

impl InMemoryStore {
    /// Creates a store holding the demo catalog and account.
    pub fn seeded() -> Self {
        Self::with_data(seed::products(), seed::accounts())
    }

    /// Creates a store over the given data.
    ///
    /// Each stored payment method's own token is registered as issued, so
    /// the token a wallet lists can be used for payment directly.
    pub fn with_data(products: Vec<Product>, accounts: Vec<Account>) -> Self {
        let tokens = DashMap::new();
        for account in &accounts {
            for method in &account.payment_methods {
                tokens.insert(
                    method.token.clone(),
                    TokenRecord::new(account.email.clone(), Some(method.alias.clone())),
                );
            }
        }

        Self {
            products,
            accounts: accounts
                .into_iter()
                .map(|a| (a.email.clone(), a))
                .collect(),
            tokens,
            agent_logs: Mutex::new(Vec::new()),
        }
    }

    /// Returns the issuance record for a token.
    pub fn token_record(&self, token: &str) -> Option<TokenRecord> {
        self.tokens.get(token).map(|r| r.clone())
    }

    fn methods_for(&self, email: &str) -> &[PaymentMethod] {
        self.accounts
            .get(email)
            .map(|a| a.payment_methods.as_slice())
            .unwrap_or_default()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, RepoError> {
        Ok(self.products.clone())
    }

    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, RepoError> {
        Ok(self.products.iter().find(|p| p.has_name(name)).cloned())
    }

    async fn match_product(&self, requested: &str) -> Result<Option<Product>, RepoError> {
        Ok(self
            .products
            .iter()
            .find(|p| p.matches_request(requested))
            .cloned())
    }
}

#[async_trait]
impl WalletRepository for InMemoryStore {
    async fn payment_methods(&self, email: &str) -> Result<Vec<PaymentMethod>, RepoError> {
        Ok(self.methods_for(email).to_vec())
    }

    async fn shipping_address(&self, email: &str) -> Result<Option<ShippingAddress>, RepoError> {
        Ok(self.accounts.get(email).map(|a| a.shipping_address.clone()))
    }

    async fn create_payment_token(
        &self,
        email: &str,
        alias: Option<&str>,
    ) -> Result<String, RepoError> {
        let token = generate_payment_token();
        self.tokens.insert(
            token.clone(),
            TokenRecord::new(email, alias.map(String::from)),
        );
        tracing::debug!(email, alias, "payment token issued");
        Ok(token)
    }
}

#[async_trait]
impl CredentialResolver for InMemoryStore {
    async fn resolve(
        &self,
        token: &str,
        mandate_id: &MandateId,
    ) -> Result<PaymentMethod, CredentialError> {
        let mut record = self
            .tokens
            .get_mut(token)
            .ok_or(CredentialError::InvalidToken)?;

        // The link is recorded for auditing only; resolution does not depend on it.
        record.payment_mandate_id = Some(mandate_id.clone());

        record
            .select(self.methods_for(&record.email_address))
            .cloned()
            .ok_or(CredentialError::NoPaymentMethod)
    }
}

#[async_trait]
impl AgentLogRepository for InMemoryStore {
    async fn append_log(&self, entry: AgentActionLog) -> Result<usize, RepoError> {
        let mut logs = self
            .agent_logs
            .lock()
            .map_err(|e| RepoError::Storage(e.to_string()))?;
        logs.push(entry);
        Ok(logs.len())
    }

    async fn list_logs(&self) -> Result<Vec<AgentActionLog>, RepoError> {
        let logs = self
            .agent_logs
            .lock()
            .map_err(|e| RepoError::Storage(e.to_string()))?;
        Ok(logs.clone())
    }
}
