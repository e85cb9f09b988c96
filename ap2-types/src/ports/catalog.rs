//! Merchant catalog port.

use crate::domain::Product;
use crate::error::RepoError;

/// Read-only access to the merchant's product catalog.
#[async_trait::async_trait]
pub trait CatalogRepository: Send + Sync + 'static {
    /// Lists every product in catalog order.
    async fn list_products(&self) -> Result<Vec<Product>, RepoError>;

    /// Finds a product whose name equals `name`, ignoring case.
    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, RepoError>;

    /// Finds the first product whose name is contained in a free-text request.
    async fn match_product(&self, requested: &str) -> Result<Option<Product>, RepoError>;
}
