//! Merchant catalog model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A product offered by the merchant agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = "p1")]
    pub id: String,
    #[schema(example = "Fresh Tomato Hybrid")]
    pub name: String,
    /// Unit price in major currency units
    #[schema(example = 38.0)]
    pub price: Decimal,
    pub description: String,
    /// Pack size shown next to the price (e.g. "500g")
    #[serde(default = "default_quantity_text")]
    pub quantity_text: String,
}

fn default_quantity_text() -> String {
    "N/A".to_string()
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        description: impl Into<String>,
        quantity_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: description.into(),
            quantity_text: quantity_text.into(),
        }
    }

    /// Case-insensitive exact name comparison, used for catalog validation.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// True when this product's name appears inside a free-text item request.
    ///
    /// Shopping agents send names such as "Coca Cola 750ml", so the match is
    /// a case-sensitive containment check of the catalog name.
    pub fn matches_request(&self, requested: &str) -> bool {
        requested.contains(self.name.as_str())
    }
}

/// A line on a cart mandate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    #[schema(example = "p10")]
    pub product_id: String,
    #[schema(example = 2)]
    pub quantity: u32,
    /// Unit price at the time the cart was built
    #[schema(example = 40.0)]
    pub price: Decimal,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            quantity,
            price: product.price,
        }
    }
}
