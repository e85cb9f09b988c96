//! Audit trail of actions taken by shopping agents.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry in the merchant's agent audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgentActionLog {
    #[schema(example = "cart_created")]
    pub action: String,
    /// Free-form context supplied by the agent
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: serde_json::Map<String, serde_json::Value>,
    /// Client-side timestamp, stored verbatim
    #[schema(example = "2024-01-01T00:00:00Z")]
    pub timestamp: String,
}
