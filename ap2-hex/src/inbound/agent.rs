//! Shopping-agent identification.
//!
//! Agents name themselves in the `shopping-agent-id` header. The header is not
//! a credential: the merchant only checks it against its known-agents list.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::HeaderMap, http::request::Parts};

/// Header carrying the calling agent's identifier.
pub const AGENT_HEADER: &str = "shopping-agent-id";

/// Agent assumed when a request does not name one.
pub const DEFAULT_AGENT: &str = "trusted_shopping_agent";

/// Reads the agent id from request headers.
/// A missing, blank or non-ASCII header falls back to [`DEFAULT_AGENT`].
pub fn agent_id(headers: &HeaderMap) -> &str {
    headers
        .get(AGENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_AGENT)
}

/// Extractor for the calling shopping agent's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingAgent(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ShoppingAgent {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ShoppingAgent(agent_id(&parts.headers).to_string()))
    }
}
