//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod agent;
mod extract;
mod handlers;
mod rate_limit;
mod server;

pub use agent::{AGENT_HEADER, DEFAULT_AGENT, ShoppingAgent};
pub use extract::{ApiJson, ApiQuery};
pub use handlers::{ApiError, AppState, SERVICE_NAME};
pub use rate_limit::{DEFAULT_REQUESTS_PER_MINUTE, RETRY_AFTER_SECONDS, RateLimiterState};
pub use server::HttpServer;
