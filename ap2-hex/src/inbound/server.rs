//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use ap2_types::Ap2Repository;

use super::handlers::{self, AppState};
use super::rate_limit::{DEFAULT_REQUESTS_PER_MINUTE, RateLimiterState, rate_limit_middleware};

/// HTTP Server for the AP2 demo API.
pub struct HttpServer<R: Ap2Repository> {
    state: Arc<AppState<R>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<R: Ap2Repository> HttpServer<R> {
    /// Creates a new HTTP server with the default rate limit.
    pub fn new(state: AppState<R>) -> Self {
        Self::with_rate_limit(state, DEFAULT_REQUESTS_PER_MINUTE)
    }

    /// Creates a new HTTP server with custom rate limiting.
    ///
    /// The merchant's known agents each get their own quota.
    pub fn with_rate_limit(state: AppState<R>, requests_per_minute: u32) -> Self {
        let rate_limiter = RateLimiterState::per_minute(requests_per_minute)
            .with_known_agents(state.merchant.known_agents().iter().cloned());
        Self {
            state: Arc::new(state),
            rate_limiter: Arc::new(rate_limiter),
        }
    }

    /// Rate limiter shared by every route except `/health`.
    pub fn rate_limiter(&self) -> Arc<RateLimiterState> {
        self.rate_limiter.clone()
    }

    /// Shared application state, for inspection after requests.
    pub fn state(&self) -> Arc<AppState<R>> {
        self.state.clone()
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/merchant/products", get(handlers::list_products::<R>))
            .route(
                "/merchant/validate_product",
                post(handlers::validate_product::<R>),
            )
            .route("/merchant/create_cart", post(handlers::create_cart::<R>))
            .route(
                "/merchant/log_agent_action",
                post(handlers::log_agent_action::<R>),
            )
            .route("/merchant/agent_logs", get(handlers::agent_logs::<R>))
            .route("/wallet/methods", get(handlers::payment_methods::<R>))
            .route("/wallet/address", get(handlers::shipping_address::<R>))
            .route("/wallet/tokenize", post(handlers::tokenize::<R>))
            .route(
                "/processor/initiate_payment",
                post(handlers::initiate_payment::<R>),
            )
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            // Browser demo frontends call from any origin
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
