//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use ap2_types::{
    AgentActionLog, Ap2Repository, AppError, CreateCartRequest, HealthResponse,
    InitiatePaymentRequest, TokenizeRequest, ValidateProductRequest, WalletQuery,
};
use utoipa::OpenApi;

use super::agent::ShoppingAgent;
use super::extract::{ApiJson, ApiQuery};
use crate::openapi::ApiDoc;
use crate::service::{MerchantService, PaymentChallengeCoordinator, WalletService};

/// Service name reported by the health check.
pub const SERVICE_NAME: &str = "AP2 Demo Backend";

/// Application state shared across handlers: one service per agent role,
/// all backed by the same store.
pub struct AppState<R: Ap2Repository> {
    pub merchant: MerchantService<R>,
    pub wallet: WalletService<R>,
    pub processor: PaymentChallengeCoordinator<R>,
}

impl<R: Ap2Repository> AppState<R> {
    /// Wires every role to `repo` with default settings.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            merchant: MerchantService::new(repo.clone()),
            wallet: WalletService::new(repo.clone()),
            processor: PaymentChallengeCoordinator::new(repo),
        }
    }

    pub fn with_merchant(mut self, merchant: MerchantService<R>) -> Self {
        self.merchant = merchant;
        self
    }

    pub fn with_processor(mut self, processor: PaymentChallengeCoordinator<R>) -> Self {
        self.processor = processor;
        self
    }
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::TooManyRequests(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "detail": detail,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
        service: SERVICE_NAME.into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Merchant
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state))]
pub async fn list_products<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.merchant.list_products().await?;
    Ok(Json(products))
}

#[tracing::instrument(skip(state), fields(product = %req.product_name))]
pub async fn validate_product<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
    ApiJson(req): ApiJson<ValidateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.merchant.validate_product(req).await?;
    Ok(Json(result))
}

/// Build a signed cart mandate for the calling shopping agent.
#[tracing::instrument(skip(state, req), fields(agent_id = %agent.0, items = req.items.len()))]
pub async fn create_cart<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
    agent: ShoppingAgent,
    ApiJson(req): ApiJson<CreateCartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state.merchant.create_cart(&agent.0, req).await?;
    Ok(Json(cart))
}

#[tracing::instrument(skip(state, entry), fields(action = %entry.action))]
pub async fn log_agent_action<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
    ApiJson(entry): ApiJson<AgentActionLog>,
) -> Result<impl IntoResponse, ApiError> {
    let resp = state.merchant.log_agent_action(entry).await?;
    Ok(Json(resp))
}

#[tracing::instrument(skip(state))]
pub async fn agent_logs<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let logs = state.merchant.agent_logs().await?;
    Ok(Json(logs))
}

// ─────────────────────────────────────────────────────────────────────────────
// Wallet (credentials provider)
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state), fields(user_email = %query.user_email))]
pub async fn payment_methods<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
    ApiQuery(query): ApiQuery<WalletQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let methods = state.wallet.payment_methods(&query.user_email).await?;
    Ok(Json(methods))
}

#[tracing::instrument(skip(state), fields(user_email = %query.user_email))]
pub async fn shipping_address<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
    ApiQuery(query): ApiQuery<WalletQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let address = state.wallet.shipping_address(&query.user_email).await?;
    Ok(Json(address))
}

#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn tokenize<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
    ApiJson(req): ApiJson<TokenizeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.wallet.tokenize(req).await?;
    Ok(Json(token))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment processor
// ─────────────────────────────────────────────────────────────────────────────

/// Start a payment, or answer the challenge with a one-time code.
#[tracing::instrument(skip(state, req), fields(mandate_id = %req.payment_mandate.mandate_id))]
pub async fn initiate_payment<R: Ap2Repository>(
    State(state): State<Arc<AppState<R>>>,
    ApiJson(req): ApiJson<InitiatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .processor
        .initiate_payment(&req.payment_mandate, req.code())
        .await
        .map_err(AppError::from)?;
    Ok(Json(outcome))
}
