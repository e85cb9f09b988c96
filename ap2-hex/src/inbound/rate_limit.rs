//! Rate limiting middleware using Governor.
//!
//! Implements per-agent rate limiting with a token bucket algorithm.
//! The agent header is self-declared, so only agents the merchant knows get a
//! bucket of their own; every other id is counted against one shared bucket.

use std::{collections::HashSet, num::NonZeroU32, sync::Arc};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header::RETRY_AFTER},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};

use ap2_types::AppError;

use super::agent::agent_id;
use super::handlers::ApiError;

/// Requests per minute allowed when nothing else is configured.
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 100;

/// Seconds a limited agent is told to wait.
pub const RETRY_AFTER_SECONDS: u64 = 60;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// Per-agent rate limiters; `None` is the bucket for unrecognized ids
    limiters: DashMap<Option<String>, Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>>,
    /// Agents that get a bucket of their own
    known_agents: HashSet<String>,
    /// Quota for each bucket
    quota: Quota,
}

impl RateLimiterState {
    /// Creates a limiter allowing `requests` per minute per bucket, with the
    /// whole minute's allowance available as a burst. Zero is treated as one.
    ///
    /// No agent is known yet, so every request shares the fallback bucket.
    pub fn per_minute(requests: u32) -> Self {
        let requests = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        Self {
            limiters: DashMap::new(),
            known_agents: HashSet::new(),
            quota: Quota::per_minute(requests),
        }
    }

    /// Gives each of `agents` its own bucket.
    pub fn with_known_agents<I, A>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.known_agents = agents.into_iter().map(Into::into).collect();
        self
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, agent: &str) -> bool {
        let key = self
            .known_agents
            .contains(agent)
            .then(|| agent.to_string());
        let limiter = self
            .limiters
            .entry(key)
            .or_insert_with(|| Arc::new(RateLimiter::direct(self.quota)));

        limiter.check().is_ok()
    }

    /// Number of buckets created so far.
    pub fn bucket_count(&self) -> usize {
        self.limiters.len()
    }
}

/// Rate limiting middleware keyed by the `shopping-agent-id` header.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Skip rate limiting for health endpoint
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let agent = agent_id(request.headers());

    if !limiter.check(agent) {
        tracing::warn!(agent_id = %agent, "rate limit exceeded");
        let mut response = ApiError(AppError::TooManyRequests(
            "Rate limit exceeded. Please try again later.".into(),
        ))
        .into_response();
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(RETRY_AFTER_SECONDS));
        return response;
    }

    next.run(request).await
}
