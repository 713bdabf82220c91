use error_stack::{ResultExt, report};
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter, clock::DefaultClock};
use reqwest::{Client as ReqwestClient, Error as ReqwestError, Request, Response};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, ModelResult};
use crate::network::RateLimitWindow;

#[derive(Debug, Clone)]
pub enum Client {
    RateLimited(RateLimitedClient),
    Unrestricted(ReqwestClient),
}

impl Client {
    /// Builds a client with a request timeout, throttled when `rate_limit` is set.
    pub fn build(timeout: Duration, rate_limit: Option<RateLimitWindow>) -> ModelResult<Self> {
        let inner = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .change_context(Error::ReqwestError("Failed to build HTTP client".to_string()))?;

        match rate_limit {
            Some(limit) => Ok(Client::RateLimited(RateLimitedClient::with_client(
                inner, limit, None,
            )?)),
            None => Ok(Client::Unrestricted(inner)),
        }
    }

    pub async fn execute(&self, req: Request) -> Result<Response, ReqwestError> {
        match self {
            Client::RateLimited(rate_limited_client) => rate_limited_client.execute(req).await,
            Client::Unrestricted(unrestricted_client) => unrestricted_client.execute(req).await,
        }
    }

    pub fn inner_client(&self) -> &ReqwestClient {
        match self {
            Client::RateLimited(rate_limited_client) => rate_limited_client.inner_client(),
            Client::Unrestricted(unrestricted_client) => unrestricted_client,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitedClient {
    inner: ReqwestClient,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimitedClient {
    pub fn with_client(
        inner: ReqwestClient,
        limit: RateLimitWindow,
        burst: Option<NonZeroU32>,
    ) -> ModelResult<Self> {
        let mut quota = match limit {
            RateLimitWindow::PerSecond(allowed) => Quota::per_second(allowed),
            RateLimitWindow::PerMinute(allowed) => Quota::per_minute(allowed),
            RateLimitWindow::Custom { period } => Quota::with_period(period).ok_or_else(|| {
                report!(Error::ConfigError(format!(
                    "Invalid rate limit period: {period:?}"
                )))
            })?,
        };
        if let Some(b) = burst {
            quota = quota.allow_burst(b);
        }
        let limiter = Arc::new(RateLimiter::direct(quota));
        Ok(Self { inner, limiter })
    }

    pub fn inner_client(&self) -> &ReqwestClient {
        &self.inner
    }

    pub async fn execute(&self, req: Request) -> Result<Response, ReqwestError> {
        self.limiter.until_ready().await;
        self.inner.execute(req).await
    }
}
