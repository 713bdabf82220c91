use crate::error::{Error, EstimatorResult};
use crosschain_models::network::RateLimitWindow;
use error_stack::report;
use std::time::Duration;

pub const TOKEN_PRICE_API_URL_VAR: &str = "TOKEN_PRICE_API_URL";
pub const TOKEN_PRICE_API_KEY_VAR: &str = "TOKEN_PRICE_API_KEY";
pub const TOKEN_PRICE_API_TIMEOUT_VAR: &str = "TOKEN_PRICE_API_TIMEOUT_SECS";
pub const TOKEN_PRICE_API_RATE_LIMIT_VAR: &str = "TOKEN_PRICE_API_RATE_LIMIT";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct PriceApiConfig {
    /// Base URL up to the API version, e.g. `https://prices.example/api/v2`
    pub base_url: String,
    /// Sent as `X-API-Key` when present
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub rate_limit: Option<RateLimitWindow>,
}

impl PriceApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            rate_limit: None,
        }
    }

    /// Reads the configuration from the process environment (and `.env`, if any).
    pub fn from_env() -> EstimatorResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> EstimatorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = non_empty(TOKEN_PRICE_API_URL_VAR).ok_or_else(|| {
            report!(Error::ConfigError(format!(
                "{TOKEN_PRICE_API_URL_VAR} environment variable is not set"
            )))
        })?;

        let timeout = match non_empty(TOKEN_PRICE_API_TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(report!(Error::ConfigError(format!(
                        "Invalid {TOKEN_PRICE_API_TIMEOUT_VAR}: {raw}"
                    ))));
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let rate_limit = match non_empty(TOKEN_PRICE_API_RATE_LIMIT_VAR) {
            Some(raw) => Some(RateLimitWindow::from_string(&raw).ok_or_else(|| {
                report!(Error::ConfigError(format!(
                    "Invalid {TOKEN_PRICE_API_RATE_LIMIT_VAR}: {raw}"
                )))
            })?),
            None => None,
        };

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key: non_empty(TOKEN_PRICE_API_KEY_VAR).map(|key| key.trim().to_string()),
            timeout,
            rate_limit,
        })
    }
}
