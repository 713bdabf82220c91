use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod batch;
pub mod config;
pub mod native;
pub mod token_price;

/// Outcome of one price lookup. Built per request and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPriceQuote {
    /// Canonical network code
    pub network: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenPriceQuote {
    pub fn found(network: &str, address: &str, usd_price: Decimal) -> Self {
        Self {
            network: network.to_string(),
            address: address.to_string(),
            usd_price: Some(usd_price),
            error: None,
        }
    }

    pub fn not_found(network: &str, address: &str, reason: impl Into<String>) -> Self {
        Self {
            network: network.to_string(),
            address: address.to_string(),
            usd_price: None,
            error: Some(reason.into()),
        }
    }

    pub fn is_found(&self) -> bool {
        self.usd_price.is_some()
    }

    /// Price for display purposes: missing prices read as zero.
    pub fn price_or_zero(&self) -> Decimal {
        self.usd_price.unwrap_or(Decimal::ZERO)
    }
}

/// Source of native coin USD prices, used to convert gas costs.
#[async_trait::async_trait]
pub trait NativePriceSource: Send + Sync {
    /// USD price of one native coin on `network`; zero when unknown.
    async fn native_usd_price(&self, network: &str) -> Decimal;
}
