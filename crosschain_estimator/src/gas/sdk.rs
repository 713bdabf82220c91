//! Seams to the third-party swap SDK.
//!
//! The SDK and its trade objects change shape between versions, so every
//! method hands back raw JSON and "not available" is a normal answer.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
    error::EstimatorResult,
    networks::normalize_network,
    utils::{
        json::{first_at_paths, first_str_at_paths},
        number_conversion::parse_positive_decimal,
    },
};

/// Arguments for a manager-level gas estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct GasDataRequest {
    /// Canonical network of the source chain
    pub network: String,
    /// Canonical network of the destination chain, for cross-chain trades
    pub to_network: Option<String>,
    pub from_token: String,
    pub to_token: String,
    pub amount: Decimal,
}

const FROM_TOKEN_PATHS: &[&[&str]] = &[
    &["from", "address"],
    &["fromToken", "address"],
    &["fromTokenAddress"],
    &["from_token"],
];
const TO_TOKEN_PATHS: &[&[&str]] = &[
    &["to", "address"],
    &["toToken", "address"],
    &["toTokenAddress"],
    &["to_token"],
];
const AMOUNT_PATHS: &[&[&str]] = &[
    &["from", "tokenAmount"],
    &["from", "amount"],
    &["fromAmount"],
    &["amount"],
];
const TO_NETWORK_PATHS: &[&[&str]] = &[&["to", "blockchain"], &["toBlockchain"]];

impl GasDataRequest {
    /// Pulls token addresses and amount out of a trade. `None` when any of them is missing.
    pub fn from_trade(trade: &Value, network: &str) -> Option<Self> {
        let from_token = first_str_at_paths(trade, FROM_TOKEN_PATHS)?;
        let to_token = first_str_at_paths(trade, TO_TOKEN_PATHS)?;
        let amount = first_at_paths(trade, AMOUNT_PATHS).and_then(parse_positive_decimal)?;

        Some(Self {
            network: network.to_string(),
            to_network: first_str_at_paths(trade, TO_NETWORK_PATHS).map(normalize_network),
            from_token: from_token.to_string(),
            to_token: to_token.to_string(),
            amount,
        })
    }
}

/// A trade object produced by the swap SDK.
#[async_trait::async_trait]
pub trait SwapTrade: Send + Sync {
    /// The trade's data as the SDK exposes it.
    fn raw(&self) -> &Value;

    /// The trade's own gas estimation callback, when it has one.
    async fn gas_data(&self) -> EstimatorResult<Option<Value>> {
        Ok(None)
    }
}

#[async_trait::async_trait]
impl SwapTrade for Value {
    fn raw(&self) -> &Value {
        self
    }
}

/// The swap SDK instance. Missing managers answer `Ok(None)`.
#[async_trait::async_trait]
pub trait SwapSdk: Send + Sync {
    async fn cross_chain_gas_data(
        &self,
        _request: &GasDataRequest,
    ) -> EstimatorResult<Option<Value>> {
        Ok(None)
    }

    async fn on_chain_gas_data(&self, _request: &GasDataRequest) -> EstimatorResult<Option<Value>> {
        Ok(None)
    }

    /// Current gas price on `network` (canonical code).
    async fn gas_price(&self, _network: &str) -> EstimatorResult<Option<Value>> {
        Ok(None)
    }
}

/// SDK without any gas facilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSdk;

impl SwapSdk for NoSdk {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gas_data_request_from_trade() {
        let trade = json!({
            "from": { "address": "0xA0b8", "tokenAmount": "1.5", "blockchain": "ETH" },
            "to": { "address": "0x55d3", "blockchain": "BSC" }
        });

        let request = GasDataRequest::from_trade(&trade, "eth").unwrap();
        assert_eq!(request.from_token, "0xA0b8");
        assert_eq!(request.to_token, "0x55d3");
        assert_eq!(request.amount, Decimal::new(15, 1));
        assert_eq!(request.to_network.as_deref(), Some("bsc"));
    }

    #[test]
    fn test_gas_data_request_alternate_spellings() {
        let trade = json!({
            "fromTokenAddress": "0x1",
            "toToken": { "address": "0x2" },
            "fromAmount": 1000
        });

        let request = GasDataRequest::from_trade(&trade, "polygon").unwrap();
        assert_eq!(request.amount, Decimal::from(1000u64));
        assert_eq!(request.to_network, None);
    }

    #[test]
    fn test_gas_data_request_incomplete() {
        assert!(GasDataRequest::from_trade(&json!({ "from": { "address": "0x1" } }), "eth").is_none());
        assert!(
            GasDataRequest::from_trade(
                &json!({ "from": { "address": "0x1", "tokenAmount": "0" }, "to": { "address": "0x2" } }),
                "eth"
            )
            .is_none()
        );
        assert!(GasDataRequest::from_trade(&json!(null), "eth").is_none());
    }

    #[tokio::test]
    async fn test_defaults_report_nothing() {
        let request = GasDataRequest {
            network: "eth".to_string(),
            to_network: None,
            from_token: "0x1".to_string(),
            to_token: "0x2".to_string(),
            amount: Decimal::ONE,
        };
        assert_eq!(NoSdk.cross_chain_gas_data(&request).await.unwrap(), None);
        assert_eq!(NoSdk.on_chain_gas_data(&request).await.unwrap(), None);
        assert_eq!(NoSdk.gas_price("eth").await.unwrap(), None);
        assert_eq!(json!({}).gas_data().await.unwrap(), None);
    }
}
