//! Gas extraction strategies, tried in order by the estimator.
//!
//! Each strategy looks at one place a swap SDK has been known to put gas
//! data. Answering `Ok(None)` means "nothing here", errors are logged by the
//! estimator and the next strategy is tried.

use crosschain_models::constants::chains::ChainId;
use serde_json::Value;

use crate::{
    error::EstimatorResult,
    gas::{
        GasEstimateSource,
        defaults::default_gas_limit,
        parsing::{GasFields, parse_gas_fields},
        sdk::{GasDataRequest, SwapSdk, SwapTrade},
    },
    utils::json::value_at_path,
};

/// Everything a strategy may look at for one trade.
pub struct ExtractionContext<'a> {
    pub sdk: &'a dyn SwapSdk,
    pub trade: &'a dyn SwapTrade,
    /// Canonical network code
    pub network: &'a str,
    pub chain: Option<ChainId>,
    pub is_cross_chain: bool,
}

#[async_trait::async_trait]
pub trait GasExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn source(&self) -> GasEstimateSource {
        GasEstimateSource::Custom(self.name())
    }

    async fn try_extract(&self, ctx: &ExtractionContext<'_>) -> EstimatorResult<Option<GasFields>>;
}

fn parse_at(value: &Value, path: &[&str]) -> Option<GasFields> {
    value_at_path(value, path).and_then(parse_gas_fields)
}

/// `gasData` on the trade itself, then `gasFeeInfo` for same-chain trades.
pub struct DirectFields;

#[async_trait::async_trait]
impl GasExtractionStrategy for DirectFields {
    fn name(&self) -> &'static str {
        "direct_fields"
    }

    fn source(&self) -> GasEstimateSource {
        GasEstimateSource::DirectFields
    }

    async fn try_extract(&self, ctx: &ExtractionContext<'_>) -> EstimatorResult<Option<GasFields>> {
        let raw = ctx.trade.raw();
        let fields = parse_at(raw, &["gasData"]).or_else(|| {
            if ctx.is_cross_chain {
                None
            } else {
                parse_at(raw, &["gasFeeInfo"])
            }
        });
        Ok(fields)
    }
}

/// The trade's own gas callback.
pub struct TradeCallback;

#[async_trait::async_trait]
impl GasExtractionStrategy for TradeCallback {
    fn name(&self) -> &'static str {
        "trade_callback"
    }

    fn source(&self) -> GasEstimateSource {
        GasEstimateSource::TradeCallback
    }

    async fn try_extract(&self, ctx: &ExtractionContext<'_>) -> EstimatorResult<Option<GasFields>> {
        let gas_data = ctx.trade.gas_data().await?;
        Ok(gas_data.as_ref().and_then(parse_gas_fields))
    }
}

/// The SDK's cross-chain or on-chain manager, asked to estimate the trade.
pub struct ManagerEstimate;

#[async_trait::async_trait]
impl GasExtractionStrategy for ManagerEstimate {
    fn name(&self) -> &'static str {
        "manager_estimate"
    }

    fn source(&self) -> GasEstimateSource {
        GasEstimateSource::ManagerEstimate
    }

    async fn try_extract(&self, ctx: &ExtractionContext<'_>) -> EstimatorResult<Option<GasFields>> {
        let Some(request) = GasDataRequest::from_trade(ctx.trade.raw(), ctx.network) else {
            tracing::debug!("Trade lacks token addresses or amount, skipping manager estimate");
            return Ok(None);
        };

        let gas_data = if ctx.is_cross_chain {
            ctx.sdk.cross_chain_gas_data(&request).await?
        } else {
            ctx.sdk.on_chain_gas_data(&request).await?
        };
        Ok(gas_data.as_ref().and_then(parse_gas_fields))
    }
}

/// Current network gas price from the SDK, priced with the default gas limit.
pub struct SdkGasPrice;

#[async_trait::async_trait]
impl GasExtractionStrategy for SdkGasPrice {
    fn name(&self) -> &'static str {
        "sdk_gas_price"
    }

    fn source(&self) -> GasEstimateSource {
        GasEstimateSource::SdkGasPrice
    }

    async fn try_extract(&self, ctx: &ExtractionContext<'_>) -> EstimatorResult<Option<GasFields>> {
        let Some(gas_price) = ctx.sdk.gas_price(ctx.network).await? else {
            return Ok(None);
        };

        Ok(parse_gas_fields(&gas_price).map(|fields| GasFields {
            gas_limit: fields.gas_limit.or(Some(default_gas_limit())),
            ..fields
        }))
    }
}

const NESTED_GAS_DATA_PATHS: &[&[&str]] = &[
    &["trade", "gasData"],
    &["crossChain", "gasData"],
    &["onChainTrade", "gasData"],
];

/// `gasData` under the wrapper objects some SDK versions nest trades in.
pub struct NestedShapes;

#[async_trait::async_trait]
impl GasExtractionStrategy for NestedShapes {
    fn name(&self) -> &'static str {
        "nested_shapes"
    }

    fn source(&self) -> GasEstimateSource {
        GasEstimateSource::NestedShapes
    }

    async fn try_extract(&self, ctx: &ExtractionContext<'_>) -> EstimatorResult<Option<GasFields>> {
        let raw = ctx.trade.raw();
        Ok(NESTED_GAS_DATA_PATHS
            .iter()
            .find_map(|path| parse_at(raw, path)))
    }
}

pub fn default_strategies() -> Vec<Box<dyn GasExtractionStrategy>> {
    vec![
        Box::new(DirectFields),
        Box::new(TradeCallback),
        Box::new(ManagerEstimate),
        Box::new(SdkGasPrice),
        Box::new(NestedShapes),
    ]
}
