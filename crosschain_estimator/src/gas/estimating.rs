use std::sync::Arc;

use crosschain_models::constants::chains::ChainId;
use error_stack::{ResultExt, report};
use rust_decimal::Decimal;

use crate::{
    error::{Error, EstimatorResult, GasPriceError, ReportDisplayExt},
    gas::{
        GasEstimate, GasEstimateSource,
        defaults::{default_gas_limit, default_gas_usd, is_high_gas_price},
        parsing::GasFields,
        sdk::{SwapSdk, SwapTrade},
        strategies::{ExtractionContext, GasExtractionStrategy, default_strategies},
    },
    networks::{network_chain, normalize_network},
    prices::NativePriceSource,
    utils::{
        json::value_at_path,
        number_conversion::{parse_positive_decimal, wei_to_native},
    },
};

lazy_static::lazy_static! {
    static ref DEFAULT_GAS_ESTIMATOR: GasEstimator = GasEstimator::default();
}

/// Turns whatever gas data a swap SDK trade carries into a [`GasEstimate`].
pub struct GasEstimator {
    strategies: Vec<Box<dyn GasExtractionStrategy>>,
    price_source: Option<Arc<dyn NativePriceSource>>,
}

impl Default for GasEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl GasEstimator {
    /// Default strategy chain, no native price source.
    pub fn new() -> Self {
        Self {
            strategies: default_strategies(),
            price_source: None,
        }
    }

    pub fn with_price_source(mut self, price_source: Arc<dyn NativePriceSource>) -> Self {
        self.price_source = Some(price_source);
        self
    }

    /// Replaces the strategy chain. Strategies are tried in the given order.
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn GasExtractionStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Runs the strategies in order and stops at the first usable answer.
    ///
    /// Strategy failures are logged and skipped. A strategy whose data cannot
    /// be priced (e.g. arithmetic overflow) is skipped as well, and its
    /// classified [`GasPriceError`] is carried on the estimate that is finally
    /// returned. The static per-chain default always succeeds, so every trade
    /// gets a best-effort estimate.
    pub async fn extract_gas_estimate(
        &self,
        sdk: &dyn SwapSdk,
        trade: &dyn SwapTrade,
        chain: &str,
        is_cross_chain: bool,
    ) -> EstimatorResult<GasEstimate> {
        let network = normalize_network(chain);
        let ctx = ExtractionContext {
            sdk,
            trade,
            network: &network,
            chain: network_chain(&network),
            is_cross_chain,
        };
        let mut gas_error = None;

        for strategy in &self.strategies {
            let fields = match strategy.try_extract(&ctx).await {
                Ok(Some(fields)) if fields.is_usable() => fields,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(
                        "Gas strategy {} failed on {network}: {} {}",
                        strategy.name(),
                        e.current_context(),
                        e.format()
                    );
                    continue;
                }
            };

            tracing::debug!("Gas data on {network} found by {}", strategy.name());
            match self
                .estimate_from_fields(&ctx, fields, strategy.source())
                .await
            {
                Ok(estimate) => {
                    return Ok(GasEstimate {
                        gas_error,
                        ..estimate
                    });
                }
                Err(e) => {
                    let kind = GasPriceError::from_report(&e);
                    tracing::warn!(
                        "Gas data from {} on {network} could not be priced: {kind}",
                        strategy.name()
                    );
                    if gas_error.is_none() {
                        gas_error = Some(kind);
                    }
                }
            }
        }

        tracing::info!("No usable gas data found on {network}, using static default");
        Ok(static_default_estimate(&ctx, gas_error))
    }

    async fn estimate_from_fields(
        &self,
        ctx: &ExtractionContext<'_>,
        fields: GasFields,
        source: GasEstimateSource,
    ) -> EstimatorResult<GasEstimate> {
        let gas_price = fields.gas_price.unwrap_or(Decimal::ZERO);
        let gas_limit = fields.gas_limit.unwrap_or_else(default_gas_limit);

        let gas_price_in_usd = match fields.gas_price_in_usd {
            Some(usd) => usd,
            None => self.gas_cost_in_usd(ctx, gas_price, gas_limit).await?,
        }
        .max(Decimal::ZERO);

        Ok(GasEstimate {
            gas_price,
            gas_limit,
            gas_price_in_usd,
            is_high_gas_price: is_high_gas_price(ctx.chain, gas_price_in_usd),
            source,
            gas_error: None,
        })
    }

    /// `gas_price * gas_limit` wei, priced in the chain's native coin.
    /// Falls back to the static default when the native price is unknown.
    async fn gas_cost_in_usd(
        &self,
        ctx: &ExtractionContext<'_>,
        gas_price: Decimal,
        gas_limit: Decimal,
    ) -> EstimatorResult<Decimal> {
        let wei = gas_price.checked_mul(gas_limit).ok_or_else(|| {
            report!(Error::GasComputation(format!(
                "Gas cost overflow: {gas_price} x {gas_limit}"
            )))
        })?;
        let native_amount = wei_to_native(wei)?;

        let native_price = match &self.price_source {
            Some(source) => source.native_usd_price(ctx.network).await,
            None => Decimal::ZERO,
        };
        if native_price <= Decimal::ZERO {
            tracing::info!(
                "No native price for {}, using static gas default",
                ctx.network
            );
            return Ok(default_gas_usd(ctx.chain, ctx.is_cross_chain));
        }

        native_amount
            .checked_mul(native_price)
            .ok_or_else(|| report!(Error::GasComputation("Gas USD cost overflow".to_string())))
            .attach_printable_lazy(|| format!("native amount: {native_amount}, price: {native_price}"))
    }
}

fn static_default_estimate(
    ctx: &ExtractionContext<'_>,
    gas_error: Option<GasPriceError>,
) -> GasEstimate {
    let raw = ctx.trade.raw();
    let raw_field = |key: &str| {
        value_at_path(raw, &[key])
            .and_then(parse_positive_decimal)
            .unwrap_or(Decimal::ZERO)
    };
    let gas_price_in_usd = default_gas_usd(ctx.chain, ctx.is_cross_chain);

    GasEstimate {
        gas_price: raw_field("gasPrice"),
        gas_limit: raw_field("gasLimit"),
        gas_price_in_usd,
        is_high_gas_price: is_high_gas_price(ctx.chain, gas_price_in_usd),
        source: GasEstimateSource::StaticDefault,
        gas_error,
    }
}

/// [`GasEstimator::extract_gas_estimate`] with the default strategies and no native price source.
pub async fn extract_gas_estimate(
    sdk: &dyn SwapSdk,
    trade: &dyn SwapTrade,
    chain: &str,
    is_cross_chain: bool,
) -> EstimatorResult<GasEstimate> {
    DEFAULT_GAS_ESTIMATOR
        .extract_gas_estimate(sdk, trade, chain, is_cross_chain)
        .await
}

/// Static default estimate for a chain, without looking at any trade.
pub fn default_gas_estimate(chain: Option<ChainId>, is_cross_chain: bool) -> GasEstimate {
    let gas_price_in_usd = default_gas_usd(chain, is_cross_chain);
    GasEstimate {
        gas_price: Decimal::ZERO,
        gas_limit: default_gas_limit(),
        gas_price_in_usd,
        is_high_gas_price: is_high_gas_price(chain, gas_price_in_usd),
        source: GasEstimateSource::StaticDefault,
        gas_error: None,
    }
}
