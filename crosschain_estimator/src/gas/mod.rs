use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::GasPriceError;

pub mod defaults;
pub mod estimating;
pub mod parsing;
pub mod sdk;
pub mod strategies;

/// Where a [`GasEstimate`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GasEstimateSource {
    DirectFields,
    TradeCallback,
    ManagerEstimate,
    SdkGasPrice,
    NestedShapes,
    /// A caller-supplied strategy, by name
    Custom(&'static str),
    /// Nothing usable was found and the static per-chain table was used
    StaticDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimate {
    /// In wei, zero when unknown
    pub gas_price: Decimal,
    pub gas_limit: Decimal,
    /// Never negative
    pub gas_price_in_usd: Decimal,
    pub is_high_gas_price: bool,
    pub source: GasEstimateSource,
    /// First pricing failure met on the way, when an earlier source was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_error: Option<GasPriceError>,
}

impl GasEstimate {
    pub fn is_static_default(&self) -> bool {
        self.source == GasEstimateSource::StaticDefault
    }
}
