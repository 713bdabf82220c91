use rust_decimal::Decimal;
use serde_json::Value;

use crate::utils::{
    json::first_at_paths,
    number_conversion::{parse_decimal, parse_positive_decimal},
};

/// Whatever gas information one source managed to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasFields {
    pub gas_price: Option<Decimal>,
    pub gas_limit: Option<Decimal>,
    pub gas_price_in_usd: Option<Decimal>,
}

impl GasFields {
    /// A source counts as successful once it yields a positive price or a USD cost (zero included).
    pub fn is_usable(&self) -> bool {
        self.gas_price.is_some() || self.gas_price_in_usd.is_some()
    }
}

const GAS_PRICE_KEYS: &[&[&str]] = &[
    &["gasPrice"],
    &["gas_price"],
    &["maxFeePerGas"],
    &["price"],
];
const GAS_LIMIT_KEYS: &[&[&str]] = &[&["gasLimit"], &["gas_limit"], &["gas"], &["limit"]];
const GAS_USD_KEYS: &[&[&str]] = &[
    &["gasPriceInUsd"],
    &["gasFeeInUsd"],
    &["gas_price_in_usd"],
    &["gasUsd"],
    &["feeInUsd"],
];

/// Zero is a valid USD cost, negatives are not.
fn parse_usd(value: &Value) -> Option<Decimal> {
    parse_decimal(value).filter(|usd| !usd.is_sign_negative())
}

fn is_number_wrapper(map: &serde_json::Map<String, Value>) -> bool {
    map.contains_key("_hex") || map.contains_key("hex")
}

/// Reads gas fields from the shapes SDKs have been seen to return:
/// an object with named fields, a `[gasPrice, gasLimit, usd?]` array,
/// or a bare quantity standing for the gas price.
pub fn parse_gas_fields(value: &Value) -> Option<GasFields> {
    let fields = match value {
        Value::Object(map) if !is_number_wrapper(map) => GasFields {
            gas_price: first_at_paths(value, GAS_PRICE_KEYS).and_then(parse_positive_decimal),
            gas_limit: first_at_paths(value, GAS_LIMIT_KEYS).and_then(parse_positive_decimal),
            gas_price_in_usd: first_at_paths(value, GAS_USD_KEYS).and_then(parse_usd),
        },
        Value::Array(items) => GasFields {
            gas_price: items.first().and_then(parse_positive_decimal),
            gas_limit: items.get(1).and_then(parse_positive_decimal),
            gas_price_in_usd: items.get(2).and_then(parse_usd),
        },
        Value::Null | Value::Bool(_) => return None,
        scalar => GasFields {
            gas_price: parse_positive_decimal(scalar),
            ..GasFields::default()
        },
    };

    fields.is_usable().then_some(fields)
}
