use crate::error::{Error, EstimatorResult};
use crate::utils::uint::hex_to_decimal;
use error_stack::report;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Base units per native coin on EVM chains (wei per ether).
pub const WEI_PER_NATIVE: u64 = 1_000_000_000_000_000_000;

/// Reads a quantity out of a loosely-typed JSON value.
///
/// Accepts JSON numbers, decimal or scientific strings, `0x` hex strings and
/// ethers-style `{ "hex": "0x.." }` / `{ "_hex": "0x.." }` objects.
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal_str(&number.to_string()),
        Value::String(s) => parse_decimal_str(s),
        Value::Object(map) => map
            .get("_hex")
            .or_else(|| map.get("hex"))
            .and_then(parse_decimal),
        _ => None,
    }
}

pub fn parse_decimal_str(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.starts_with("0x") || s.starts_with("0X") {
        return hex_to_decimal(s);
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Like [`parse_decimal`] but only keeps strictly positive quantities.
pub fn parse_positive_decimal(value: &Value) -> Option<Decimal> {
    parse_decimal(value).filter(|d| d.is_sign_positive() && !d.is_zero())
}

/// Converts base units (wei) to whole native coins.
pub fn wei_to_native(wei: Decimal) -> EstimatorResult<Decimal> {
    wei.checked_div(Decimal::from(WEI_PER_NATIVE)).ok_or_else(|| {
        report!(Error::GasComputation(format!(
            "Cannot convert {wei} wei to native units"
        )))
    })
}
