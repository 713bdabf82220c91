use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::utils::number_conversion::parse_decimal;

/// Body of the price endpoint. Every field is optional: the provider is not trusted.
#[derive(Debug, Default, Deserialize)]
pub struct TokenPriceResponse {
    #[serde(default)]
    pub usd_price: Option<Value>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTokenPrice {
    Price(Decimal),
    Missing(String),
}

impl TokenPriceResponse {
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Validates `usd_price`; negative or unparsable values count as missing.
    pub fn parse(&self) -> ParsedTokenPrice {
        if let Some(price) = self.usd_price.as_ref().and_then(parse_decimal) {
            if price.is_sign_negative() {
                return ParsedTokenPrice::Missing(format!("Negative price {price}"));
            }
            return ParsedTokenPrice::Price(price);
        }

        let reason = [&self.error, &self.detail]
            .into_iter()
            .flatten()
            .find_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            });

        match (reason, &self.usd_price) {
            (Some(reason), _) => ParsedTokenPrice::Missing(reason),
            (None, Some(raw)) => ParsedTokenPrice::Missing(format!("Invalid price value {raw}")),
            (None, None) => ParsedTokenPrice::Missing("Price missing from response".to_string()),
        }
    }
}
