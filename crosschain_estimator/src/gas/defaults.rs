use crosschain_models::constants::chains::ChainId;
use rust_decimal::Decimal;

/// Gas limit assumed when a source reports a price but no limit.
pub const DEFAULT_GAS_LIMIT: u64 = 250_000;

/// USD cost assumed when no live gas data can be recovered, in cents.
/// Columns: same-chain, cross-chain.
const DEFAULT_GAS_USD_CENTS: &[(ChainId, i64, i64)] = &[
    (ChainId::Ethereum, 800, 1500),
    (ChainId::Bsc, 30, 60),
    (ChainId::Polygon, 5, 15),
    (ChainId::ArbitrumOne, 30, 80),
    (ChainId::Optimism, 20, 60),
    (ChainId::Base, 10, 40),
    (ChainId::Avalanche, 40, 100),
    (ChainId::Fantom, 5, 20),
    (ChainId::Linea, 20, 60),
    (ChainId::Solana, 1, 5),
];
const UNKNOWN_CHAIN_GAS_USD_CENTS: (i64, i64) = (200, 500);

/// Above this USD cost a trade is flagged as expensive, in cents.
const HIGH_GAS_THRESHOLD_CENTS: &[(ChainId, i64)] = &[
    (ChainId::Ethereum, 1200),
    (ChainId::Bsc, 200),
    (ChainId::Polygon, 150),
    (ChainId::ArbitrumOne, 200),
    (ChainId::Optimism, 200),
    (ChainId::Base, 150),
    (ChainId::Avalanche, 250),
    (ChainId::Fantom, 100),
    (ChainId::Linea, 200),
    (ChainId::Solana, 50),
];
const UNKNOWN_CHAIN_HIGH_GAS_THRESHOLD_CENTS: i64 = 300;

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

pub fn default_gas_limit() -> Decimal {
    Decimal::from(DEFAULT_GAS_LIMIT)
}

pub fn default_gas_usd(chain: Option<ChainId>, is_cross_chain: bool) -> Decimal {
    let (same_chain, cross_chain) = chain
        .and_then(|chain| {
            DEFAULT_GAS_USD_CENTS
                .iter()
                .find(|(c, _, _)| *c == chain)
                .map(|(_, same, cross)| (*same, *cross))
        })
        .unwrap_or(UNKNOWN_CHAIN_GAS_USD_CENTS);

    cents(if is_cross_chain { cross_chain } else { same_chain })
}

pub fn high_gas_threshold(chain: Option<ChainId>) -> Decimal {
    let threshold = chain
        .and_then(|chain| {
            HIGH_GAS_THRESHOLD_CENTS
                .iter()
                .find(|(c, _)| *c == chain)
                .map(|(_, threshold)| *threshold)
        })
        .unwrap_or(UNKNOWN_CHAIN_HIGH_GAS_THRESHOLD_CENTS);

    cents(threshold)
}

/// Strictly above the chain's threshold.
pub fn is_high_gas_price(chain: Option<ChainId>, gas_price_in_usd: Decimal) -> bool {
    gas_price_in_usd > high_gas_threshold(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_every_chain_has_defaults() {
        for chain in ChainId::supported_chains() {
            assert!(DEFAULT_GAS_USD_CENTS.iter().any(|(c, _, _)| *c == chain));
            assert!(HIGH_GAS_THRESHOLD_CENTS.iter().any(|(c, _)| *c == chain));
        }
    }

    #[test]
    fn test_high_gas_threshold_is_strict() {
        let eth = Some(ChainId::Ethereum);
        assert!(is_high_gas_price(eth, Decimal::from_str("12.01").unwrap()));
        assert!(!is_high_gas_price(eth, Decimal::from_str("12.00").unwrap()));
        assert!(!is_high_gas_price(eth, Decimal::from_str("11.99").unwrap()));

        let polygon = Some(ChainId::Polygon);
        assert_eq!(high_gas_threshold(polygon), Decimal::from_str("1.5").unwrap());
        assert!(is_high_gas_price(polygon, Decimal::from_str("1.51").unwrap()));
    }

    #[test]
    fn test_unknown_chain_defaults() {
        assert_eq!(high_gas_threshold(None), Decimal::from(3u64));
        assert!(is_high_gas_price(None, Decimal::from_str("3.01").unwrap()));
        assert!(!is_high_gas_price(None, Decimal::from(3u64)));
        assert_eq!(default_gas_usd(None, false), Decimal::from(2u64));
        assert_eq!(default_gas_usd(None, true), Decimal::from(5u64));
    }

    #[test]
    fn test_cross_chain_defaults_cost_more() {
        for chain in ChainId::supported_chains() {
            assert!(default_gas_usd(Some(chain), true) > default_gas_usd(Some(chain), false));
        }
        assert_eq!(
            default_gas_usd(Some(ChainId::Ethereum), false),
            Decimal::from(8u64)
        );
    }
}
