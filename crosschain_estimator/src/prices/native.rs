use crate::{
    error::EstimatorResult,
    networks::{network_chain, normalize_network},
    prices::{NativePriceSource, TokenPriceQuote, token_price::pricing::TokenPriceClient},
};
use crosschain_models::constants::chains::{EVM_NULL_ADDRESS, is_native_token_evm_address};
use rust_decimal::Decimal;

/// Conventional stand-in for a chain's native coin.
pub const NATIVE_SENTINEL_ADDRESS: &str = EVM_NULL_ADDRESS;

/// The zero address, and the `0xeee…` convention some routers use, both mean "native coin"
/// everywhere. Chains with their own convention (the Solana native mint) are checked too.
pub fn is_native_address(address: &str, network: &str) -> bool {
    is_native_token_evm_address(address)
        || network_chain(network).is_some_and(|chain| chain.is_native_token(address))
}

/// Wrapped-native contract used as the native coin's price proxy.
pub fn wrapped_native_address(network: &str) -> Option<&'static str> {
    network_chain(network).map(|chain| chain.wrapped_native_token_address())
}

impl TokenPriceClient {
    /// Native coin price, defined as the price of its wrapped token. Zero when unknown.
    pub async fn resolve_native_price(&self, network: &str) -> Decimal {
        let network = normalize_network(network);
        match self
            .resolve_native_quote(&network, NATIVE_SENTINEL_ADDRESS)
            .await
        {
            Ok(quote) => quote.price_or_zero(),
            Err(e) => {
                tracing::error!(
                    "Native price lookup failed on {network}: {}",
                    e.current_context()
                );
                Decimal::ZERO
            }
        }
    }

    /// `network` must be canonical. The quote keeps `native_address`, the address the caller asked for.
    pub(crate) async fn resolve_native_quote(
        &self,
        network: &str,
        native_address: &str,
    ) -> EstimatorResult<TokenPriceQuote> {
        let Some(wrapped) = wrapped_native_address(network) else {
            tracing::warn!("No wrapped native token known for network {network}");
            return Ok(TokenPriceQuote::not_found(
                network,
                native_address,
                format!("No wrapped native token for network {network}"),
            ));
        };

        let mut quote = self.fetch_contract_price_quote(wrapped, network).await?;
        quote.address = native_address.to_string();
        Ok(quote)
    }
}

#[async_trait::async_trait]
impl NativePriceSource for TokenPriceClient {
    async fn native_usd_price(&self, network: &str) -> Decimal {
        self.resolve_native_price(network).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mock_price_api::{WBNB, WETH, WRAPPED_SOL, spawn_mock_price_api};
    use crosschain_models::constants::chains::NATIVE_TOKEN_SOLANA_ADDRESS;
    use std::str::FromStr;

    #[test]
    fn test_wrapped_native_address() {
        assert_eq!(
            wrapped_native_address("eth"),
            Some("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")
        );
        assert_eq!(wrapped_native_address("BNB Chain"), Some(WBNB));
        assert_eq!(
            wrapped_native_address("matic"),
            Some("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270")
        );
        assert_eq!(wrapped_native_address("moonbeam"), None);
    }

    #[test]
    fn test_is_native_address() {
        assert!(is_native_address(NATIVE_SENTINEL_ADDRESS, "eth"));
        assert!(is_native_address(
            "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE",
            "bsc"
        ));
        assert!(is_native_address(NATIVE_SENTINEL_ADDRESS, "moonbeam"));
        assert!(!is_native_address(WETH, "eth"));

        assert!(is_native_address(NATIVE_TOKEN_SOLANA_ADDRESS, "sol"));
        assert!(!is_native_address(NATIVE_TOKEN_SOLANA_ADDRESS, "eth"));
        assert!(!is_native_address(WRAPPED_SOL, "solana"));
    }

    #[tokio::test]
    async fn test_native_price_queries_wrapped_token() {
        let api = spawn_mock_price_api().await;
        let client = api.client();

        let native = client
            .get_token_price(NATIVE_SENTINEL_ADDRESS, "eth")
            .await;
        let wrapped = client.get_token_price(WETH, "eth").await;

        assert_eq!(native, Decimal::from_str("3150.25").unwrap());
        assert_eq!(native, wrapped);
        assert_eq!(
            api.requested_paths(),
            vec![
                format!("/api/v2/tokens/price/eth/{WETH}"),
                format!("/api/v2/tokens/price/eth/{WETH}"),
            ]
        );
    }

    #[tokio::test]
    async fn test_native_quote_keeps_sentinel_address() {
        let api = spawn_mock_price_api().await;
        let client = api.client();

        let quote = client
            .get_token_price_quote(NATIVE_SENTINEL_ADDRESS, "BNB-Chain")
            .await
            .unwrap();
        assert_eq!(quote.network, "bsc");
        assert_eq!(quote.address, NATIVE_SENTINEL_ADDRESS);
        assert_eq!(quote.usd_price, Decimal::from_str("590.10").ok());
    }

    #[tokio::test]
    async fn test_solana_native_mint_resolves_to_wrapped_sol() {
        let api = spawn_mock_price_api().await;
        let client = api.client();

        let quote = client
            .get_token_price_quote(NATIVE_TOKEN_SOLANA_ADDRESS, "SOL")
            .await
            .unwrap();
        assert_eq!(quote.network, "solana");
        assert_eq!(quote.address, NATIVE_TOKEN_SOLANA_ADDRESS);
        assert_eq!(quote.usd_price, Decimal::from_str("145.30").ok());
        assert_eq!(
            api.requested_paths(),
            vec![format!("/api/v2/tokens/price/solana/{WRAPPED_SOL}")]
        );
    }

    #[tokio::test]
    async fn test_native_price_without_mapping_is_zero() {
        let api = spawn_mock_price_api().await;
        let client = api.client();

        assert_eq!(client.resolve_native_price("moonbeam").await, Decimal::ZERO);
        assert_eq!(
            client.get_token_price(NATIVE_SENTINEL_ADDRESS, "moonbeam").await,
            Decimal::ZERO
        );
        assert!(api.requested_paths().is_empty());
    }

    #[tokio::test]
    async fn test_native_price_source() {
        let api = spawn_mock_price_api().await;
        let source: &dyn NativePriceSource = &api.client();
        assert_eq!(
            source.native_usd_price("polygon").await,
            Decimal::from_str("0.52").unwrap()
        );
    }
}
