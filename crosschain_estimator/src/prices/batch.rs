use std::time::Duration;

use futures_util::future::join_all;

use crate::{
    networks::normalize_network,
    prices::{TokenPriceQuote, token_price::pricing::TokenPriceClient},
};

/// Fixed-size window of concurrent lookups, with a pause between windows
/// to stay under the provider's rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchWindow {
    pub size: usize,
    pub delay: Duration,
}

impl Default for BatchWindow {
    fn default() -> Self {
        Self {
            size: 5,
            delay: Duration::from_millis(200),
        }
    }
}

impl TokenPriceClient {
    /// Prices `(address, network)` pairs, preserving input order.
    /// Failed lookups come back as quotes without price.
    pub async fn get_token_prices(
        &self,
        tokens: &[(String, String)],
        window: BatchWindow,
    ) -> Vec<TokenPriceQuote> {
        let mut quotes = Vec::with_capacity(tokens.len());
        let size = window.size.max(1);

        for (index, chunk) in tokens.chunks(size).enumerate() {
            if index > 0 && !window.delay.is_zero() {
                tokio::time::sleep(window.delay).await;
            }

            let results = join_all(
                chunk
                    .iter()
                    .map(|(address, network)| self.get_token_price_quote(address, network)),
            )
            .await;

            for ((address, network), result) in chunk.iter().zip(results) {
                let quote = result.unwrap_or_else(|e| {
                    tracing::warn!(
                        "Batch price lookup failed for {address} on {network}: {}",
                        e.current_context()
                    );
                    TokenPriceQuote::not_found(
                        &normalize_network(network),
                        address,
                        e.current_context().to_string(),
                    )
                });
                quotes.push(quote);
            }
        }

        quotes
    }
}
