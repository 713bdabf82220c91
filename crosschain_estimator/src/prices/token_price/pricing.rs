use crate::{
    error::{Error, EstimatorResult, ReportDisplayExt as _},
    networks::{normalize_network, to_price_api_network},
    prices::{
        TokenPriceQuote,
        config::PriceApiConfig,
        native::is_native_address,
        token_price::{
            API_KEY_HEADER, TOKEN_PRICE_PATH,
            responses::{ParsedTokenPrice, TokenPriceResponse},
        },
    },
};
use crosschain_models::{
    error::Error as ModelsError,
    network::{client_rate_limit::Client, http::handle_reqwest_response},
};
use error_stack::{ResultExt as _, report};
use reqwest::Url;
use rust_decimal::Decimal;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct TokenPriceClient {
    client: Client,
    config: PriceApiConfig,
}

impl TokenPriceClient {
    pub fn new(config: PriceApiConfig) -> EstimatorResult<Self> {
        Url::parse(&config.base_url)
            .change_context(Error::ConfigError(format!(
                "Invalid price API URL: {}",
                config.base_url
            )))?;
        let client = Client::build(config.timeout, config.rate_limit)
            .change_context(Error::ModelsError)?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> EstimatorResult<Self> {
        Self::new(PriceApiConfig::from_env()?)
    }

    pub fn config(&self) -> &PriceApiConfig {
        &self.config
    }

    /// USD price of a token. Every failure mode reads as zero so callers never block on it.
    pub async fn get_token_price(&self, address: &str, network: &str) -> Decimal {
        match self.get_token_price_quote(address, network).await {
            Ok(quote) => {
                if let Some(reason) = &quote.error {
                    tracing::info!(
                        "No price for {} on {}: {}",
                        quote.address,
                        quote.network,
                        reason
                    );
                }
                quote.price_or_zero()
            }
            Err(e) => {
                tracing::error!(
                    "Price lookup failed for {address} on {network}: {} {}",
                    e.current_context(),
                    e.format()
                );
                Decimal::ZERO
            }
        }
    }

    /// Typed price lookup.
    ///
    /// "Not found" (404, malformed body, missing or invalid price) is a quote
    /// without price. Transport failures and other HTTP errors are returned as errors.
    pub async fn get_token_price_quote(
        &self,
        address: &str,
        network: &str,
    ) -> EstimatorResult<TokenPriceQuote> {
        let network = normalize_network(network);
        if is_native_address(address, &network) {
            return self.resolve_native_quote(&network, address.trim()).await;
        }
        self.fetch_contract_price_quote(address, &network).await
    }

    /// Queries the provider for a contract address. `network` must be canonical.
    pub(crate) async fn fetch_contract_price_quote(
        &self,
        address: &str,
        network: &str,
    ) -> EstimatorResult<TokenPriceQuote> {
        let address = normalize_address(address);
        if address.is_empty() {
            return Ok(TokenPriceQuote::not_found(
                network,
                &address,
                "Missing token address",
            ));
        }

        let url = self.price_url(network, &address)?;
        let mut request = self.client.inner_client().get(url.clone());
        if let Some(api_key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }
        let request = request
            .build()
            .change_context(Error::ReqwestError)
            .attach_printable("Error building token price request")?;

        let response = self
            .client
            .execute(request)
            .await
            .change_context(Error::ReqwestError)
            .attach_printable_lazy(|| format!("Error in token price request to {url}"))?;

        let body = match handle_reqwest_response::<Value>(response).await {
            Ok(body) => body,
            Err(e) => {
                let context = e.current_context();
                if context.status() == Some(404) {
                    tracing::debug!("Token {address} not found on {network}");
                    return Ok(TokenPriceQuote::not_found(
                        network,
                        &address,
                        "Token not found",
                    ));
                }
                if matches!(
                    context,
                    ModelsError::SerdeDeserialize(_) | ModelsError::ParseError
                ) {
                    tracing::warn!("Malformed price response for {address} on {network}: {e:?}");
                    return Ok(TokenPriceQuote::not_found(
                        network,
                        &address,
                        "Malformed price response",
                    ));
                }
                return Err(e
                    .change_context(Error::ResponseError)
                    .attach_printable(format!("Price request failed for {address} on {network}")));
            }
        };

        let quote = match TokenPriceResponse::from_value(body).map(|r| r.parse()) {
            Some(ParsedTokenPrice::Price(price)) => {
                TokenPriceQuote::found(network, &address, price)
            }
            Some(ParsedTokenPrice::Missing(reason)) => {
                TokenPriceQuote::not_found(network, &address, reason)
            }
            None => TokenPriceQuote::not_found(network, &address, "Malformed price response"),
        };

        Ok(quote)
    }

    fn price_url(&self, network: &str, address: &str) -> EstimatorResult<Url> {
        let mut url = Url::parse(&self.config.base_url).change_context(Error::ConfigError(
            format!("Invalid price API URL: {}", self.config.base_url),
        ))?;
        let price_network = to_price_api_network(network);
        url.path_segments_mut()
            .map_err(|_| {
                report!(Error::ConfigError(format!(
                    "Price API URL cannot be a base: {}",
                    self.config.base_url
                )))
            })?
            .pop_if_empty()
            .extend(TOKEN_PRICE_PATH)
            .extend([price_network.as_str(), address]);
        Ok(url)
    }
}

/// EVM addresses are case-insensitive; other address formats are kept as they are.
fn normalize_address(address: &str) -> String {
    let address = address.trim();
    if address.starts_with("0x") || address.starts_with("0X") {
        address.to_lowercase()
    } else {
        address.to_string()
    }
}
