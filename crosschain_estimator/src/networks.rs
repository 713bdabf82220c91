//! Network identifier normalisation.
//!
//! Callers hand us network names in whatever vocabulary they have at hand
//! (UI labels, URL parameters, SDK constants, numeric chain ids). Everything
//! is folded into the short canonical code of [`ChainId::network_code`], and
//! from there into the pricing API's own vocabulary.

use crosschain_models::constants::chains::ChainId;

/// Returned when the input carries no usable characters at all.
pub const DEFAULT_NETWORK: &str = "eth";

const NETWORK_ALIASES: &[(&str, &str)] = &[
    // Ethereum
    ("ethereum", "eth"),
    ("ether", "eth"),
    ("mainnet", "eth"),
    ("eth-mainnet", "eth"),
    ("ethereum-mainnet", "eth"),
    // BNB chain
    ("bnb", "bsc"),
    ("bnb-chain", "bsc"),
    ("bnb-smart-chain", "bsc"),
    ("binance", "bsc"),
    ("binance-smart-chain", "bsc"),
    ("bsc-mainnet", "bsc"),
    // Polygon
    ("matic", "polygon"),
    ("pol", "polygon"),
    ("polygon-pos", "polygon"),
    ("polygon-mainnet", "polygon"),
    // Arbitrum
    ("arbitrum-one", "arbitrum"),
    ("arb", "arbitrum"),
    ("arbitrum-mainnet", "arbitrum"),
    // Optimism
    ("op", "optimism"),
    ("optimism-mainnet", "optimism"),
    // Base
    ("base-mainnet", "base"),
    // Avalanche
    ("avax", "avalanche"),
    ("avalanche-c-chain", "avalanche"),
    ("avalanche-c", "avalanche"),
    // Fantom
    ("ftm", "fantom"),
    ("fantom-opera", "fantom"),
    // Linea
    ("linea-mainnet", "linea"),
    // Solana
    ("sol", "solana"),
    ("solana-mainnet", "solana"),
];

const PRICE_API_NETWORKS: &[(&str, &str)] = &[
    ("eth", "eth"),
    ("bsc", "binance-smart-chain"),
    ("polygon", "polygon"),
    ("arbitrum", "arbitrum"),
    ("optimism", "optimism"),
    ("base", "base"),
    ("avalanche", "avalanche"),
    ("fantom", "fantom"),
    ("linea", "linea"),
    ("solana", "solana"),
];

/// Lowercases and turns every run of non-alphanumeric characters into a single hyphen.
/// Letters outside ASCII are kept, so an unknown name never folds onto a known code.
fn fold_identifier(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.trim().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !folded.is_empty() {
                folded.push('-');
            }
            pending_separator = false;
            folded.extend(c.to_lowercase().filter(|l| l.is_alphanumeric()));
        } else {
            pending_separator = true;
        }
    }

    folded
}

/// Numeric chain ids, e.g. `"42161"`.
fn chain_from_id(folded: &str) -> Option<ChainId> {
    let id = folded.parse::<u32>().ok()?;
    ChainId::try_from(id).ok()
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| *target)
}

/// Maps any network identifier to its canonical code.
///
/// Unknown identifiers come back folded (lowercase, hyphen separated) so the
/// function is idempotent: feeding its output back in returns the same value.
pub fn normalize_network(input: &str) -> String {
    let folded = fold_identifier(input);
    if folded.is_empty() {
        tracing::debug!("Empty network identifier {input:?}, using {DEFAULT_NETWORK}");
        return DEFAULT_NETWORK.to_string();
    }

    if ChainId::from_network_code(&folded).is_some() {
        return folded;
    }
    if let Some(chain) = chain_from_id(&folded) {
        return chain.network_code().to_string();
    }

    match lookup(NETWORK_ALIASES, &folded) {
        Some(canonical) => canonical.to_string(),
        None => {
            tracing::debug!("Unknown network identifier {input:?}, passing through as {folded}");
            folded
        }
    }
}

/// Typed lookup; `None` means the network is not one we hold tables for.
pub fn network_chain(input: &str) -> Option<ChainId> {
    ChainId::from_network_code(&normalize_network(input))
}

/// Name of the network in the pricing API's path vocabulary.
pub fn to_price_api_network(input: &str) -> String {
    let canonical = normalize_network(input);
    match lookup(PRICE_API_NETWORKS, &canonical) {
        Some(name) => name.to_string(),
        None => canonical,
    }
}
