use error_stack::Report;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::error::Error;

pub const NATIVE_TOKEN_EVM_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";
pub const EVM_NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub const NATIVE_TOKEN_EVM_ADDRESSES: [&str; 2] = [NATIVE_TOKEN_EVM_ADDRESS, EVM_NULL_ADDRESS];

pub fn is_native_token_evm_address(address: &str) -> bool {
    NATIVE_TOKEN_EVM_ADDRESSES.contains(&address.trim().to_lowercase().as_str())
}

pub const NATIVE_TOKEN_SOLANA_ADDRESS: &str = "So11111111111111111111111111111111111111111";

pub const NATIVE_TOKEN_SOLANA_ADDRESSES: [&str; 2] = [
    NATIVE_TOKEN_SOLANA_ADDRESS,
    "11111111111111111111111111111111",
];

pub fn is_native_token_solana_address(address: &str) -> bool {
    NATIVE_TOKEN_SOLANA_ADDRESSES.contains(&address.trim())
}

pub const WRAPPED_NATIVE_TOKEN_SOLANA_ADDRESS: &str = "So11111111111111111111111111111111111111112";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, EnumIter, Hash)]
#[repr(u32)]
pub enum ChainId {
    Ethereum = 1,
    Bsc = 56,
    Polygon = 137,
    ArbitrumOne = 42161,
    Optimism = 10,
    Base = 8453,
    Avalanche = 43114,
    Fantom = 250,
    Linea = 59144,

    Solana = 7565164,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Hash)]
pub enum ChainType {
    EVM,
    Solana,
}

impl ChainId {
    pub fn supported_chains() -> Vec<ChainId> {
        ChainId::iter().collect()
    }

    pub fn to_chain_type(&self) -> ChainType {
        match self {
            Self::Solana => ChainType::Solana,
            _ => ChainType::EVM,
        }
    }

    /// Short lowercase code used to key every per-network table.
    pub fn network_code(&self) -> &'static str {
        match self {
            Self::Ethereum => "eth",
            Self::Bsc => "bsc",
            Self::Polygon => "polygon",
            Self::ArbitrumOne => "arbitrum",
            Self::Optimism => "optimism",
            Self::Base => "base",
            Self::Avalanche => "avalanche",
            Self::Fantom => "fantom",
            Self::Linea => "linea",
            Self::Solana => "solana",
        }
    }

    pub fn from_network_code(code: &str) -> Option<ChainId> {
        ChainId::iter().find(|chain| chain.network_code() == code)
    }
}

impl TryFrom<u32> for ChainId {
    type Error = Report<Error>;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        serde_json::from_str(&value.to_string()).map_err(|e| {
            Report::new(Error::ParseError)
                .attach_printable(format!("Failed to parse chain ID: {e}"))
        })
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ethereum => write!(f, "Ethereum"),
            Self::Bsc => write!(f, "BSC"),
            Self::Polygon => write!(f, "Polygon"),
            Self::ArbitrumOne => write!(f, "Arbitrum One"),
            Self::Optimism => write!(f, "Optimism"),
            Self::Base => write!(f, "Base"),
            Self::Avalanche => write!(f, "Avalanche"),
            Self::Fantom => write!(f, "Fantom"),
            Self::Linea => write!(f, "Linea"),
            Self::Solana => write!(f, "Solana"),
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EVM => write!(f, "EVM"),
            Self::Solana => write!(f, "Solana"),
        }
    }
}

impl ChainId {
    pub fn is_native_token(self, address: &str) -> bool {
        match self.to_chain_type() {
            ChainType::EVM => is_native_token_evm_address(address),
            ChainType::Solana => is_native_token_solana_address(address),
        }
    }

    /// ERC-20 (or SPL) contract that wraps the chain's native coin.
    pub fn wrapped_native_token_address(self) -> &'static str {
        match self {
            ChainId::Ethereum => "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            ChainId::Bsc => "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c",
            ChainId::Polygon => "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270",
            ChainId::ArbitrumOne => "0x82af49447d8a07e3bd95bd0d56f35241523fbab1",
            ChainId::Optimism | ChainId::Base => "0x4200000000000000000000000000000000000006",
            ChainId::Avalanche => "0xb31f66aa3c1e785363f0875a1b74e27b85fd66c7",
            ChainId::Fantom => "0x21be370d5312f44cb42ce377bc9b8a0cef1a4c83",
            ChainId::Linea => "0xe5d7c2a44ffddf6b295a15c148167daaaf5cf34f",
            ChainId::Solana => WRAPPED_NATIVE_TOKEN_SOLANA_ADDRESS,
        }
    }
}
