//! Chain context and named network configuration

use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The chain and contract an EIP-712 domain is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainContext {
    /// Chain ID
    pub chain_id: u64,
    /// The Safe whose domain is being hashed
    pub verifying_contract: Address,
}

impl ChainContext {
    /// Creates a new chain context
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            chain_id,
            verifying_contract,
        }
    }

    /// Returns a context on the same chain for another Safe
    pub fn with_contract(&self, verifying_contract: Address) -> Self {
        Self::new(self.chain_id, verifying_contract)
    }
}

/// Networks that can be selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Ethereum,
    Sepolia,
    Arbitrum,
    Optimism,
    Base,
    BaseSepolia,
    Polygon,
    PolygonZkEvm,
    Bsc,
    Avalanche,
    Gnosis,
    GnosisChiado,
    Zksync,
    ZksyncSepolia,
    Linea,
    Scroll,
    Celo,
    Mantle,
    Aurora,
    Worldchain,
    Blast,
}

impl Network {
    /// Every named network, in display order
    pub const ALL: [Network; 21] = [
        Network::Ethereum,
        Network::Sepolia,
        Network::Arbitrum,
        Network::Optimism,
        Network::Base,
        Network::BaseSepolia,
        Network::Polygon,
        Network::PolygonZkEvm,
        Network::Bsc,
        Network::Avalanche,
        Network::Gnosis,
        Network::GnosisChiado,
        Network::Zksync,
        Network::ZksyncSepolia,
        Network::Linea,
        Network::Scroll,
        Network::Celo,
        Network::Mantle,
        Network::Aurora,
        Network::Worldchain,
        Network::Blast,
    ];

    /// Returns the name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Sepolia => "sepolia",
            Network::Arbitrum => "arbitrum",
            Network::Optimism => "optimism",
            Network::Base => "base",
            Network::BaseSepolia => "base-sepolia",
            Network::Polygon => "polygon",
            Network::PolygonZkEvm => "polygon-zkevm",
            Network::Bsc => "bsc",
            Network::Avalanche => "avalanche",
            Network::Gnosis => "gnosis",
            Network::GnosisChiado => "gnosis-chiado",
            Network::Zksync => "zksync",
            Network::ZksyncSepolia => "zksync-sepolia",
            Network::Linea => "linea",
            Network::Scroll => "scroll",
            Network::Celo => "celo",
            Network::Mantle => "mantle",
            Network::Aurora => "aurora",
            Network::Worldchain => "worldchain",
            Network::Blast => "blast",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Ethereum => chain_ids::MAINNET,
            Network::Sepolia => chain_ids::SEPOLIA,
            Network::Arbitrum => chain_ids::ARBITRUM,
            Network::Optimism => chain_ids::OPTIMISM,
            Network::Base => chain_ids::BASE,
            Network::BaseSepolia => chain_ids::BASE_SEPOLIA,
            Network::Polygon => chain_ids::POLYGON,
            Network::PolygonZkEvm => chain_ids::POLYGON_ZKEVM,
            Network::Bsc => chain_ids::BSC,
            Network::Avalanche => chain_ids::AVALANCHE,
            Network::Gnosis => chain_ids::GNOSIS,
            Network::GnosisChiado => chain_ids::GNOSIS_CHIADO,
            Network::Zksync => chain_ids::ZKSYNC,
            Network::ZksyncSepolia => chain_ids::ZKSYNC_SEPOLIA,
            Network::Linea => chain_ids::LINEA,
            Network::Scroll => chain_ids::SCROLL,
            Network::Celo => chain_ids::CELO,
            Network::Mantle => chain_ids::MANTLE,
            Network::Aurora => chain_ids::AURORA,
            Network::Worldchain => chain_ids::WORLDCHAIN,
            Network::Blast => chain_ids::BLAST,
        }
    }

    /// Looks up a network by chain ID
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.chain_id() == chain_id)
    }

    /// Builds the domain context for a Safe on this network
    pub fn context(&self, safe: Address) -> ChainContext {
        ChainContext::new(self.chain_id(), safe)
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = match name.as_str() {
            "mainnet" => "ethereum",
            "matic" => "polygon",
            "arbitrum-one" => "arbitrum",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|n| n.name() == name)
            .ok_or_else(|| Error::UnknownNetwork(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Well-known chain IDs
pub mod chain_ids {
    pub const MAINNET: u64 = 1;
    pub const SEPOLIA: u64 = 11155111;
    pub const ARBITRUM: u64 = 42161;
    pub const OPTIMISM: u64 = 10;
    pub const BASE: u64 = 8453;
    pub const BASE_SEPOLIA: u64 = 84532;
    pub const POLYGON: u64 = 137;
    pub const POLYGON_ZKEVM: u64 = 1101;
    pub const BSC: u64 = 56;
    pub const AVALANCHE: u64 = 43114;
    pub const GNOSIS: u64 = 100;
    pub const GNOSIS_CHIADO: u64 = 10200;
    pub const ZKSYNC: u64 = 324;
    pub const ZKSYNC_SEPOLIA: u64 = 300;
    pub const LINEA: u64 = 59144;
    pub const SCROLL: u64 = 534352;
    pub const CELO: u64 = 42220;
    pub const MANTLE: u64 = 5000;
    pub const AURORA: u64 = 1313161554;
    pub const WORLDCHAIN: u64 = 480;
    pub const BLAST: u64 = 81457;
}
