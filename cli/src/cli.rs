use std::str::FromStr;

use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{bail, Result};
use safe_hashes::source::{parse_address, parse_uint};
use safe_hashes::{ChainContext, Network};

#[derive(Parser)]
#[command(name = "safe-hashes")]
#[command(about = "Recompute Safe transaction and message hashes offline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash a Safe transaction, optionally with a nested Safe approval
    Transaction(TransactionArgs),

    /// Hash a nested Safe's approval of a known safeTxHash
    Nested(NestedArgs),

    /// Hash an off-chain message signed by a Safe
    Message(MessageArgs),

    /// List the networks accepted by --network
    Networks,
}

#[derive(Args, Clone)]
pub struct ChainArgs {
    /// Network name (see `networks`)
    #[arg(long, conflicts_with = "chain_id")]
    pub network: Option<String>,

    /// Numeric chain ID
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Safe contract address
    #[arg(long, env = "SAFE_ADDRESS")]
    pub address: String,

    /// Safe contract version (e.g. "1.3.0+L2")
    #[arg(long = "version", value_name = "VERSION")]
    pub safe_version: String,
}

impl ChainArgs {
    pub fn chain_id(&self) -> Result<u64> {
        match (&self.network, self.chain_id) {
            (Some(name), _) => Ok(Network::from_str(name)?.chain_id()),
            (None, Some(chain_id)) => Ok(chain_id),
            (None, None) => bail!("either --network or --chain-id is required"),
        }
    }

    pub fn context(&self) -> Result<ChainContext> {
        Ok(ChainContext::new(self.chain_id()?, parse_address(&self.address)?))
    }
}

#[derive(Args, Clone, Default)]
pub struct NestedSafeArgs {
    /// Address of the Safe that owns the primary Safe
    #[arg(long)]
    pub nested_safe_address: Option<String>,

    /// Nonce of the nested Safe's approval transaction
    #[arg(long)]
    pub nested_safe_nonce: Option<String>,

    /// Version of the nested Safe (defaults to the primary Safe's)
    #[arg(long)]
    pub nested_safe_version: Option<String>,
}

impl NestedSafeArgs {
    pub fn address(&self) -> Result<Option<Address>> {
        Ok(self.nested_safe_address.as_deref().map(parse_address).transpose()?)
    }

    pub fn nonce(&self) -> Result<Option<U256>> {
        Ok(self
            .nested_safe_nonce
            .as_deref()
            .map(|nonce| parse_uint("nested Safe nonce", nonce))
            .transpose()?)
    }
}

#[derive(Parser, Clone)]
pub struct TransactionArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// Safe nonce of the transaction
    #[arg(long)]
    pub nonce: String,

    /// JSON file with a transaction service record, or an array of them
    #[arg(long, value_name = "FILE", conflicts_with_all = ["to", "data"])]
    pub record: Option<String>,

    /// Index of the record to use when several share the nonce
    #[arg(long, requires = "record")]
    pub candidate: Option<usize>,

    /// Target address (defaults to the zero address)
    #[arg(long)]
    pub to: Option<String>,

    /// ETH value in wei
    #[arg(long, default_value = "0")]
    pub value: String,

    /// Calldata as hex
    #[arg(long)]
    pub data: Option<String>,

    /// 0 for Call, 1 for DelegateCall
    #[arg(long, default_value_t = 0)]
    pub operation: u8,

    #[arg(long, default_value = "0")]
    pub safe_tx_gas: String,

    #[arg(long, default_value = "0")]
    pub base_gas: String,

    #[arg(long, default_value = "0")]
    pub gas_price: String,

    /// Gas refund token (defaults to ETH)
    #[arg(long)]
    pub gas_token: Option<String>,

    #[arg(long)]
    pub refund_receiver: Option<String>,

    #[command(flatten)]
    pub nested: NestedSafeArgs,
}

#[derive(Parser, Clone)]
pub struct NestedArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// The primary Safe's transaction hash to approve
    #[arg(long)]
    pub safe_tx_hash: String,

    #[command(flatten)]
    pub nested: NestedSafeArgs,
}

#[derive(Parser, Clone)]
pub struct MessageArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// File containing the raw message
    #[arg(long, value_name = "FILE")]
    pub message: String,

    #[command(flatten)]
    pub nested: NestedSafeArgs,
}
