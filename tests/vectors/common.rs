//! Shared fixtures for the hash vector tests

use alloy::primitives::{address, hex, Address, B256, U256};
use safe_hashes::{ChainContext, InMemorySource, Operation, SafeTransaction, TransactionRecord};

pub const ARBITRUM_SAFE: Address = address!("0x111CEEee040739fD91D29C34C33E6B3E112F2177");
pub const SEPOLIA_PRIMARY: Address = address!("0x657ff0D4eC65D82b2bC1247b0a558bcd2f80A0f1");
pub const SEPOLIA_NESTED: Address = address!("0x6bc56d6CE87C86CB0756c616bECFD3Cd32b09251");

pub const MESSAGE: &[u8] = b"Hello, Safe!\nPlease sign this message.\n";

/// `addOwnerWithThreshold(0x0c75…c9e5, 3)`
pub const ADD_OWNER_DATA: [u8; 68] = hex!("0d582f130000000000000000000000000c75fa5a5f1c0997e3eea425cfa13184ed0ec9e50000000000000000000000000000000000000000000000000000000000000003");

pub fn add_owner_tx() -> SafeTransaction {
    SafeTransaction::new(ARBITRUM_SAFE, U256::ZERO, ADD_OWNER_DATA.to_vec(), Operation::Call)
        .with_nonce(U256::from(234))
}

pub fn add_owner_record() -> TransactionRecord {
    TransactionRecord {
        to: Some(ARBITRUM_SAFE.to_string()),
        value: Some("0".into()),
        data: Some(hex::encode_prefixed(ADD_OWNER_DATA)),
        operation: Some(0),
        ..Default::default()
    }
}

/// A source holding the Arbitrum add-owner transaction at nonce 234
pub fn arbitrum_source() -> (ChainContext, InMemorySource) {
    let chain = ChainContext::new(42161, ARBITRUM_SAFE);
    let source = InMemorySource::new()
        .with_transaction(&chain, U256::from(234), add_owner_record())
        .with_version(&chain, "1.3.0+L2");
    (chain, source)
}

pub fn hash(value: &str) -> B256 {
    value.parse().unwrap()
}
