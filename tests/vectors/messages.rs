//! Off-chain message hash vectors

use alloy::primitives::{eip191_hash_message, U256};
use safe_hashes::{
    nested_offchain_message_hashes, offchain_message_hashes, verify_message, ChainContext, Error,
    InMemorySource, NestedSigner,
};

use crate::common::*;

#[test]
fn test_mainnet_message_vector() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    let hashes = offchain_message_hashes(&chain, MESSAGE, "1.3.0").unwrap();

    assert_eq!(hashes.safe_message, eip191_hash_message(MESSAGE));
    assert_eq!(
        hashes.safe_message_hash,
        hash("0x07af0699b3479252f6d072a4fa05016e011de9bdbe8d4f0afff8e54f4645bafb")
    );
}

#[test]
fn test_legacy_domain_message_vector() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    let hashes = offchain_message_hashes(&chain, MESSAGE, "1.1.1").unwrap();
    assert_eq!(
        hashes.safe_message_hash,
        hash("0xb9429cbc083d0a14255071db2ffbf6ebe9f8f4566200696a78e3e2f0b8c7d44c")
    );
}

#[test]
fn test_nested_message_vector() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    let hashes = nested_offchain_message_hashes(&chain, SEPOLIA_NESTED, MESSAGE, "1.4.1").unwrap();

    assert_eq!(
        hashes.domain_hash,
        hash("0x998777a7de89795a6459e0e0ba2a2517795bef7d69bbe79681bbca72dd809e74")
    );
    assert_eq!(
        hashes.safe_message_hash,
        hash("0x62f905d02338b5d1bfa945f7e03da88e3d1303fb324d526e0a22f354d69104bd")
    );
}

#[test]
fn test_windows_line_endings() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    let crlf = MESSAGE
        .iter()
        .flat_map(|&b| if b == b'\n' { vec![b'\r', b'\n'] } else { vec![b] })
        .collect::<Vec<u8>>();

    assert_eq!(
        offchain_message_hashes(&chain, &crlf, "1.3.0").unwrap(),
        offchain_message_hashes(&chain, MESSAGE, "1.3.0").unwrap()
    );
}

#[test]
fn test_message_pipeline() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    let source = InMemorySource::new()
        .with_version(&chain, "1.3.0")
        .with_version(&chain.with_contract(SEPOLIA_NESTED), "1.4.1");

    let nested = NestedSigner::for_message(Some(SEPOLIA_NESTED), Some(U256::from(9))).unwrap();
    let report = verify_message(&source, &chain, MESSAGE, nested).unwrap();

    assert_eq!(report.version, "1.3.0");
    assert_eq!(report.nested.unwrap().hashes.safe_message, report.hashes.safe_message_hash);
}

#[test]
fn test_message_pipeline_without_safe() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    let err = verify_message(&InMemorySource::new(), &chain, MESSAGE, None).unwrap_err();
    assert_eq!(err, Error::UnsupportedVersion("0.0.0".to_string()));
}
