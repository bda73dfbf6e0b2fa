//! Transaction and nested approval hash vectors

use alloy::primitives::{Address, Bytes, U256};
use safe_hashes::encoding::{decode_approve_hash, domain_hash};
use safe_hashes::{
    nested_approval_hashes, transaction_hashes, verify_transaction, CallDescription, ChainContext,
    Error, InMemorySource, NestedSigner, Operation, OperationTrust, SafeTransaction, SignatureDecoder,
    TransactionRecord, TransactionRequest,
};

use crate::common::*;

#[test]
fn test_arbitrum_add_owner_vector() {
    let chain = ChainContext::new(42161, ARBITRUM_SAFE);
    let result = transaction_hashes(&chain, &add_owner_tx(), "1.3.0+L2").unwrap();

    assert_eq!(
        result.hashes.domain_hash,
        hash("0x1cf7f9b1efe3bc47fe02fd27c649fea19e79d66040683a1c86c7490c80bf7291")
    );
    assert_eq!(
        result.hashes.message_hash,
        hash("0xd9109ea63c50ecd3b80b6b27ed5c5a9fd3d546c2169dfb69bfa7ba24cd14c7a5")
    );
    assert_eq!(
        result.hashes.safe_tx_hash,
        hash("0x0cb7250b8becd7069223c54e2839feaed4cee156363fbfe5dd0a48e75c4e25b3")
    );
}

#[test]
fn test_version_suffix_does_not_matter() {
    let chain = ChainContext::new(42161, ARBITRUM_SAFE);
    let plain = transaction_hashes(&chain, &add_owner_tx(), "1.3.0").unwrap();
    let l2 = transaction_hashes(&chain, &add_owner_tx(), "1.3.0+L2").unwrap();
    assert_eq!(plain.hashes, l2.hashes);
}

#[test]
fn test_legacy_safe_vector() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    let tx = SafeTransaction::new(ARBITRUM_SAFE, U256::ZERO, Bytes::new(), Operation::Call)
        .with_nonce(U256::from(7));
    let result = transaction_hashes(&chain, &tx, "0.1.0").unwrap();

    assert_eq!(
        result.hashes.safe_tx_hash,
        hash("0x2d095743e2ee027c1c85da5ef566b892c8202aef7ab0babf3693bd7e40e5604d")
    );
}

#[test]
fn test_domain_layout_boundaries() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    let legacy = domain_hash(&chain, "1.1.1").unwrap();
    let current = domain_hash(&chain, "1.2.0").unwrap();

    assert_ne!(legacy, current);
    assert_eq!(legacy, domain_hash(&chain, "0.1.0").unwrap());
    assert_eq!(current, domain_hash(&chain, "1.4.1").unwrap());
    // The legacy domain ignores the chain ID
    assert_eq!(legacy, domain_hash(&ChainContext::new(137, ARBITRUM_SAFE), "1.0.0").unwrap());
}

#[test]
fn test_unsupported_versions() {
    let chain = ChainContext::new(1, ARBITRUM_SAFE);
    for version in ["", "0.0.0", "0.0.9"] {
        let err = transaction_hashes(&chain, &add_owner_tx(), version).unwrap_err();
        assert!(err.is_unsupported_version(), "{version:?} should be unsupported");
    }
    assert!(matches!(
        transaction_hashes(&chain, &add_owner_tx(), "one.two"),
        Err(Error::InvalidVersion(_))
    ));
}

#[test]
fn test_sepolia_nested_approval_vector() {
    let chain = ChainContext::new(11155111, SEPOLIA_PRIMARY);
    let approved = hash("0xcb8bbe7bf8f8a1f3f57658e450d07d4422356ac042d96a87ba425b19e67a78a1");
    let signer = NestedSigner::new(SEPOLIA_NESTED, U256::from(4));

    let approval = nested_approval_hashes(&chain, approved, &signer, "1.4.1").unwrap();

    assert_eq!(decode_approve_hash(&approval.transaction.data), Some(approved));
    assert_eq!(
        approval.hashes.hashes.domain_hash,
        hash("0x55f6c329a7834e2a4e789f5526f328fa75d14fe75b97b0001be40caf46ca92a1")
    );
    assert_eq!(
        approval.hashes.hashes.message_hash,
        hash("0xcd411ee5d49344391ef8d37b76e19dfacf505bbb20e856ac907acb5958ecbdf0")
    );
    assert_eq!(
        approval.hashes.hashes.safe_tx_hash,
        hash("0x86eb3f93f2670d119a4ecb8eeaa4dafe31a28abcafe06688d47e195a3dd7abb0")
    );
}

#[test]
fn test_pipeline_matches_direct_hashing() {
    let (chain, source) = arbitrum_source();
    let request = TransactionRequest {
        chain,
        nonce: U256::from(234),
        candidate: None,
        nested: None,
    };

    let report = verify_transaction(&source, &source, &SignatureDecoder::with_safe_signatures(), &request).unwrap();
    let direct = transaction_hashes(&chain, &add_owner_tx(), "1.3.0+L2").unwrap();

    assert_eq!(report.transaction, add_owner_tx());
    assert_eq!(report.hashes, direct);
    assert_eq!(report.hashes.operation, OperationTrust::Call);
    assert!(matches!(report.description, CallDescription::Decoded(_)));
}

#[test]
fn test_pipeline_candidate_selection() {
    let (chain, source) = arbitrum_source();
    let rejection = TransactionRecord {
        to: Some(ARBITRUM_SAFE.to_string()),
        ..Default::default()
    };
    let source = source.with_transaction(&chain, U256::from(234), rejection);
    let decoder = SignatureDecoder::with_safe_signatures();

    let mut request = TransactionRequest {
        chain,
        nonce: U256::from(234),
        candidate: None,
        nested: None,
    };
    let first = verify_transaction(&source, &source, &decoder, &request).unwrap();
    assert_eq!(first.candidates, 2);
    assert_eq!(first.transaction, add_owner_tx());

    request.candidate = Some(1);
    let second = verify_transaction(&source, &source, &decoder, &request).unwrap();
    assert!(second.transaction.data.is_empty());
    assert_ne!(first.hashes.hashes.safe_tx_hash, second.hashes.hashes.safe_tx_hash);

    request.candidate = Some(2);
    assert_eq!(
        verify_transaction(&source, &source, &decoder, &request).unwrap_err(),
        Error::CandidateOutOfRange { index: 2, count: 2 }
    );
}

#[test]
fn test_pipeline_nested_threads_primary_hash() {
    let chain = ChainContext::new(11155111, SEPOLIA_PRIMARY);
    let record = TransactionRecord {
        to: Some(Address::ZERO.to_string()),
        value: Some(1_000u64.into()),
        ..Default::default()
    };
    let source = InMemorySource::new()
        .with_transaction(&chain, U256::from(12), record)
        .with_version(&chain, "1.3.0")
        .with_version(&chain.with_contract(SEPOLIA_NESTED), "1.4.1");
    let signer = NestedSigner::new(SEPOLIA_NESTED, U256::from(4));
    let request = TransactionRequest {
        chain,
        nonce: U256::from(12),
        candidate: None,
        nested: Some(signer),
    };

    let report = verify_transaction(&source, &source, &SignatureDecoder::new(), &request).unwrap();
    let nested = report.nested.unwrap();
    let expected = nested_approval_hashes(&chain, report.hashes.hashes.safe_tx_hash, &signer, "1.4.1").unwrap();

    assert_eq!(nested.approval, expected);
}
