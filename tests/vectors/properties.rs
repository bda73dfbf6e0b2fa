//! Property tests for the hashing laws

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{keccak256, B256, U256};
use proptest::prelude::*;
use safe_hashes::encoding::{decode_approve_hash, encode_approve_hash, encode_struct};
use safe_hashes::message::normalize_line_endings;
use safe_hashes::{transaction_hashes, ChainContext, Operation, SafeTransaction};

use crate::common::*;

proptest! {
    #[test]
    fn dynamic_fields_are_hashed(typehash: [u8; 32], data: Vec<u8>) {
        let typehash = B256::from(typehash);
        let encoded = encode_struct(typehash, &[DynSolValue::Bytes(data.clone())]);

        prop_assert_eq!(encoded.len(), 64);
        prop_assert_eq!(&encoded[..32], typehash.as_slice());
        let digest = keccak256(&data);
        prop_assert_eq!(&encoded[32..], digest.as_slice());
    }

    #[test]
    fn data_change_keeps_domain(data: Vec<u8>, index: usize, flip in 1u8..=255) {
        prop_assume!(!data.is_empty());
        let chain = ChainContext::new(1, ARBITRUM_SAFE);
        let original = SafeTransaction::new(ARBITRUM_SAFE, U256::ZERO, data.clone(), Operation::Call);

        let mut changed_data = data;
        let index = index % changed_data.len();
        changed_data[index] ^= flip;
        let changed = SafeTransaction::new(ARBITRUM_SAFE, U256::ZERO, changed_data, Operation::Call);

        let a = transaction_hashes(&chain, &original, "1.4.1").unwrap();
        let b = transaction_hashes(&chain, &changed, "1.4.1").unwrap();

        prop_assert_eq!(a.hashes.domain_hash, b.hashes.domain_hash);
        prop_assert_ne!(a.hashes.message_hash, b.hashes.message_hash);
        prop_assert_ne!(a.hashes.safe_tx_hash, b.hashes.safe_tx_hash);
    }

    #[test]
    fn line_ending_normalization_is_idempotent(raw: Vec<u8>) {
        let once = normalize_line_endings(&raw);
        prop_assert!(!once.contains(&b'\r'));
        prop_assert_eq!(normalize_line_endings(&once), once.clone());
    }

    #[test]
    fn approve_hash_round_trip(hash: [u8; 32]) {
        let hash = B256::from(hash);
        let calldata = encode_approve_hash(hash);
        prop_assert_eq!(calldata.len(), 36);
        prop_assert_eq!(decode_approve_hash(&calldata), Some(hash));
    }
}
