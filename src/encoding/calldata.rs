//! `approveHash(bytes32)` calldata used by nested Safe owners

use alloy::primitives::{Bytes, B256};
use alloy::sol_types::SolCall;

use crate::contracts::ISafe;

/// Encodes `approveHash(hash)`: the selector `0xd4d9bdcd` followed by the hash
pub fn encode_approve_hash(hash: B256) -> Bytes {
    ISafe::approveHashCall { hashToApprove: hash }.abi_encode().into()
}

/// Extracts the approved hash from `approveHash` calldata.
///
/// Returns `None` unless `data` is exactly the 4-byte selector plus one word.
pub fn decode_approve_hash(data: &[u8]) -> Option<B256> {
    let (selector, word) = data.split_first_chunk::<4>()?;
    if *selector != ISafe::approveHashCall::SELECTOR || word.len() != 32 {
        return None;
    }
    Some(B256::from_slice(word))
}
