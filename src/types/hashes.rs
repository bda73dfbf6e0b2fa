//! Hash outputs shown to a signer

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

/// Hashes of a Safe transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashTriple {
    /// EIP-712 domain separator of the Safe
    pub domain_hash: B256,
    /// `SafeTx` struct hash
    pub message_hash: B256,
    /// Final digest a signer approves
    pub safe_tx_hash: B256,
}

/// Hashes of a Safe off-chain message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashQuad {
    /// The message body wrapped by `SafeMessage`.
    ///
    /// For a direct signer this is the EIP-191 hash of the message; for a
    /// nested signer it is the parent Safe's message hash.
    pub safe_message: B256,
    pub domain_hash: B256,
    /// `SafeMessage` struct hash
    pub message_hash: B256,
    /// Final digest a signer approves
    pub safe_message_hash: B256,
}
