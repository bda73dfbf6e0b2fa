//! Approval transactions for Safes owned by another Safe
//!
//! A nested Safe owner cannot sign the primary Safe's transaction hash
//! directly. Instead it executes `approveHash(safeTxHash)` on the primary
//! Safe through its own transaction, whose hash is bound to the nested
//! Safe's domain.

use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::chain::ChainContext;
use crate::encoding::encode_approve_hash;
use crate::error::{Error, Result};
use crate::transaction::{transaction_hashes, TransactionHashes};
use crate::types::{Operation, SafeTransaction};

/// A Safe that signs on behalf of the primary Safe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedSigner {
    /// Address of the nested (owner) Safe
    pub address: Address,
    /// Nonce of the nested Safe's approval transaction
    pub nonce: U256,
}

impl NestedSigner {
    pub fn new(address: Address, nonce: U256) -> Self {
        Self { address, nonce }
    }

    /// Validates nested parameters for transaction mode: both or neither.
    pub fn for_transaction(address: Option<Address>, nonce: Option<U256>) -> Result<Option<Self>> {
        match (address, nonce) {
            (Some(address), Some(nonce)) => Ok(Some(Self::new(address, nonce))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(Error::MissingNestedParameter("nested Safe nonce")),
            (None, Some(_)) => Err(Error::MissingNestedParameter("nested Safe address")),
        }
    }

    /// Validates nested parameters for message mode.
    ///
    /// Messages carry no nonce, so only the address is returned; a nonce
    /// without an address is still rejected.
    pub fn for_message(address: Option<Address>, nonce: Option<U256>) -> Result<Option<Address>> {
        match (address, nonce) {
            (None, Some(_)) => Err(Error::MissingNestedParameter("nested Safe address")),
            (Some(address), Some(nonce)) => {
                tracing::debug!(%address, %nonce, "nested Safe nonce is unused for messages");
                Ok(Some(address))
            }
            (address, None) => Ok(address),
        }
    }
}

/// The approval transaction a nested Safe executes, with its hashes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedApproval {
    /// The approved primary `safeTxHash`
    pub approved_hash: B256,
    pub transaction: SafeTransaction,
    pub hashes: TransactionHashes,
}

/// Builds the `approveHash(safe_tx_hash)` call on `target_safe`.
///
/// Value, gas, refund and operation fields are all zero; only the nonce
/// comes from the nested Safe.
pub fn build_approval(target_safe: Address, safe_tx_hash: B256, nested_nonce: U256) -> SafeTransaction {
    SafeTransaction::new(
        target_safe,
        U256::ZERO,
        encode_approve_hash(safe_tx_hash),
        Operation::Call,
    )
    .with_nonce(nested_nonce)
}

/// Hashes the nested Safe's approval of a primary transaction.
///
/// `chain` describes the primary Safe. The approval's domain is keyed to
/// the nested Safe, hashed with the nested Safe's own `nested_version`.
pub fn nested_approval_hashes(
    chain: &ChainContext,
    safe_tx_hash: B256,
    nested: &NestedSigner,
    nested_version: &str,
) -> Result<NestedApproval> {
    let transaction = build_approval(chain.verifying_contract, safe_tx_hash, nested.nonce);
    let nested_chain = chain.with_contract(nested.address);
    let hashes = transaction_hashes(&nested_chain, &transaction, nested_version)?;

    Ok(NestedApproval {
        approved_hash: safe_tx_hash,
        transaction,
        hashes,
    })
}
