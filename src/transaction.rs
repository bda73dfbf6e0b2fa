//! Safe transaction hashing and risk classification

use serde::{Deserialize, Serialize};

use crate::chain::{is_trusted_delegate, ChainContext};
use crate::encoding::{domain_hash_for, safe_tx_struct_hash, signing_hash};
use crate::error::Result;
use crate::types::{HashTriple, SafeTransaction};
use crate::version::{resolve, TypehashSet};

/// How much the operation mode of a transaction can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationTrust {
    /// Plain call
    Call,
    /// Delegate call into a known Safe library
    TrustedDelegateCall,
    /// Delegate call into an unknown contract, which can rewrite the Safe's storage
    UntrustedDelegateCall,
}

impl OperationTrust {
    pub fn classify(tx: &SafeTransaction) -> Self {
        if !tx.operation.is_delegate_call() {
            OperationTrust::Call
        } else if is_trusted_delegate(tx.to) {
            OperationTrust::TrustedDelegateCall
        } else {
            OperationTrust::UntrustedDelegateCall
        }
    }
}

/// Gas refund settings that can hide a transfer of funds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasRefundWarning {
    /// Refund paid in a non-ETH token
    CustomGasToken,
    /// Refund paid to a non-default receiver
    CustomRefundReceiver,
    /// Custom token and custom receiver together; worst when the gas price is non-zero
    CustomGasTokenAndRefundReceiver { nonzero_gas_price: bool },
}

impl GasRefundWarning {
    pub fn classify(tx: &SafeTransaction) -> Option<Self> {
        let custom_token = !tx.gas_token.is_zero();
        let custom_receiver = !tx.refund_receiver.is_zero();

        match (custom_token, custom_receiver) {
            (true, true) => Some(GasRefundWarning::CustomGasTokenAndRefundReceiver {
                nonzero_gas_price: !tx.gas_price.is_zero(),
            }),
            (true, false) => Some(GasRefundWarning::CustomGasToken),
            (false, true) => Some(GasRefundWarning::CustomRefundReceiver),
            (false, false) => None,
        }
    }
}

/// Hashes of a Safe transaction together with its risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHashes {
    pub hashes: HashTriple,
    /// Typehash layout used for the Safe version
    pub typehashes: TypehashSet,
    pub operation: OperationTrust,
    pub gas_refund: Option<GasRefundWarning>,
}

/// Computes the hash triple for a transaction with an explicit typehash layout
pub fn hash_transaction(chain: &ChainContext, tx: &SafeTransaction, typehashes: TypehashSet) -> HashTriple {
    let domain_hash = domain_hash_for(chain, typehashes.domain);
    let message_hash = safe_tx_struct_hash(tx, typehashes.safe_tx);
    let safe_tx_hash = signing_hash(domain_hash, message_hash);

    HashTriple {
        domain_hash,
        message_hash,
        safe_tx_hash,
    }
}

/// Computes the hashes a signer sees for `tx` on the Safe described by `chain`.
///
/// Fails with `UnsupportedVersion` when `version` is empty or older than 0.1.0.
pub fn transaction_hashes(
    chain: &ChainContext,
    tx: &SafeTransaction,
    version: &str,
) -> Result<TransactionHashes> {
    let typehashes = resolve(version)?;
    let hashes = hash_transaction(chain, tx, typehashes);

    let operation = OperationTrust::classify(tx);
    if operation == OperationTrust::UntrustedDelegateCall {
        tracing::warn!(to = %tx.to, "delegate call into an untrusted contract");
    }

    let gas_refund = GasRefundWarning::classify(tx);
    if let Some(warning) = gas_refund {
        tracing::warn!(?warning, gas_token = %tx.gas_token, refund_receiver = %tx.refund_receiver, "custom gas refund settings");
    }

    tracing::debug!(
        safe = %chain.verifying_contract,
        chain_id = chain.chain_id,
        nonce = %tx.nonce,
        safe_tx_hash = %hashes.safe_tx_hash,
        "computed Safe transaction hash"
    );

    Ok(TransactionHashes {
        hashes,
        typehashes,
        operation,
        gas_refund,
    })
}
