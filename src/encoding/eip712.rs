//! EIP-712 struct encoding and hashing for Safe domains, transactions and messages

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{keccak256, B256, U256};

use crate::chain::ChainContext;
use crate::contracts::SAFE_MSG_TYPEHASH;
use crate::error::Result;
use crate::types::SafeTransaction;
use crate::version::{resolve, DomainVariant, SafeTxVariant};

/// Encodes one struct member per the EIP-712 `encodeData` rule.
///
/// Dynamic `bytes` and `string` members contribute the keccak256 of their
/// contents, arrays the keccak256 of their encoded members; every other
/// value is its 32-byte ABI word.
fn encode_field(value: &DynSolValue) -> Vec<u8> {
    match value {
        DynSolValue::Bytes(bytes) => keccak256(bytes).to_vec(),
        DynSolValue::String(s) => keccak256(s.as_bytes()).to_vec(),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            let encoded: Vec<u8> = items.iter().flat_map(encode_field).collect();
            keccak256(encoded).to_vec()
        }
        other => other.abi_encode(),
    }
}

/// Encodes `typehash || encodeData(fields)`
pub fn encode_struct(typehash: B256, fields: &[DynSolValue]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(32 * (fields.len() + 1));
    encoded.extend_from_slice(typehash.as_slice());
    for field in fields {
        encoded.extend(encode_field(field));
    }
    encoded
}

/// Computes `keccak256(typehash || encodeData(fields))`
pub fn hash_struct(typehash: B256, fields: &[DynSolValue]) -> B256 {
    let encoded = encode_struct(typehash, fields);
    tracing::trace!(preimage = %alloy::hex::encode_prefixed(&encoded), "hashing EIP-712 struct");
    keccak256(&encoded)
}

/// Computes the final EIP-712 hash to sign
///
/// hash = keccak256("\x19\x01" || domainSeparator || structHash)
pub fn signing_hash(domain_hash: B256, struct_hash: B256) -> B256 {
    let mut encoded = [0u8; 66];
    encoded[0] = 0x19;
    encoded[1] = 0x01;
    encoded[2..34].copy_from_slice(domain_hash.as_slice());
    encoded[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(encoded)
}

/// Computes the domain separator for a Safe with an explicit domain layout
///
/// The legacy layout drops the chain ID entirely:
/// keccak256(abi.encode(DOMAIN_SEPARATOR_TYPEHASH_OLD, safeAddress))
pub fn domain_hash_for(chain: &ChainContext, variant: DomainVariant) -> B256 {
    let contract = DynSolValue::Address(chain.verifying_contract);
    let fields = match variant {
        DomainVariant::Legacy => vec![contract],
        DomainVariant::Current => vec![DynSolValue::Uint(U256::from(chain.chain_id), 256), contract],
    };
    hash_struct(variant.typehash(), &fields)
}

/// Computes the domain separator for a Safe of the given version
pub fn domain_hash(chain: &ChainContext, version: &str) -> Result<B256> {
    let typehashes = resolve(version)?;
    Ok(domain_hash_for(chain, typehashes.domain))
}

/// Computes the struct hash for SafeTx
///
/// keccak256(abi.encode(
///     SAFE_TX_TYPEHASH,
///     to, value, keccak256(data), operation,
///     safeTxGas, baseGas, gasPrice, gasToken, refundReceiver, nonce
/// ))
pub fn safe_tx_struct_hash(tx: &SafeTransaction, variant: SafeTxVariant) -> B256 {
    let fields = [
        DynSolValue::Address(tx.to),
        DynSolValue::Uint(tx.value, 256),
        DynSolValue::Bytes(tx.data.to_vec()),
        DynSolValue::Uint(U256::from(tx.operation.as_u8()), 8),
        DynSolValue::Uint(tx.safe_tx_gas, 256),
        DynSolValue::Uint(tx.base_gas, 256),
        DynSolValue::Uint(tx.gas_price, 256),
        DynSolValue::Address(tx.gas_token),
        DynSolValue::Address(tx.refund_receiver),
        DynSolValue::Uint(tx.nonce, 256),
    ];
    hash_struct(variant.typehash(), &fields)
}

/// Computes the struct hash for `SafeMessage(bytes message)` over a 32-byte message.
///
/// The message is `bytes`, so it contributes keccak256(abi.encode(bytes32(message))).
pub fn safe_message_struct_hash(message: B256) -> B256 {
    hash_struct(SAFE_MSG_TYPEHASH, &[DynSolValue::Bytes(message.to_vec())])
}
