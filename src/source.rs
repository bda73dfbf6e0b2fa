//! Data-source seams and the end-to-end verification pipelines
//!
//! Fetching pending transactions and Safe versions is left to callers
//! through [`TransactionSource`] and [`VersionSource`]. Everything after the
//! fetch (record parsing, candidate selection, hashing, nested approvals)
//! happens here so every front end verifies the same way.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::{hex, Address, Bytes, U256};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::chain::ChainContext;
use crate::decode::{describe_call, CallDescription, CalldataDecoder};
use crate::error::{Error, Result};
use crate::message::{nested_offchain_message_hashes, offchain_message_hashes};
use crate::nested::{nested_approval_hashes, NestedApproval, NestedSigner};
use crate::transaction::{transaction_hashes, TransactionHashes};
use crate::types::{HashQuad, Operation, SafeTransaction};

/// Version reported when a data source knows nothing about an address
pub const UNKNOWN_VERSION: &str = "0.0.0";

/// A decimal integer as sent by transaction services: either a JSON number or a string.
///
/// JSON numbers wider than 64 bits reach serde as floats and cannot be held
/// exactly; they are kept as [`DecimalValue::Inexact`] and rejected on
/// conversion. Send wide values as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DecimalValue {
    Number(u64),
    Text(String),
    /// A JSON number that is negative, fractional or too wide
    Inexact(String),
}

impl DecimalValue {
    fn to_u256(&self, field: &'static str) -> Result<U256> {
        match self {
            DecimalValue::Number(n) => Ok(U256::from(*n)),
            DecimalValue::Text(s) => parse_uint(field, s),
            DecimalValue::Inexact(s) => Err(Error::InvalidInteger {
                field,
                value: s.clone(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for DecimalValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DecimalVisitor;

        impl Visitor<'_> for DecimalVisitor {
            type Value = DecimalValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer as a number or decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(DecimalValue::Number(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(u64::try_from(v).map_or_else(|_| DecimalValue::Inexact(v.to_string()), DecimalValue::Number))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Self::Value, E> {
                Ok(DecimalValue::Text(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                Ok(DecimalValue::Inexact(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(DecimalValue::Text(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
                Ok(DecimalValue::Text(v))
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}

impl From<u64> for DecimalValue {
    fn from(value: u64) -> Self {
        DecimalValue::Number(value)
    }
}

impl From<&str> for DecimalValue {
    fn from(value: &str) -> Self {
        DecimalValue::Text(value.to_string())
    }
}

/// A pending multisig transaction as returned by a transaction service.
///
/// Every field is optional; absent fields fall back to zero, the zero
/// address or empty calldata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionRecord {
    pub to: Option<String>,
    pub value: Option<DecimalValue>,
    pub data: Option<String>,
    pub operation: Option<u8>,
    pub safe_tx_gas: Option<DecimalValue>,
    pub base_gas: Option<DecimalValue>,
    pub gas_price: Option<DecimalValue>,
    pub gas_token: Option<String>,
    pub refund_receiver: Option<String>,
    pub nonce: Option<DecimalValue>,
}

impl TransactionRecord {
    /// Converts the record into a hashable transaction at `nonce`.
    ///
    /// The nonce the record was requested for wins over the record's own.
    pub fn to_transaction(&self, nonce: U256) -> Result<SafeTransaction> {
        let to = opt_address(self.to.as_deref())?;
        let value = opt_uint(self.value.as_ref(), "value")?;
        let data = match self.data.as_deref() {
            Some(data) => parse_bytes("data", data)?,
            None => Bytes::new(),
        };
        let operation = Operation::try_from(self.operation.unwrap_or_default())?;

        if let Some(own) = &self.nonce {
            let own = own.to_u256("nonce")?;
            if own != nonce {
                tracing::warn!(requested = %nonce, record = %own, "record nonce differs from requested nonce");
            }
        }

        Ok(SafeTransaction::new(to, value, data, operation)
            .with_safe_tx_gas(opt_uint(self.safe_tx_gas.as_ref(), "safeTxGas")?)
            .with_base_gas(opt_uint(self.base_gas.as_ref(), "baseGas")?)
            .with_refund(
                opt_uint(self.gas_price.as_ref(), "gasPrice")?,
                opt_address(self.gas_token.as_deref())?,
                opt_address(self.refund_receiver.as_deref())?,
            )
            .with_nonce(nonce))
    }
}

fn opt_address(value: Option<&str>) -> Result<Address> {
    value.map_or(Ok(Address::ZERO), parse_address)
}

fn opt_uint(value: Option<&DecimalValue>, field: &'static str) -> Result<U256> {
    value.map_or(Ok(U256::ZERO), |v| v.to_u256(field))
}

/// Parses a `0x`-prefixed, 40 hex digit address. Checksums are not enforced.
pub fn parse_address(value: &str) -> Result<Address> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| Error::InvalidAddress(value.to_string()))?;
    if digits.len() != 40 {
        return Err(Error::InvalidAddress(value.to_string()));
    }
    Address::from_str(digits).map_err(|_| Error::InvalidAddress(value.to_string()))
}

/// Parses a non-negative decimal integer
pub fn parse_uint(field: &'static str, value: &str) -> Result<U256> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInteger {
            field,
            value: value.to_string(),
        });
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| Error::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

/// Parses hex bytes with an optional `0x` prefix; `0x` alone is empty
pub fn parse_bytes(field: &'static str, value: &str) -> Result<Bytes> {
    hex::decode(value.trim())
        .map(Bytes::from)
        .map_err(|_| Error::InvalidHex {
            field,
            value: value.to_string(),
        })
}

/// The candidate chosen among the transactions proposed for one nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a, T> {
    pub candidate: &'a T,
    pub index: usize,
    pub count: usize,
    explicit: bool,
}

impl<T> Selection<'_, T> {
    /// True when several candidates exist and none was chosen explicitly
    pub fn is_ambiguous(&self) -> bool {
        self.count > 1 && !self.explicit
    }
}

/// Picks the candidate at `index`, or the first one when no index is given
pub fn select_candidate<T>(candidates: &[T], index: Option<usize>, nonce: U256) -> Result<Selection<'_, T>> {
    let count = candidates.len();
    if count == 0 {
        return Err(Error::NoTransaction { nonce });
    }

    let (index, explicit) = match index {
        Some(index) => (index, true),
        None => (0, false),
    };
    let candidate = candidates
        .get(index)
        .ok_or(Error::CandidateOutOfRange { index, count })?;

    if count > 1 && !explicit {
        tracing::warn!(%nonce, count, "several transactions share this nonce, using the first");
    }

    Ok(Selection {
        candidate,
        index,
        count,
        explicit,
    })
}

/// Lists the transactions proposed for a Safe at a nonce
pub trait TransactionSource {
    fn transactions(&self, chain: &ChainContext, nonce: U256) -> Result<Vec<TransactionRecord>>;
}

/// Looks up the version string of a deployed Safe
pub trait VersionSource {
    /// Returns `None` when the address has no Safe deployed
    fn version(&self, chain: &ChainContext) -> Result<Option<String>>;
}

/// Returns the Safe's version, or [`UNKNOWN_VERSION`] when the source has none
pub fn safe_version<V: VersionSource + ?Sized>(source: &V, chain: &ChainContext) -> Result<String> {
    let version = source.version(chain)?;
    if version.is_none() {
        tracing::debug!(safe = %chain.verifying_contract, "no version reported");
    }
    Ok(version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()))
}

/// Fixed transactions and versions held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    transactions: HashMap<(u64, Address, U256), Vec<TransactionRecord>>,
    versions: HashMap<(u64, Address), String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a proposed transaction for `nonce`
    pub fn with_transaction(mut self, chain: &ChainContext, nonce: U256, record: TransactionRecord) -> Self {
        self.transactions
            .entry((chain.chain_id, chain.verifying_contract, nonce))
            .or_default()
            .push(record);
        self
    }

    /// Sets the version reported for the Safe in `chain`
    pub fn with_version(mut self, chain: &ChainContext, version: impl Into<String>) -> Self {
        self.versions
            .insert((chain.chain_id, chain.verifying_contract), version.into());
        self
    }
}

impl TransactionSource for InMemorySource {
    fn transactions(&self, chain: &ChainContext, nonce: U256) -> Result<Vec<TransactionRecord>> {
        Ok(self
            .transactions
            .get(&(chain.chain_id, chain.verifying_contract, nonce))
            .cloned()
            .unwrap_or_default())
    }
}

impl VersionSource for InMemorySource {
    fn version(&self, chain: &ChainContext) -> Result<Option<String>> {
        Ok(self
            .versions
            .get(&(chain.chain_id, chain.verifying_contract))
            .cloned())
    }
}

/// What to verify for a pending transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRequest {
    /// The primary Safe
    pub chain: ChainContext,
    pub nonce: U256,
    /// Candidate index when several transactions share the nonce
    pub candidate: Option<usize>,
    pub nested: Option<NestedSigner>,
}

/// Everything a signer should compare against their wallet for one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReport {
    pub chain: ChainContext,
    pub version: String,
    pub transaction: SafeTransaction,
    pub hashes: TransactionHashes,
    pub description: CallDescription,
    /// Number of transactions proposed for the nonce
    pub candidates: usize,
    pub nested: Option<NestedReport>,
}

/// The nested Safe's approval of the primary transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedReport {
    pub address: Address,
    pub version: String,
    pub approval: NestedApproval,
}

/// Fetches, selects and hashes a pending transaction, then the nested approval if any
pub fn verify_transaction<S, V, D>(
    transactions: &S,
    versions: &V,
    decoder: &D,
    request: &TransactionRequest,
) -> Result<TransactionReport>
where
    S: TransactionSource + ?Sized,
    V: VersionSource + ?Sized,
    D: CalldataDecoder + ?Sized,
{
    let chain = request.chain;
    let version = safe_version(versions, &chain)?;

    let records = transactions.transactions(&chain, request.nonce)?;
    let selection = select_candidate(&records, request.candidate, request.nonce)?;
    let transaction = selection.candidate.to_transaction(request.nonce)?;

    let hashes = transaction_hashes(&chain, &transaction, &version)?;
    let description = describe_call(decoder, chain.verifying_contract, &transaction);

    let nested = match &request.nested {
        Some(signer) => {
            let nested_version = safe_version(versions, &chain.with_contract(signer.address))?;
            let approval =
                nested_approval_hashes(&chain, hashes.hashes.safe_tx_hash, signer, &nested_version)?;
            Some(NestedReport {
                address: signer.address,
                version: nested_version,
                approval,
            })
        }
        None => None,
    };

    Ok(TransactionReport {
        chain,
        version,
        transaction,
        hashes,
        description,
        candidates: selection.count,
        nested,
    })
}

/// Hashes of an off-chain message for the primary Safe and optionally a nested owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReport {
    pub chain: ChainContext,
    pub version: String,
    pub hashes: HashQuad,
    pub nested: Option<NestedMessageReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedMessageReport {
    pub address: Address,
    pub version: String,
    pub hashes: HashQuad,
}

/// Hashes an off-chain message for the Safe in `chain`, and for `nested_safe` if given
pub fn verify_message<V: VersionSource + ?Sized>(
    versions: &V,
    chain: &ChainContext,
    raw_message: &[u8],
    nested_safe: Option<Address>,
) -> Result<MessageReport> {
    let version = safe_version(versions, chain)?;
    let hashes = offchain_message_hashes(chain, raw_message, &version)?;

    let nested = match nested_safe {
        Some(address) => {
            let nested_version = safe_version(versions, &chain.with_contract(address))?;
            let hashes = nested_offchain_message_hashes(chain, address, raw_message, &nested_version)?;
            Some(NestedMessageReport {
                address,
                version: nested_version,
                hashes,
            })
        }
        None => None,
    };

    Ok(MessageReport {
        chain: *chain,
        version,
        hashes,
        nested,
    })
}
