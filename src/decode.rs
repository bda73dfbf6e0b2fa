//! Human-readable descriptions of transaction calldata
//!
//! Decoding is delegated to a [`CalldataDecoder`]. The hashes never depend
//! on it; the description only helps a signer recognise what they approve.

use std::collections::HashMap;
use std::fmt::Write as _;

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{hex, Address, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::SafeTransaction;

/// Signatures of the Safe calls most often seen in pending transactions
pub const SAFE_SIGNATURES: [&str; 11] = [
    "approveHash(bytes32 hashToApprove)",
    "addOwnerWithThreshold(address owner, uint256 _threshold)",
    "removeOwner(address prevOwner, address owner, uint256 _threshold)",
    "swapOwner(address prevOwner, address oldOwner, address newOwner)",
    "changeThreshold(uint256 _threshold)",
    "enableModule(address module)",
    "disableModule(address prevModule, address module)",
    "setGuard(address guard)",
    "setFallbackHandler(address handler)",
    "multiSend(bytes transactions)",
    "signMessage(bytes _data)",
];

/// A decoded function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: String,
}

/// A decoded function call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCall {
    pub method: String,
    pub parameters: Vec<DecodedParam>,
}

/// Turns raw calldata into a method name and parameters
pub trait CalldataDecoder {
    /// Returns `None` if the calldata is not recognised
    fn decode(&self, data: &[u8]) -> Option<DecodedCall>;
}

/// A decoder that never recognises anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoder;

impl CalldataDecoder for NoDecoder {
    fn decode(&self, _data: &[u8]) -> Option<DecodedCall> {
        None
    }
}

/// Decodes calldata against a set of known function signatures
#[derive(Debug, Clone, Default)]
pub struct SignatureDecoder {
    functions: HashMap<Selector, Function>,
}

impl SignatureDecoder {
    /// Creates an empty decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder preloaded with [`SAFE_SIGNATURES`]
    pub fn with_safe_signatures() -> Self {
        let mut decoder = Self::new();
        for signature in SAFE_SIGNATURES {
            // The built-in signatures are known to parse.
            if let Ok(function) = Function::parse(signature) {
                decoder.functions.insert(function.selector(), function);
            }
        }
        decoder
    }

    /// Adds a human-readable signature such as `transfer(address to, uint256 amount)`
    pub fn add_signature(&mut self, signature: &str) -> Result<Selector> {
        let function =
            Function::parse(signature).map_err(|_| Error::InvalidSignature(signature.to_string()))?;
        let selector = function.selector();
        self.functions.insert(selector, function);
        Ok(selector)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl CalldataDecoder for SignatureDecoder {
    fn decode(&self, data: &[u8]) -> Option<DecodedCall> {
        let (selector, args) = data.split_first_chunk::<4>()?;
        let function = self.functions.get(&Selector::from(*selector))?;
        let values = function.abi_decode_input(args).ok()?;

        let parameters = function
            .inputs
            .iter()
            .zip(values.iter())
            .map(|(param, value)| DecodedParam {
                name: param.name.clone(),
                ty: param.ty.clone(),
                value: format_value(value),
            })
            .collect();

        Some(DecodedCall {
            method: function.name.clone(),
            parameters,
        })
    }
}

/// Formats a decoded value so it can be compared with a wallet screen
pub fn format_value(value: &DynSolValue) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &DynSolValue) {
    match value {
        DynSolValue::Address(inner) => {
            let _ = write!(out, "{inner}");
        }
        DynSolValue::Bool(inner) => {
            let _ = write!(out, "{inner}");
        }
        DynSolValue::Uint(inner, _) => {
            let _ = write!(out, "{inner}");
        }
        DynSolValue::Int(inner, _) => {
            let _ = write!(out, "{inner}");
        }
        DynSolValue::FixedBytes(word, size) => out.push_str(&hex::encode_prefixed(&word[..*size])),
        DynSolValue::Bytes(inner) => out.push_str(&hex::encode_prefixed(inner)),
        DynSolValue::String(inner) => {
            let _ = write!(out, "{inner:?}");
        }
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            out.push('[');
            write_list(out, values);
            out.push(']');
        }
        DynSolValue::Tuple(values) => {
            out.push('(');
            write_list(out, values);
            out.push(')');
        }
        #[allow(unreachable_patterns)]
        other => {
            let _ = write!(out, "{other:?}");
        }
    }
}

fn write_list(out: &mut String, values: &[DynSolValue]) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(out, value);
    }
}

/// What a transaction without calldata does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCallKind {
    /// Zero-value call to the Safe itself, used to cancel a pending nonce
    OnChainRejection,
    /// ETH sent from the Safe to itself
    SelfTransfer,
    /// Zero-value call to another address
    EmptyCall,
    /// Plain ETH transfer to another address
    EtherTransfer,
}

impl EmptyCallKind {
    pub fn classify(own_address: Address, tx: &SafeTransaction) -> Self {
        match (tx.to == own_address, tx.value.is_zero()) {
            (true, true) => EmptyCallKind::OnChainRejection,
            (true, false) => EmptyCallKind::SelfTransfer,
            (false, true) => EmptyCallKind::EmptyCall,
            (false, false) => EmptyCallKind::EtherTransfer,
        }
    }
}

/// Description of a transaction's calldata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallDescription {
    /// No calldata at all
    Empty(EmptyCallKind),
    /// Calldata recognised by the decoder
    Decoded(DecodedCall),
    /// Calldata the decoder did not recognise
    Unknown,
}

/// Describes the calldata of `tx` sent from the Safe at `own_address`
pub fn describe_call<D: CalldataDecoder + ?Sized>(
    decoder: &D,
    own_address: Address,
    tx: &SafeTransaction,
) -> CallDescription {
    if tx.data.is_empty() {
        return CallDescription::Empty(EmptyCallKind::classify(own_address, tx));
    }
    match decoder.decode(&tx.data) {
        Some(call) => CallDescription::Decoded(call),
        None => CallDescription::Unknown,
    }
}
