//! # safe-hashes
//!
//! Offline recomputation of the EIP-712 hashes a Safe multisig signer is
//! asked to sign, so they can be compared against what a hardware wallet
//! displays.
//!
//! ## Features
//!
//! - Domain, message and `safeTxHash` for every Safe release from 0.1.0
//! - Approval hashes for Safes owned by another Safe (`approveHash`)
//! - Off-chain `SafeMessage` hashes, plain and nested
//! - Delegate-call and gas-refund risk classification
//! - Pluggable data sources and calldata decoders
//!
//! ## Quick Start
//!
//! ```rust
//! use alloy::primitives::{address, hex, U256};
//! use safe_hashes::{transaction_hashes, ChainContext, Operation, SafeTransaction};
//!
//! let safe = address!("0x111CEEee040739fD91D29C34C33E6B3E112F2177");
//! let chain = ChainContext::new(42161, safe);
//! let tx = SafeTransaction::new(
//!     safe,
//!     U256::ZERO,
//!     hex!("0d582f130000000000000000000000000c75fa5a5f1c0997e3eea425cfa13184ed0ec9e50000000000000000000000000000000000000000000000000000000000000003").to_vec(),
//!     Operation::Call,
//! )
//! .with_nonce(U256::from(234));
//!
//! let result = transaction_hashes(&chain, &tx, "1.3.0+L2")?;
//! assert_eq!(
//!     result.hashes.safe_tx_hash.to_string(),
//!     "0x0cb7250b8becd7069223c54e2839feaed4cee156363fbfe5dd0a48e75c4e25b3"
//! );
//! # Ok::<(), safe_hashes::Error>(())
//! ```
//!
//! ## Nested Safes
//!
//! When a Safe owner is itself a Safe, the owner approves the primary
//! `safeTxHash` with its own transaction. [`nested_approval_hashes`] builds
//! and hashes that transaction; [`nested_offchain_message_hashes`] does the
//! same for messages.

pub mod chain;
pub mod contracts;
pub mod decode;
pub mod encoding;
pub mod error;
pub mod message;
pub mod nested;
pub mod source;
pub mod transaction;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use chain::{ChainContext, Network};
pub use decode::{describe_call, CallDescription, CalldataDecoder, EmptyCallKind, SignatureDecoder};
pub use error::{Error, Result};
pub use message::{nested_offchain_message_hashes, offchain_message_hashes, PersonalMessageHasher};
pub use nested::{nested_approval_hashes, NestedApproval, NestedSigner};
pub use source::{
    select_candidate, verify_message, verify_transaction, InMemorySource, MessageReport,
    TransactionRecord, TransactionReport, TransactionRequest, TransactionSource, VersionSource,
};
pub use transaction::{transaction_hashes, GasRefundWarning, OperationTrust, TransactionHashes};
pub use types::{HashQuad, HashTriple, Operation, SafeTransaction};
pub use version::{resolve, DomainVariant, SafeTxVariant, SafeVersion, TypehashSet};

// Re-export alloy types that are commonly used
pub use alloy::primitives::{Address, Bytes, B256, U256};
