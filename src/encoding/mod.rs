//! Encoding utilities for Safe hashes

mod calldata;
mod eip712;

pub use calldata::{decode_approve_hash, encode_approve_hash};
pub use eip712::{
    domain_hash, domain_hash_for, encode_struct, hash_struct, safe_message_struct_hash,
    safe_tx_struct_hash, signing_hash,
};
