//! Safe off-chain message hashing
//!
//! Off-chain messages are signed as `SafeMessage(bytes message)` where
//! `message` is the EIP-191 personal-message hash of the raw text. When a
//! Safe owner is itself a Safe, the owner signs the primary Safe's message
//! hash as its own `SafeMessage`, so two domains are involved.

use alloy::primitives::{eip191_hash_message, Address, B256};

use crate::chain::ChainContext;
use crate::encoding::{domain_hash_for, safe_message_struct_hash, signing_hash};
use crate::error::Result;
use crate::types::HashQuad;
use crate::version::{resolve, DomainVariant};

/// Hashes a raw message the way `personal_sign` does
pub trait PersonalMessageHasher {
    fn personal_message_hash(&self, message: &[u8]) -> B256;
}

/// EIP-191 version `0x45`: `"\x19Ethereum Signed Message:\n" || len || message`
#[derive(Debug, Clone, Copy, Default)]
pub struct Eip191;

impl PersonalMessageHasher for Eip191 {
    fn personal_message_hash(&self, message: &[u8]) -> B256 {
        eip191_hash_message(message)
    }
}

/// Deletes every carriage return, turning CRLF line endings into LF
pub fn normalize_line_endings(raw: &[u8]) -> Vec<u8> {
    raw.iter().copied().filter(|b| *b != b'\r').collect()
}

/// Wraps an already hashed message into the Safe's `SafeMessage` digest
fn wrap_safe_message(chain: &ChainContext, domain: DomainVariant, safe_message: B256) -> HashQuad {
    let domain_hash = domain_hash_for(chain, domain);
    let message_hash = safe_message_struct_hash(safe_message);
    let safe_message_hash = signing_hash(domain_hash, message_hash);

    HashQuad {
        safe_message,
        domain_hash,
        message_hash,
        safe_message_hash,
    }
}

/// Computes the hashes a signer sees for an off-chain message
pub fn offchain_message_hashes(chain: &ChainContext, raw_message: &[u8], version: &str) -> Result<HashQuad> {
    offchain_message_hashes_with(&Eip191, chain, raw_message, version)
}

/// Same as [`offchain_message_hashes`] with a caller-supplied personal-message hasher
pub fn offchain_message_hashes_with<H: PersonalMessageHasher + ?Sized>(
    hasher: &H,
    chain: &ChainContext,
    raw_message: &[u8],
    version: &str,
) -> Result<HashQuad> {
    let typehashes = resolve(version)?;
    let message = normalize_line_endings(raw_message);
    let safe_message = hasher.personal_message_hash(&message);

    let hashes = wrap_safe_message(chain, typehashes.domain, safe_message);
    tracing::debug!(
        safe = %chain.verifying_contract,
        safe_message_hash = %hashes.safe_message_hash,
        "computed Safe message hash"
    );
    Ok(hashes)
}

/// Computes the hashes a nested Safe signs to approve a message for the primary Safe.
///
/// `chain` describes the primary Safe. The primary Safe's message hash is
/// always derived with the chain-ID domain layout, whatever the primary
/// Safe's version; only the nested Safe's own domain follows `nested_version`.
pub fn nested_offchain_message_hashes(
    chain: &ChainContext,
    nested_safe: Address,
    raw_message: &[u8],
    nested_version: &str,
) -> Result<HashQuad> {
    nested_offchain_message_hashes_with(&Eip191, chain, nested_safe, raw_message, nested_version)
}

/// Same as [`nested_offchain_message_hashes`] with a caller-supplied personal-message hasher
pub fn nested_offchain_message_hashes_with<H: PersonalMessageHasher + ?Sized>(
    hasher: &H,
    chain: &ChainContext,
    nested_safe: Address,
    raw_message: &[u8],
    nested_version: &str,
) -> Result<HashQuad> {
    let nested_typehashes = resolve(nested_version)?;
    let message = normalize_line_endings(raw_message);
    let personal_hash = hasher.personal_message_hash(&message);

    let inner = wrap_safe_message(chain, DomainVariant::Current, personal_hash);
    let nested_chain = chain.with_contract(nested_safe);
    let hashes = wrap_safe_message(&nested_chain, nested_typehashes.domain, inner.safe_message_hash);

    tracing::debug!(
        safe = %chain.verifying_contract,
        nested_safe = %nested_safe,
        safe_message_hash = %hashes.safe_message_hash,
        "computed nested Safe message hash"
    );
    Ok(hashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, b256, keccak256};

    const SAFE: Address = address!("0x111CEEee040739fD91D29C34C33E6B3E112F2177");
    const NESTED: Address = address!("0x6bc56d6CE87C86CB0756c616bECFD3Cd32b09251");
    const MESSAGE: &[u8] = b"Hello, Safe!\nPlease sign this message.\n";

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings(b"a\r\nb\rc\n"), b"a\nbc\n");
        assert_eq!(normalize_line_endings(b""), b"");
    }

    #[test]
    fn test_mainnet_message() {
        let chain = ChainContext::new(1, SAFE);
        let hashes = offchain_message_hashes(&chain, MESSAGE, "1.3.0").unwrap();

        assert_eq!(
            hashes.safe_message,
            b256!("0x34733f16f7d082bdd9d14d95b32af6ab0f3080bc175deb19b256fd54e51531b2")
        );
        assert_eq!(
            hashes.domain_hash,
            b256!("0xf10a0411ba1cd4b0a92f98d5985c028a7e8c19b744df4accc6ff8f0de316e0df")
        );
        assert_eq!(
            hashes.message_hash,
            b256!("0xe36d79e963c9893d32fd4c10f6ad9ebd9962dddcb7de7a36c79f178c286de7d0")
        );
        assert_eq!(
            hashes.safe_message_hash,
            b256!("0x07af0699b3479252f6d072a4fa05016e011de9bdbe8d4f0afff8e54f4645bafb")
        );
    }

    #[test]
    fn test_legacy_domain_message() {
        let chain = ChainContext::new(1, SAFE);
        let hashes = offchain_message_hashes(&chain, MESSAGE, "1.1.1").unwrap();

        assert_eq!(
            hashes.domain_hash,
            b256!("0xe3afd233ad5e3dd32f4d1b0d2f59061f76865324a16e621c53d9bf762e40511f")
        );
        assert_eq!(
            hashes.safe_message_hash,
            b256!("0xb9429cbc083d0a14255071db2ffbf6ebe9f8f4566200696a78e3e2f0b8c7d44c")
        );
    }

    #[test]
    fn test_crlf_matches_lf() {
        let chain = ChainContext::new(1, SAFE);
        let crlf = b"Hello, Safe!\r\nPlease sign this message.\r\n";
        assert_eq!(
            offchain_message_hashes(&chain, crlf, "1.4.1").unwrap(),
            offchain_message_hashes(&chain, MESSAGE, "1.4.1").unwrap()
        );
    }

    #[test]
    fn test_nested_message() {
        let chain = ChainContext::new(1, SAFE);
        let hashes = nested_offchain_message_hashes(&chain, NESTED, MESSAGE, "1.4.1").unwrap();

        // The nested Safe signs the primary Safe's message hash
        assert_eq!(
            hashes.safe_message,
            b256!("0x07af0699b3479252f6d072a4fa05016e011de9bdbe8d4f0afff8e54f4645bafb")
        );
        assert_eq!(
            hashes.domain_hash,
            b256!("0x998777a7de89795a6459e0e0ba2a2517795bef7d69bbe79681bbca72dd809e74")
        );
        assert_eq!(
            hashes.message_hash,
            b256!("0x2285618cb580f56a5fc95473854d31e513581efc4de063b900d9e043a350cacd")
        );
        assert_eq!(
            hashes.safe_message_hash,
            b256!("0x62f905d02338b5d1bfa945f7e03da88e3d1303fb324d526e0a22f354d69104bd")
        );
    }

    #[test]
    fn test_nested_inner_hash_ignores_primary_legacy_domain() {
        // Even for a pre-1.2.0 primary Safe the inner message hash uses the
        // chain-ID domain, so it differs from the primary's own message hash.
        let chain = ChainContext::new(1, SAFE);
        let primary = offchain_message_hashes(&chain, MESSAGE, "1.1.1").unwrap();
        let nested = nested_offchain_message_hashes(&chain, NESTED, MESSAGE, "1.4.1").unwrap();

        assert_ne!(nested.safe_message, primary.safe_message_hash);
        assert_eq!(
            nested.safe_message,
            offchain_message_hashes(&chain, MESSAGE, "1.3.0").unwrap().safe_message_hash
        );
    }

    #[test]
    fn test_nested_version_controls_outer_domain() {
        let chain = ChainContext::new(1, SAFE);
        let hashes = nested_offchain_message_hashes(&chain, NESTED, MESSAGE, "1.0.0").unwrap();
        assert_eq!(
            hashes.domain_hash,
            domain_hash_for(&chain.with_contract(NESTED), DomainVariant::Legacy)
        );
        assert!(nested_offchain_message_hashes(&chain, NESTED, MESSAGE, "")
            .unwrap_err()
            .is_unsupported_version());
    }

    #[test]
    fn test_custom_personal_hasher() {
        struct RawKeccak;
        impl PersonalMessageHasher for RawKeccak {
            fn personal_message_hash(&self, message: &[u8]) -> B256 {
                keccak256(message)
            }
        }

        let chain = ChainContext::new(1, SAFE);
        let hashes = offchain_message_hashes_with(&RawKeccak, &chain, b"a\r\nb", "1.3.0").unwrap();
        assert_eq!(hashes.safe_message, keccak256(b"a\nb"));
    }
}
