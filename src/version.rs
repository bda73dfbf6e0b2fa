//! Safe contract version resolution
//!
//! Different Safe releases hash with different EIP-712 layouts. Releases
//! before 1.2.0 bind the domain to the verifying contract only, and
//! releases before 1.0.0 name the `baseGas` field `dataGas`, which changes
//! the `SafeTx` typehash. The selection is expressed as ordered rule tables
//! evaluated once per resolution.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

use crate::contracts::{
    DOMAIN_SEPARATOR_TYPEHASH, DOMAIN_SEPARATOR_TYPEHASH_OLD, SAFE_TX_TYPEHASH,
    SAFE_TX_TYPEHASH_OLD,
};
use crate::error::{Error, Result};

/// A Safe contract version, compared numerically per component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SafeVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SafeVersion {
    /// First Safe release whose hashes can be recomputed
    pub const MIN_SUPPORTED: SafeVersion = SafeVersion::new(0, 1, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a version string such as `1.3.0+L2`.
    ///
    /// Anything after `+` is dropped. An empty string is an unsupported
    /// version, not a parse error.
    pub fn parse(version: &str) -> Result<Self> {
        let cleaned = version.split('+').next().unwrap_or_default().trim();
        let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);

        if cleaned.is_empty() {
            return Err(Error::UnsupportedVersion(version.to_string()));
        }

        let mut parts = [0u64; 3];
        let mut count = 0;
        for component in cleaned.split('.') {
            if count == parts.len() {
                return Err(Error::InvalidVersion(version.to_string()));
            }
            parts[count] = component
                .parse()
                .map_err(|_| Error::InvalidVersion(version.to_string()))?;
            count += 1;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl FromStr for SafeVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Ord for SafeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl PartialOrd for SafeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SafeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Shape of the `EIP712Domain` struct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainVariant {
    /// `EIP712Domain(address verifyingContract)`
    Legacy,
    /// `EIP712Domain(uint256 chainId,address verifyingContract)`
    Current,
}

impl DomainVariant {
    pub fn typehash(&self) -> B256 {
        match self {
            DomainVariant::Legacy => DOMAIN_SEPARATOR_TYPEHASH_OLD,
            DomainVariant::Current => DOMAIN_SEPARATOR_TYPEHASH,
        }
    }
}

/// Shape of the `SafeTx` struct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafeTxVariant {
    /// Field named `dataGas`
    Legacy,
    /// Field named `baseGas`
    Current,
}

impl SafeTxVariant {
    pub fn typehash(&self) -> B256 {
        match self {
            SafeTxVariant::Legacy => SAFE_TX_TYPEHASH_OLD,
            SafeTxVariant::Current => SAFE_TX_TYPEHASH,
        }
    }
}

/// Typehashes to use for one Safe version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypehashSet {
    pub domain: DomainVariant,
    pub safe_tx: SafeTxVariant,
}

impl TypehashSet {
    /// The set used by every Safe release from 1.2.0 onwards
    pub const CURRENT: TypehashSet = TypehashSet {
        domain: DomainVariant::Current,
        safe_tx: SafeTxVariant::Current,
    };

    pub fn domain_separator_typehash(&self) -> B256 {
        self.domain.typehash()
    }

    pub fn safe_tx_typehash(&self) -> B256 {
        self.safe_tx.typehash()
    }
}

/// Ordered from newest to oldest; the first rule whose minimum is met wins.
const DOMAIN_RULES: [(SafeVersion, DomainVariant); 2] = [
    (SafeVersion::new(1, 2, 0), DomainVariant::Current),
    (SafeVersion::MIN_SUPPORTED, DomainVariant::Legacy),
];

const SAFE_TX_RULES: [(SafeVersion, SafeTxVariant); 2] = [
    (SafeVersion::new(1, 0, 0), SafeTxVariant::Current),
    (SafeVersion::MIN_SUPPORTED, SafeTxVariant::Legacy),
];

fn select<T: Copy>(rules: &[(SafeVersion, T)], version: SafeVersion) -> Option<T> {
    rules
        .iter()
        .find(|(min, _)| version >= *min)
        .map(|(_, variant)| *variant)
}

/// Selects the typehashes for an already parsed version
pub fn resolve_version(version: SafeVersion) -> Result<TypehashSet> {
    let unsupported = || Error::UnsupportedVersion(version.to_string());
    let domain = select(&DOMAIN_RULES, version).ok_or_else(unsupported)?;
    let safe_tx = select(&SAFE_TX_RULES, version).ok_or_else(unsupported)?;

    tracing::debug!(%version, ?domain, ?safe_tx, "resolved Safe typehashes");

    Ok(TypehashSet { domain, safe_tx })
}

/// Selects the typehashes for a version string like `1.3.0+L2`
pub fn resolve(version: &str) -> Result<TypehashSet> {
    let parsed = SafeVersion::parse(version)?;
    resolve_version(parsed).map_err(|_| Error::UnsupportedVersion(version.to_string()))
}
