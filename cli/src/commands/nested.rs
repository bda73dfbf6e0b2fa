use std::str::FromStr;

use alloy::primitives::B256;
use color_eyre::eyre::{eyre, Result, WrapErr};
use safe_hashes::{nested_approval_hashes, NestedSigner};

use crate::cli::NestedArgs;
use crate::output::NestedOutput;

pub fn run(args: NestedArgs, json: bool) -> Result<()> {
    let chain = args.chain.context()?;
    let safe_tx_hash = B256::from_str(&args.safe_tx_hash)
        .wrap_err_with(|| format!("invalid safeTxHash: {}", args.safe_tx_hash))?;

    let signer = NestedSigner::for_transaction(args.nested.address()?, args.nested.nonce()?)?
        .ok_or_else(|| eyre!("--nested-safe-address and --nested-safe-nonce are required"))?;
    let version = args
        .nested
        .nested_safe_version
        .unwrap_or(args.chain.safe_version);

    let approval = nested_approval_hashes(&chain, safe_tx_hash, &signer, &version)?;

    NestedOutput::new(signer.address, &version, &approval).print(json)
}
