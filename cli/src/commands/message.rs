use color_eyre::eyre::{Result, WrapErr};
use safe_hashes::{verify_message, InMemorySource, NestedSigner};

use crate::cli::MessageArgs;
use crate::output::MessageOutput;

pub fn run(args: MessageArgs, json: bool) -> Result<()> {
    let chain = args.chain.context()?;
    let nested = NestedSigner::for_message(args.nested.address()?, args.nested.nonce()?)?;

    let raw = std::fs::read(&args.message).wrap_err_with(|| format!("failed to read {}", args.message))?;

    let mut source = InMemorySource::new().with_version(&chain, args.chain.safe_version.clone());
    if let Some(address) = nested {
        let version = args
            .nested
            .nested_safe_version
            .clone()
            .unwrap_or_else(|| args.chain.safe_version.clone());
        source = source.with_version(&chain.with_contract(address), version);
    }

    let report = verify_message(&source, &chain, &raw, nested)?;

    MessageOutput::new(&report, &raw).print(json)
}
