use color_eyre::eyre::{Result, WrapErr};
use safe_hashes::source::{parse_uint, DecimalValue};
use safe_hashes::{
    verify_transaction, InMemorySource, NestedSigner, SignatureDecoder, TransactionRecord,
    TransactionRequest,
};
use serde::Deserialize;

use crate::cli::TransactionArgs;
use crate::output::TransactionOutput;

/// Shapes accepted by `--record`: a service page, a list, or a single record
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordFile {
    Page { results: Vec<TransactionRecord> },
    Many(Vec<TransactionRecord>),
    One(TransactionRecord),
}

impl RecordFile {
    fn into_records(self) -> Vec<TransactionRecord> {
        match self {
            RecordFile::Page { results } => results,
            RecordFile::Many(records) => records,
            RecordFile::One(record) => vec![record],
        }
    }
}

fn read_records(path: &str) -> Result<Vec<TransactionRecord>> {
    let contents = std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {path}"))?;
    let file: RecordFile =
        serde_json::from_str(&contents).wrap_err_with(|| format!("failed to parse {path}"))?;
    Ok(file.into_records())
}

fn record_from_args(args: &TransactionArgs) -> TransactionRecord {
    TransactionRecord {
        to: args.to.clone(),
        value: Some(DecimalValue::Text(args.value.clone())),
        data: args.data.clone(),
        operation: Some(args.operation),
        safe_tx_gas: Some(DecimalValue::Text(args.safe_tx_gas.clone())),
        base_gas: Some(DecimalValue::Text(args.base_gas.clone())),
        gas_price: Some(DecimalValue::Text(args.gas_price.clone())),
        gas_token: args.gas_token.clone(),
        refund_receiver: args.refund_receiver.clone(),
        nonce: None,
    }
}

pub fn run(args: TransactionArgs, json: bool) -> Result<()> {
    let chain = args.chain.context()?;
    let nonce = parse_uint("nonce", &args.nonce)?;
    let nested = NestedSigner::for_transaction(args.nested.address()?, args.nested.nonce()?)?;

    let records = match &args.record {
        Some(path) => read_records(path)?,
        None => vec![record_from_args(&args)],
    };

    let mut source = InMemorySource::new().with_version(&chain, args.chain.safe_version.clone());
    for record in records {
        source = source.with_transaction(&chain, nonce, record);
    }
    if let Some(signer) = &nested {
        let version = args
            .nested
            .nested_safe_version
            .clone()
            .unwrap_or_else(|| args.chain.safe_version.clone());
        source = source.with_version(&chain.with_contract(signer.address), version);
    }

    let request = TransactionRequest {
        chain,
        nonce,
        candidate: args.candidate,
        nested,
    };
    let report = verify_transaction(&source, &source, &SignatureDecoder::with_safe_signatures(), &request)?;

    TransactionOutput::from(&report).print(json)
}
