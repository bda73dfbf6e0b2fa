use std::fmt::Write as _;

use alloy::primitives::{hex, Address, B256};
use color_eyre::eyre::Result;
use safe_hashes::nested::NestedApproval;
use safe_hashes::source::NestedMessageReport;
use safe_hashes::{
    CallDescription, EmptyCallKind, GasRefundWarning, HashQuad, HashTriple, MessageReport, Network,
    OperationTrust, SafeTransaction, TransactionReport,
};
use serde::{Serialize, Serializer};

/// Renders a hash the way older Ledger firmware shows it: one `\xNN` escape per byte
pub fn legacy_ledger_format(hash: &B256) -> String {
    hash.iter().fold(String::with_capacity(128), |mut out, byte| {
        let _ = write!(out, "\\x{byte:02x}");
        out
    })
}

/// Hardware wallets display hashes in upper case
fn display_hash(hash: &B256) -> String {
    format!("0x{}", hex::encode_upper(hash))
}

fn print_serialized<T: Serialize>(value: &T, text: impl FnOnce() -> String, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn network_label(chain_id: u64) -> String {
    match Network::from_chain_id(chain_id) {
        Some(network) => format!("{network} (chain ID {chain_id})"),
        None => format!("chain ID {chain_id}"),
    }
}

fn describe(description: &CallDescription) -> String {
    match description {
        CallDescription::Empty(EmptyCallKind::OnChainRejection) => {
            "On-chain rejection: zero-value call to the Safe itself".to_string()
        }
        CallDescription::Empty(EmptyCallKind::SelfTransfer) => "ETH transfer from the Safe to itself".to_string(),
        CallDescription::Empty(EmptyCallKind::EmptyCall) => "Zero-value call without calldata".to_string(),
        CallDescription::Empty(EmptyCallKind::EtherTransfer) => "Plain ETH transfer".to_string(),
        CallDescription::Decoded(call) => {
            let params: Vec<String> = call
                .parameters
                .iter()
                .map(|p| format!("{} {}: {}", p.ty, p.name, p.value))
                .collect();
            format!("{}({})", call.method, params.join(", "))
        }
        CallDescription::Unknown => "Unknown calldata, decode it independently".to_string(),
    }
}

fn warnings(operation: OperationTrust, gas_refund: Option<GasRefundWarning>) -> Vec<&'static str> {
    let mut out = Vec::new();
    if operation == OperationTrust::UntrustedDelegateCall {
        out.push("Delegate call into an untrusted contract. It can modify the Safe's storage.");
    }
    match gas_refund {
        Some(GasRefundWarning::CustomGasToken) => {
            out.push("Custom gas token. The refund is paid in a token other than ETH.")
        }
        Some(GasRefundWarning::CustomRefundReceiver) => {
            out.push("Custom refund receiver. The gas refund goes to a non-default address.")
        }
        Some(GasRefundWarning::CustomGasTokenAndRefundReceiver { nonzero_gas_price: true }) => out.push(
            "Custom gas token and refund receiver with a non-zero gas price. Funds can be drained through the refund.",
        ),
        Some(GasRefundWarning::CustomGasTokenAndRefundReceiver { nonzero_gas_price: false }) => {
            out.push("Custom gas token and refund receiver.")
        }
        None => {}
    }
    out
}

fn write_transaction(out: &mut String, tx: &SafeTransaction) {
    let _ = writeln!(out, "  To: {}", tx.to);
    let _ = writeln!(out, "  Value: {}", tx.value);
    let _ = writeln!(out, "  Data: {}", tx.data);
    let _ = writeln!(out, "  Operation: {}", tx.operation);
    let _ = writeln!(out, "  Safe Tx Gas: {}", tx.safe_tx_gas);
    let _ = writeln!(out, "  Base Gas: {}", tx.base_gas);
    let _ = writeln!(out, "  Gas Price: {}", tx.gas_price);
    let _ = writeln!(out, "  Gas Token: {}", tx.gas_token);
    let _ = writeln!(out, "  Refund Receiver: {}", tx.refund_receiver);
    let _ = writeln!(out, "  Nonce: {}", tx.nonce);
}

fn write_triple(out: &mut String, hashes: &HashTriple) {
    let _ = writeln!(out, "  Domain hash: {}", display_hash(&hashes.domain_hash));
    let _ = writeln!(out, "  Message hash: {}", display_hash(&hashes.message_hash));
    let _ = writeln!(out, "  Safe transaction hash: {}", hashes.safe_tx_hash);
    let _ = writeln!(out, "  Legacy Ledger format: {}", legacy_ledger_format(&hashes.message_hash));
}

fn write_quad(out: &mut String, hashes: &HashQuad) {
    let _ = writeln!(out, "  Raw message hash: {}", hashes.safe_message);
    let _ = writeln!(out, "  Domain hash: {}", display_hash(&hashes.domain_hash));
    let _ = writeln!(out, "  Message hash: {}", display_hash(&hashes.message_hash));
    let _ = writeln!(out, "  Safe message hash: {}", hashes.safe_message_hash);
}

/// Writes Safe addresses in EIP-55 form so JSON matches the text output
fn checksummed<S: Serializer>(address: &Address, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

#[derive(Serialize)]
pub struct NestedOutput {
    #[serde(serialize_with = "checksummed")]
    pub nested_safe: Address,
    pub version: String,
    pub approved_hash: B256,
    pub transaction: SafeTransaction,
    #[serde(flatten)]
    pub hashes: HashTriple,
    pub legacy_ledger_format: String,
}

impl NestedOutput {
    pub fn new(nested_safe: Address, version: &str, approval: &NestedApproval) -> Self {
        Self {
            nested_safe,
            version: version.to_string(),
            approved_hash: approval.approved_hash,
            transaction: approval.transaction.clone(),
            hashes: approval.hashes.hashes,
            legacy_ledger_format: legacy_ledger_format(&approval.hashes.hashes.message_hash),
        }
    }

    fn write_text(&self, out: &mut String) {
        let _ = writeln!(out, "Nested Safe {} (version {})", self.nested_safe, self.version);
        let _ = writeln!(out, "Approves: {}", self.approved_hash);
        let _ = writeln!(out, "Approval transaction:");
        write_transaction(out, &self.transaction);
        let _ = writeln!(out, "Approval hashes:");
        write_triple(out, &self.hashes);
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    pub fn print(&self, json: bool) -> Result<()> {
        print_serialized(self, || self.render_text(), json)
    }
}

#[derive(Serialize)]
pub struct TransactionOutput {
    pub chain_id: u64,
    #[serde(serialize_with = "checksummed")]
    pub safe: Address,
    pub version: String,
    pub candidates: usize,
    pub transaction: SafeTransaction,
    #[serde(flatten)]
    pub hashes: HashTriple,
    pub legacy_ledger_format: String,
    pub operation: OperationTrust,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_refund: Option<GasRefundWarning>,
    pub description: CallDescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<NestedOutput>,
}

impl From<&TransactionReport> for TransactionOutput {
    fn from(report: &TransactionReport) -> Self {
        Self {
            chain_id: report.chain.chain_id,
            safe: report.chain.verifying_contract,
            version: report.version.clone(),
            candidates: report.candidates,
            transaction: report.transaction.clone(),
            hashes: report.hashes.hashes,
            legacy_ledger_format: legacy_ledger_format(&report.hashes.hashes.message_hash),
            operation: report.hashes.operation,
            gas_refund: report.hashes.gas_refund,
            description: report.description.clone(),
            nested: report
                .nested
                .as_ref()
                .map(|nested| NestedOutput::new(nested.address, &nested.version, &nested.approval)),
        }
    }
}

impl TransactionOutput {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Network: {}", network_label(self.chain_id));
        let _ = writeln!(out, "Safe: {} (version {})", self.safe, self.version);
        if self.candidates > 1 {
            let _ = writeln!(out, "Candidates for this nonce: {}", self.candidates);
        }
        let _ = writeln!(out, "\nTransaction data:");
        write_transaction(&mut out, &self.transaction);
        let _ = writeln!(out, "Call: {}", describe(&self.description));
        for warning in warnings(self.operation, self.gas_refund) {
            let _ = writeln!(out, "WARNING: {warning}");
        }
        let _ = writeln!(out, "\nHashes:");
        write_triple(&mut out, &self.hashes);
        if let Some(nested) = &self.nested {
            out.push('\n');
            nested.write_text(&mut out);
        }
        out
    }

    pub fn print(&self, json: bool) -> Result<()> {
        print_serialized(self, || self.render_text(), json)
    }
}

#[derive(Serialize)]
pub struct NestedMessageOutput {
    #[serde(serialize_with = "checksummed")]
    pub nested_safe: Address,
    pub version: String,
    #[serde(flatten)]
    pub hashes: HashQuad,
}

impl From<&NestedMessageReport> for NestedMessageOutput {
    fn from(report: &NestedMessageReport) -> Self {
        Self {
            nested_safe: report.address,
            version: report.version.clone(),
            hashes: report.hashes,
        }
    }
}

#[derive(Serialize)]
pub struct MessageOutput {
    pub chain_id: u64,
    #[serde(serialize_with = "checksummed")]
    pub safe: Address,
    pub version: String,
    pub message: String,
    #[serde(flatten)]
    pub hashes: HashQuad,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<NestedMessageOutput>,
}

impl MessageOutput {
    pub fn new(report: &MessageReport, raw_message: &[u8]) -> Self {
        Self {
            chain_id: report.chain.chain_id,
            safe: report.chain.verifying_contract,
            version: report.version.clone(),
            message: String::from_utf8_lossy(raw_message).into_owned(),
            hashes: report.hashes,
            nested: report.nested.as_ref().map(NestedMessageOutput::from),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Network: {}", network_label(self.chain_id));
        let _ = writeln!(out, "Safe: {} (version {})", self.safe, self.version);
        let _ = writeln!(out, "\nMessage:\n{}", self.message);
        let _ = writeln!(out, "Hashes:");
        write_quad(&mut out, &self.hashes);
        if let Some(nested) = &self.nested {
            let _ = writeln!(out, "\nNested Safe {} (version {}):", nested.nested_safe, nested.version);
            write_quad(&mut out, &nested.hashes);
        }
        out
    }

    pub fn print(&self, json: bool) -> Result<()> {
        print_serialized(self, || self.render_text(), json)
    }
}

#[derive(Serialize)]
pub struct NetworkOutput {
    pub name: &'static str,
    pub chain_id: u64,
}

impl From<&Network> for NetworkOutput {
    fn from(network: &Network) -> Self {
        Self {
            name: network.name(),
            chain_id: network.chain_id(),
        }
    }
}

impl NetworkOutput {
    pub fn print_all(networks: &[NetworkOutput], json: bool) -> Result<()> {
        print_serialized(
            &networks,
            || {
                networks.iter().fold(String::new(), |mut out, n| {
                    let _ = writeln!(out, "{:<16} {}", n.name, n.chain_id);
                    out
                })
            },
            json,
        )
    }
}
