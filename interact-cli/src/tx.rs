//! Command execution: collect arguments, build the intent, preview it and
//! hand it to the signer.

use std::collections::HashMap;

use interact_core::builder::build_intent;
use interact_core::command::{CommandDef, CommandTable};
use interact_core::config::ResolvedConfig;
use interact_core::error::BuildError;
use interact_core::intent::TransactionIntent;
use interact_core::payload::{self, Receiver};
use interact_core::value::Address;
use thiserror::Error;
use tracing::{info, warn};

use crate::parse::collect_args;
use crate::wallet::{DeployOutcome, QueryOutcome, Signer, SignerError, TxOutcome};

/// What running a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Built but not submitted: no signer was available.
    Preview(TransactionIntent),
    Deployed(DeployOutcome),
    Sent(TxOutcome),
    Queried(QueryOutcome),
}

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("invalid arguments:\n  {}", .0.join("\n  "))]
    Arguments(Vec<String>),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Signer(#[from] SignerError),
}

/// Execute one command: parse args, build the intent, optionally submit.
///
/// Nothing is submitted unless every argument was bound and encoded.
pub async fn execute_command(
    def: &CommandDef,
    table: &CommandTable,
    config: &ResolvedConfig,
    flags: &HashMap<String, String>,
    signer: Option<&dyn Signer>,
) -> Result<Outcome, ExecuteError> {
    println!("📋 Command: {} ({}) on {}", def.name, def.kind.name(), config.environment());
    println!();

    let raw_args = collect_args(def, flags).map_err(ExecuteError::Arguments)?;
    let intent = build_intent(&def.name, config, table, &raw_args)?;

    print_preview(def, &raw_args, &intent, signer);

    let Some(signer) = signer else {
        warn!(command = %def.name, "no signer available, not submitting");
        println!("⚠️  No signer linked. Preview only, nothing was submitted.");
        return Ok(Outcome::Preview(intent));
    };

    submit(&intent, signer, config).await
}

fn print_preview(
    def: &CommandDef,
    raw_args: &[serde_json::Value],
    intent: &TransactionIntent,
    signer: Option<&dyn Signer>,
) {
    if !def.args.is_empty() {
        println!("Arguments:");
        for ((spec, raw), encoded) in def.args.iter().zip(raw_args).zip(intent.args()) {
            println!("  {} ({}) = {}", spec.name, spec.type_, raw);
            println!("    → 0x{}", encoded.to_hex());
        }
        println!();
    }

    let data = payload::render(intent);
    println!("🔧 Transaction:");
    println!("  {}", intent);
    match data.receiver {
        Receiver::Deploy => println!("  receiver: {} (deploy)", Address::zero()),
        Receiver::Contract(address) => println!("  receiver: {}", address),
        Receiver::Sender => match signer {
            Some(s) => println!("  receiver: {} (sender, multi-token transfer)", s.sender()),
            None => println!("  receiver: <sender> (multi-token transfer)"),
        },
    }
    if let Some(gas) = intent.gas_limit() {
        println!("  gas limit: {}", gas);
    }
    println!("  data: {}", abbreviate(&data.data, 160));
    println!();
}

async fn submit(
    intent: &TransactionIntent,
    signer: &dyn Signer,
    config: &ResolvedConfig,
) -> Result<Outcome, ExecuteError> {
    info!(kind = intent.kind(), environment = %config.environment(), "submitting intent");
    match intent {
        TransactionIntent::Deploy(d) => {
            println!("📤 Deploying contract...");
            let outcome = signer.deploy(d).await?;
            println!("Transaction: {}", config.tx_url(&outcome.tx_hash));
            println!("Contract: {}", config.account_url(&outcome.contract_address));
            Ok(Outcome::Deployed(outcome))
        }
        TransactionIntent::Upgrade(u) => {
            println!("📤 Upgrading contract...");
            let outcome = signer.upgrade(u).await?;
            println!("Transaction: {}", config.tx_url(&outcome.tx_hash));
            Ok(Outcome::Sent(outcome))
        }
        TransactionIntent::Call(c) => {
            println!("📤 Submitting transaction...");
            let outcome = signer.call(c).await?;
            println!("Transaction: {}", config.tx_url(&outcome.tx_hash));
            Ok(Outcome::Sent(outcome))
        }
        TransactionIntent::Query(q) => {
            let outcome = signer.query(q).await?;
            println!("Result:");
            if outcome.return_data.is_empty() {
                println!("  (no values)");
            }
            for (i, value) in outcome.return_data.iter().enumerate() {
                println!("  [{}] {}", i, display_return_value(value));
            }
            Ok(Outcome::Queried(outcome))
        }
    }
}

/// Hex, plus the text when the bytes are printable UTF-8.
pub fn display_return_value(bytes: &[u8]) -> String {
    let hex = format!("0x{}", hex::encode(bytes));
    match std::str::from_utf8(bytes) {
        Ok(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_graphic() || c == ' ') => {
            format!("\"{}\" ({})", s, hex)
        }
        _ => hex,
    }
}

fn abbreviate(s: &str, max: usize) -> String {
    if s.len() <= max || !s.is_ascii() {
        return s.to_string();
    }
    format!("{}…{} ({} chars)", &s[..max / 2], &s[s.len() - max / 2..], s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_return_value() {
        assert_eq!(display_return_value(b".png"), "\".png\" (0x2e706e67)");
        assert_eq!(display_return_value(&[0x00, 0x01]), "0x0001");
        assert_eq!(display_return_value(&[]), "0x");
    }

    #[test]
    fn test_abbreviate_long_data() {
        let long = "ab".repeat(200);
        let short = abbreviate(&long, 20);
        assert!(short.starts_with("ababababab…"));
        assert!(short.ends_with("(400 chars)"));
        assert_eq!(abbreviate("mint", 20), "mint");
    }
}
