//! Command-driven CLI library for a single MultiversX contract.
//!
//! Provides:
//! - the built-in command table and loading of custom ones
//! - type-aware parsing of `--arg value` pairs into raw argument values
//! - the signer collaborator interface
//! - command execution: build, preview, submit, report
//!
//! The `interact` binary wires these together without a signer, so it
//! previews every command; applications with access to a wallet call
//! [`tx::execute_command`] with their own [`wallet::Signer`].

pub mod cli;
pub mod parse;
pub mod wallet;
pub mod tx;
