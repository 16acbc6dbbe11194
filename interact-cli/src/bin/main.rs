//! `interact`: run a named command against the contract.
//!
//! This binary links no wallet, so every command stops after the preview.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use interact_cli::cli::{load_table, parse_command_args, print_command_help, print_help, Cli};
use interact_cli::tx::execute_command;
use interact_core::config::ResolvedConfig;
use tracing_subscriber::EnvFilter;

const BINARY_NAME: &str = "interact";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let table = load_table(cli.commands.as_deref()).context("failed to load command table")?;

    let Some((name, rest)) = cli.invocation.split_first() else {
        print_help(&table, BINARY_NAME);
        return Ok(());
    };

    match name.as_str() {
        "help" => match rest.first() {
            Some(command) => {
                let def = table
                    .get(command)
                    .ok_or_else(|| anyhow!("unknown command '{}'", command))?;
                print_command_help(def);
            }
            None => print_help(&table, BINARY_NAME),
        },
        "commands" => println!("{}", table.to_json_pretty()?),
        _ => {
            let def = table
                .get(name)
                .ok_or_else(|| anyhow!("unknown command '{}' (run `{} help`)", name, BINARY_NAME))?;
            let flags = parse_command_args(rest);
            if flags.contains_key("help") || flags.contains_key("h") {
                print_command_help(def);
                return Ok(());
            }

            let config = ResolvedConfig::load(cli.chain, &cli.data)
                .with_context(|| format!("failed to load {}", cli.data.display()))?;
            execute_command(def, &table, &config, &flags, None).await?;
        }
    }
    Ok(())
}
