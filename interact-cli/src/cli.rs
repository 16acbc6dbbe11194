//! CLI front end: flags, help text, `--arg value` collection.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use interact_core::command::{ArgType, CommandDef, CommandKind, CommandTable, Primitive};
use interact_core::config::Environment;
use interact_core::error::ConfigError;

/// Command table shipped with the tool.
pub const DEFAULT_COMMANDS: &str = include_str!("../commands.json");

/// Deploy, upgrade, call and query a MultiversX contract by command name.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Network to use: devnet, testnet or mainnet.
    #[arg(long, env = "CHAIN", default_value = "devnet")]
    pub chain: Environment,

    /// Data file holding the contract code and its address per network.
    #[arg(long, env = "INTERACT_DATA", default_value = "data.json")]
    pub data: PathBuf,

    /// Command table JSON. Defaults to the built-in table.
    #[arg(long, env = "INTERACT_COMMANDS")]
    pub commands: Option<PathBuf>,

    /// Command name followed by its `--<arg> <value>` pairs.
    /// `help [COMMAND]` and `commands` are always available.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub invocation: Vec<String>,
}

/// Load the command table from `path`, or the built-in one.
pub fn load_table(path: Option<&Path>) -> Result<CommandTable, ConfigError> {
    let json = match path {
        Some(p) => fs::read_to_string(p).map_err(|source| ConfigError::Io {
            path: p.display().to_string(),
            source,
        })?,
        None => DEFAULT_COMMANDS.to_string(),
    };
    Ok(CommandTable::from_json(&json)?)
}

/// Print help for all commands in the table.
pub fn print_help(table: &CommandTable, binary_name: &str) {
    println!("🔧 {} v{} — contract interaction CLI", table.name, table.version);
    println!();
    println!("USAGE:");
    println!("  {} [OPTIONS] <COMMAND> [ARGS]", binary_name);
    println!();
    println!("OPTIONS:");
    println!("  --chain <ENV>              devnet | testnet | mainnet (env: CHAIN)");
    println!("  --data <FILE>              Contract code and addresses (env: INTERACT_DATA)");
    println!("  --commands <FILE>          Command table JSON (env: INTERACT_COMMANDS)");
    println!();
    println!("COMMANDS:");
    println!("  help [COMMAND]             Print help, or details for one command");
    println!("  commands                   Print the command table as JSON");

    for def in &table.commands {
        let args_desc: Vec<String> = def
            .args
            .iter()
            .map(|a| format!("--{} <{}>", snake_to_kebab(&a.name), arg_type_hint(&a.type_)))
            .collect();
        println!("  {:<26} {}", def.name, args_desc.join(" "));
    }
    println!();
    println!("TYPE FORMATS:");
    println!("  u8, u32, u64, biguint      Decimal number; '_' separators and exponents allowed: 15e18");
    println!("  address                    Bech32 account: erd1...");
    println!("  Option<T>                  T, or none/null/empty for absent");
    println!("  List<T>                    Comma-separated values, or a JSON array");
    println!("  (T1, T2, ...)              Comma-separated fields, or a JSON array");
    println!();
    println!("Arguments not given on the command line take their table defaults.");
}

/// Print detailed help for a single command.
pub fn print_command_help(def: &CommandDef) {
    println!("📋 {} — {}, {} arg(s)", def.name, describe_kind(&def.kind), def.args.len());
    println!();
    println!("ARGS:");
    for arg in &def.args {
        let default = match &arg.default {
            Some(v) => format!(" [default: {}]", v),
            None if matches!(arg.type_, ArgType::Option { .. }) => " [default: none]".to_string(),
            None => " [required]".to_string(),
        };
        println!(
            "  --{:<28} {} — format: {}{}",
            snake_to_kebab(&arg.name),
            arg.type_,
            arg_type_hint(&arg.type_),
            default
        );
    }
}

fn describe_kind(kind: &CommandKind) -> String {
    match kind {
        CommandKind::Deploy { gas_limit, metadata } => {
            format!("deploy, gas {}, metadata {}", gas_limit, metadata)
        }
        CommandKind::Upgrade { gas_limit, metadata } => {
            format!("upgrade, gas {}, metadata {}", gas_limit, metadata)
        }
        CommandKind::Call { function, gas_limit, transfers, .. } => {
            let mut s = format!("call {}, gas {}", function, gas_limit);
            for t in transfers {
                s.push_str(&format!(", pays {} {}", t.amount, t.token));
            }
            s
        }
        CommandKind::Query { function, .. } => format!("query {}", function),
    }
}

/// Collect `--key value` pairs. A flag without a value is recorded as "true".
pub fn parse_command_args(args: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let mut i = 0;
    while i < args.len() {
        if let Some(key) = args[i].strip_prefix("--") {
            if i + 1 < args.len() && !args[i + 1].starts_with("--") {
                map.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                map.insert(key.to_string(), "true".to_string());
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    map
}

// ─── String utilities ────────────────────────────────────────────

pub fn snake_to_kebab(s: &str) -> String {
    s.replace('_', "-")
}

pub fn arg_type_hint(ty: &ArgType) -> String {
    match ty {
        ArgType::Primitive(p) => match p {
            Primitive::U8 | Primitive::U32 | Primitive::U64 | Primitive::BigUint => "NUMBER".to_string(),
            Primitive::Bool => "true|false".to_string(),
            Primitive::Address => "ERD1...".to_string(),
            Primitive::String => "TEXT".to_string(),
        },
        ArgType::Option { option } => format!("OPT<{}>", arg_type_hint(option)),
        ArgType::List { list } => format!("{},...", arg_type_hint(list)),
        ArgType::Tuple { tuple } => {
            let parts: Vec<String> = tuple.iter().map(arg_type_hint).collect();
            parts.join(",")
        }
    }
}
