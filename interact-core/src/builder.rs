//! Transaction intent builder.
//!
//! `build_intent` turns a command name, the run configuration and the raw
//! argument values into a `TransactionIntent`. Validation happens in a fixed
//! order, and the first failure wins:
//!
//! 1. the command exists and its definition is sane (non-zero gas, a
//!    function name for calls and queries, no gas on queries, no native
//!    value next to token transfers);
//! 2. the contract address is resolved for every kind but deploy;
//! 3. exactly one raw value is supplied per declared argument;
//! 4. each raw value binds to its declared type;
//! 5. each bound value encodes.
//!
//! Raw values are JSON values: numbers or decimal strings for integers
//! (strings for anything beyond `u64`, optionally with `_` separators or an
//! `e` exponent), booleans, strings for text and bech32 addresses, `null`
//! for an absent option and arrays for lists and tuples.

use num_bigint::BigUint;
use serde_json::Value;
use tracing::{debug, trace};

use crate::codec::{encode, EncodedArgument};
use crate::command::{decimal, ArgSpec, ArgType, CommandDef, CommandKind, CommandTable, Primitive};
use crate::config::ResolvedConfig;
use crate::error::BuildError;
use crate::intent::{CallIntent, DeployIntent, QueryIntent, TokenTransfer, TransactionIntent, UpgradeIntent};
use crate::value::{Address, TypedValue, UintWidth};

/// Build the intent for `command_name`.
pub fn build_intent(
    command_name: &str,
    config: &ResolvedConfig,
    table: &CommandTable,
    raw_args: &[Value],
) -> Result<TransactionIntent, BuildError> {
    let def = table
        .get(command_name)
        .ok_or_else(|| BuildError::UnknownCommand(command_name.to_string()))?;
    validate_definition(def)?;

    debug!(
        command = %def.name,
        kind = def.kind.name(),
        environment = %config.environment(),
        args = raw_args.len(),
        "building intent"
    );

    let target = if def.kind.needs_target() {
        Some(resolve_target(def, config)?)
    } else {
        None
    };

    let values = bind_arguments(def, raw_args)?;
    let args = encode_arguments(def, &values)?;

    let intent = match &def.kind {
        CommandKind::Deploy { gas_limit, metadata } => TransactionIntent::Deploy(DeployIntent {
            code: config.code().to_vec(),
            metadata: *metadata,
            gas_limit: *gas_limit,
            args,
        }),
        CommandKind::Upgrade { gas_limit, metadata } => TransactionIntent::Upgrade(UpgradeIntent {
            target: target.ok_or_else(|| unresolved(def, config))?,
            code: config.code().to_vec(),
            metadata: *metadata,
            gas_limit: *gas_limit,
            args,
        }),
        CommandKind::Call {
            function,
            gas_limit,
            value,
            transfers,
        } => TransactionIntent::Call(CallIntent {
            target: target.ok_or_else(|| unresolved(def, config))?,
            function: function.clone(),
            gas_limit: *gas_limit,
            value: value.clone(),
            transfers: transfers
                .iter()
                .map(|t| TokenTransfer {
                    token_identifier: t.token.clone(),
                    nonce: t.nonce,
                    amount: t.amount.clone(),
                })
                .collect(),
            args,
        }),
        CommandKind::Query { function, .. } => TransactionIntent::Query(QueryIntent {
            target: target.ok_or_else(|| unresolved(def, config))?,
            function: function.clone(),
            args,
        }),
    };

    debug!(command = %def.name, intent = %intent, "intent built");
    Ok(intent)
}

fn validate_definition(def: &CommandDef) -> Result<(), BuildError> {
    let invalid = |reason: &str| BuildError::InvalidCommand {
        command: def.name.clone(),
        reason: reason.to_string(),
    };
    if def.kind.gas_limit() == Some(0) {
        return Err(invalid("gas limit must be positive"));
    }
    match &def.kind {
        CommandKind::Call {
            function,
            value,
            transfers,
            ..
        } => {
            if function.is_empty() {
                return Err(invalid("function name is empty"));
            }
            if transfers.iter().any(|t| t.token.is_empty()) {
                return Err(invalid("token transfer without a token identifier"));
            }
            if !transfers.is_empty() && *value != BigUint::default() {
                return Err(invalid("native value cannot be combined with token transfers"));
            }
        }
        CommandKind::Query { function, gas_limit } => {
            if function.is_empty() {
                return Err(invalid("function name is empty"));
            }
            if gas_limit.is_some() {
                return Err(invalid("queries take no gas limit"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn resolve_target(def: &CommandDef, config: &ResolvedConfig) -> Result<Address, BuildError> {
    config
        .contract_address()
        .copied()
        .ok_or_else(|| unresolved(def, config))
}

fn unresolved(def: &CommandDef, config: &ResolvedConfig) -> BuildError {
    BuildError::UnresolvedAddress {
        command: def.name.clone(),
        environment: config.environment(),
    }
}

fn bind_arguments(def: &CommandDef, raw_args: &[Value]) -> Result<Vec<TypedValue>, BuildError> {
    if raw_args.len() < def.args.len() {
        let index = raw_args.len();
        return Err(BuildError::ArgumentBinding {
            command: def.name.clone(),
            label: def.args[index].name.clone(),
            index,
            reason: format!(
                "missing value ({} declared, {} supplied)",
                def.args.len(),
                raw_args.len()
            ),
        });
    }
    if raw_args.len() > def.args.len() {
        let index = def.args.len();
        return Err(BuildError::ArgumentBinding {
            command: def.name.clone(),
            label: format!("#{}", index),
            index,
            reason: format!(
                "unexpected extra value ({} declared, {} supplied)",
                def.args.len(),
                raw_args.len()
            ),
        });
    }
    def.args
        .iter()
        .zip(raw_args)
        .enumerate()
        .map(|(index, (spec, raw))| bind_argument(&def.name, index, spec, raw))
        .collect()
}

fn encode_arguments(def: &CommandDef, values: &[TypedValue]) -> Result<Vec<EncodedArgument>, BuildError> {
    def.args
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (spec, value))| {
            let encoded = encode(value).map_err(|source| BuildError::Encoding {
                command: def.name.clone(),
                label: spec.name.clone(),
                index,
                source,
            })?;
            trace!(arg = %spec.name, index, value = %value, hex = %encoded.to_hex(), "argument encoded");
            Ok(encoded)
        })
        .collect()
}

/// Bind one raw value to the type declared by `spec`.
pub fn bind_argument(command: &str, index: usize, spec: &ArgSpec, raw: &Value) -> Result<TypedValue, BuildError> {
    bind_value(&spec.type_, raw).map_err(|reason| BuildError::ArgumentBinding {
        command: command.to_string(),
        label: spec.name.clone(),
        index,
        reason,
    })
}

fn bind_value(ty: &ArgType, raw: &Value) -> Result<TypedValue, String> {
    match ty {
        ArgType::Primitive(p) => bind_primitive(*p, raw),
        ArgType::Option { option } => match raw {
            Value::Null => Ok(TypedValue::none()),
            other => Ok(TypedValue::some(bind_value(option, other)?)),
        },
        ArgType::List { list } => match raw {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| bind_value(list, item).map_err(|e| format!("element {}: {}", i, e)))
                .collect::<Result<Vec<_>, _>>()
                .map(TypedValue::List),
            other => Err(mismatch(ty, other)),
        },
        ArgType::Tuple { tuple } => match raw {
            Value::Array(items) if items.len() == tuple.len() => tuple
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (field_ty, item))| bind_value(field_ty, item).map_err(|e| format!("field {}: {}", i, e)))
                .collect::<Result<Vec<_>, _>>()
                .map(TypedValue::Tuple),
            Value::Array(items) => Err(format!(
                "expected a {}-field tuple {}, got {} values",
                tuple.len(),
                ty,
                items.len()
            )),
            other => Err(mismatch(ty, other)),
        },
    }
}

fn bind_primitive(prim: Primitive, raw: &Value) -> Result<TypedValue, String> {
    match prim {
        Primitive::U8 => bind_uint(UintWidth::U8, raw),
        Primitive::U32 => bind_uint(UintWidth::U32, raw),
        Primitive::U64 => bind_uint(UintWidth::U64, raw),
        Primitive::BigUint => bind_uint(UintWidth::Big, raw),
        Primitive::Bool => match raw {
            Value::Bool(b) => Ok(TypedValue::Bool(*b)),
            Value::String(s) if s == "true" => Ok(TypedValue::Bool(true)),
            Value::String(s) if s == "false" => Ok(TypedValue::Bool(false)),
            other => Err(mismatch(&ArgType::Primitive(prim), other)),
        },
        Primitive::String => match raw {
            Value::String(s) => Ok(TypedValue::str(s.as_str())),
            other => Err(mismatch(&ArgType::Primitive(prim), other)),
        },
        Primitive::Address => match raw {
            Value::String(s) => Ok(TypedValue::address(s.as_str())),
            other => Err(mismatch(&ArgType::Primitive(prim), other)),
        },
    }
}

fn bind_uint(width: UintWidth, raw: &Value) -> Result<TypedValue, String> {
    let value = match raw {
        Value::Number(n) => match n.as_u64() {
            Some(v) => v.into(),
            None if n.as_i64().is_some() => return Err(format!("{} is negative", n)),
            None => return Err(format!("{} is not an unsigned integer", n)),
        },
        Value::String(s) => decimal::parse(s)?,
        other => return Err(format!("expected {}, got {}", width, describe(other))),
    };
    if !width.fits(&value) {
        return Err(format!("{} does not fit in {}", value, width));
    }
    Ok(TypedValue::uint(width, value))
}

fn mismatch(ty: &ArgType, raw: &Value) -> String {
    format!("expected {}, got {}", ty, describe(raw))
}

fn describe(raw: &Value) -> String {
    match raw {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("bool {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string \"{}\"", s),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}
