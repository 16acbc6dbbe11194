//! Type-aware parsing of CLI strings into raw argument values.
//!
//! The output is the JSON form the intent builder binds, so a value typed on
//! the command line and a default from the command table go through the
//! same binding rules.

use std::collections::HashMap;

use interact_core::command::{decimal, ArgType, CommandDef, Primitive};
use serde_json::Value;

use crate::cli::snake_to_kebab;

/// Parse a CLI string according to its declared type.
pub fn parse_value(raw: &str, ty: &ArgType) -> Result<Value, String> {
    match ty {
        ArgType::Primitive(p) => parse_primitive(raw, *p),
        ArgType::Option { option } => {
            if raw == "none" || raw == "null" || raw.is_empty() {
                Ok(Value::Null)
            } else {
                parse_value(raw, option)
            }
        }
        ArgType::List { list } => {
            if looks_like_json_array(raw) {
                return parse_json_array(raw);
            }
            if raw.is_empty() {
                return Ok(Value::Array(vec![]));
            }
            raw.split(',')
                .map(str::trim)
                .enumerate()
                .map(|(i, part)| parse_value(part, list).map_err(|e| format!("Element [{}]: {}", i, e)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        ArgType::Tuple { tuple } => {
            if looks_like_json_array(raw) {
                return parse_json_array(raw);
            }
            let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
            if parts.len() != tuple.len() {
                return Err(format!("Tuple {} needs {} fields, got {}", ty, tuple.len(), parts.len()));
            }
            tuple
                .iter()
                .zip(&parts)
                .enumerate()
                .map(|(i, (field_ty, part))| {
                    parse_value(part, field_ty).map_err(|e| format!("Field [{}]: {}", i, e))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
    }
}

fn parse_primitive(raw: &str, prim: Primitive) -> Result<Value, String> {
    match prim {
        Primitive::U8 | Primitive::U32 | Primitive::U64 | Primitive::BigUint => {
            // Width is checked when the value is bound; only the syntax here.
            decimal::validate(raw).map_err(|e| format!("Invalid {} '{}': {}", prim, raw, e))?;
            Ok(Value::String(raw.to_string()))
        }
        Primitive::Bool => match raw {
            "true" | "1" | "yes" => Ok(Value::Bool(true)),
            "false" | "0" | "no" => Ok(Value::Bool(false)),
            _ => Err(format!("Invalid bool '{}': expected true/false", raw)),
        },
        Primitive::String | Primitive::Address => Ok(Value::String(raw.to_string())),
    }
}

fn looks_like_json_array(raw: &str) -> bool {
    raw.trim_start().starts_with('[')
}

fn parse_json_array(raw: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(v @ Value::Array(_)) => Ok(v),
        Ok(_) => Err(format!("Expected a JSON array, got '{}'", raw)),
        Err(e) => Err(format!("Invalid JSON array '{}': {}", raw, e)),
    }
}

/// Assemble the positional raw arguments for `def` from `--kebab-name value`
/// flags, falling back to each argument's default. Option arguments without
/// a default are absent when not given.
///
/// Every problem is collected so they can be reported together.
pub fn collect_args(def: &CommandDef, flags: &HashMap<String, String>) -> Result<Vec<Value>, Vec<String>> {
    let mut errors = vec![];
    let mut values = Vec::with_capacity(def.args.len());

    for arg in &def.args {
        let key = snake_to_kebab(&arg.name);
        match (flags.get(&key), &arg.default) {
            (Some(raw), _) => match parse_value(raw, &arg.type_) {
                Ok(v) => values.push(v),
                Err(e) => errors.push(format!("--{}: {}", key, e)),
            },
            (None, Some(default)) => values.push(default.clone()),
            (None, None) if matches!(arg.type_, ArgType::Option { .. }) => values.push(Value::Null),
            (None, None) => errors.push(format!("Missing required argument --{}", key)),
        }
    }

    let known: Vec<String> = def.args.iter().map(|a| snake_to_kebab(&a.name)).collect();
    let mut unknown: Vec<&String> = flags.keys().filter(|k| !known.contains(k)).collect();
    unknown.sort();
    for key in unknown {
        errors.push(format!("Unknown argument --{} for '{}'", key, def.name));
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}
