//! CLI helpers: help text, argument parsing, string utilities.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use chaincall_core::idl::{IdlInstruction, IdlType, ProgramIdl};
use chaincall_core::types::PrimitiveType;

/// Print the instructions an IDL exposes.
pub fn print_idl_summary(idl: &ProgramIdl) {
    let version = if idl.version.is_empty() { "?" } else { idl.version.as_str() };
    println!("🔧 {} v{}", idl.name, version);
    println!();
    println!("INSTRUCTIONS:");
    for ix in &idl.instructions {
        let args_desc: Vec<String> = ix
            .args
            .iter()
            .map(|a| format!("--{} <{}>", to_kebab_case(&a.name), idl_type_hint(&a.type_)))
            .collect();
        let acct_desc: Vec<String> = ix
            .accounts
            .iter()
            .map(|a| format!("--{} <BASE58>", account_flag(&a.name)))
            .collect();
        let all_args: Vec<String> = args_desc.into_iter().chain(acct_desc).collect();
        println!("  {:<20} {}", ix.name, all_args.join(" "));
    }
}

/// Print detailed help for a single instruction.
pub fn print_instruction_help(ix: &IdlInstruction) {
    println!("📋 {} — {} account(s), {} arg(s)", ix.name, ix.accounts.len(), ix.args.len());
    println!();
    println!("ACCOUNTS:");
    for acc in &ix.accounts {
        let mut flags = vec![];
        if acc.writable { flags.push("mut"); }
        if acc.signer { flags.push("signer"); }
        if acc.optional { flags.push("optional"); }
        let flags_str = if flags.is_empty() { String::new() } else { format!(" [{}]", flags.join(", ")) };
        println!("  --{:<25} {}{}", account_flag(&acc.name), acc.name, flags_str);
    }
    println!();
    println!("ARGS:");
    for arg in &ix.args {
        let supported = if arg.type_.as_primitive().is_some() { "" } else { " (unsupported)" };
        println!("  --{:<25} {} ({}) — format: {}{}",
            to_kebab_case(&arg.name), arg.name, arg.type_.display_name(), idl_type_hint(&arg.type_), supported);
    }
}

/// Print every type the codec can encode and how it is written.
pub fn print_supported_types() {
    println!("SUPPORTED TYPES:");
    for ty in PrimitiveType::ALL {
        let layout = match ty.fixed_size() {
            Some(n) => format!("{} byte(s), little-endian", n),
            None if ty == PrimitiveType::StringUtf8 => "u32 length prefix + UTF-8 bytes".to_string(),
            None => "raw bytes, no prefix".to_string(),
        };
        println!("  {:<8} {}", ty.idl_name(), layout);
    }
}

/// Parse `--key value` and `--key=value` pairs for `ix` into a map.
///
/// A flag followed by another flag (or by nothing) has no value. That is
/// only accepted for `bool` args, which read as `"true"`, and for
/// `--help`. Values starting with `--` must use the `--key=value` form.
pub fn parse_instruction_args(ix: &IdlInstruction, args: &[String]) -> Result<HashMap<String, String>> {
    let bool_flags: HashSet<String> = ix
        .args
        .iter()
        .filter(|a| a.type_.as_primitive() == Some(PrimitiveType::Bool))
        .map(|a| to_kebab_case(&a.name))
        .collect();

    let mut map = HashMap::new();
    let mut missing_value = vec![];
    let mut i = 0;
    while i < args.len() {
        let Some(flag) = args[i].strip_prefix("--") else {
            i += 1;
            continue;
        };
        if let Some((key, value)) = flag.split_once('=') {
            map.insert(key.to_string(), value.to_string());
            i += 1;
        } else if i + 1 < args.len() && !args[i + 1].starts_with("--") {
            map.insert(flag.to_string(), args[i + 1].clone());
            i += 2;
        } else {
            if bool_flags.contains(flag) || flag == "help" || flag == "h" {
                map.insert(flag.to_string(), "true".to_string());
            } else {
                missing_value.push(format!("--{}", flag));
            }
            i += 1;
        }
    }
    if !missing_value.is_empty() {
        bail!("Missing value for {}", missing_value.join(", "));
    }
    Ok(map)
}

pub fn wants_help(args: &HashMap<String, String>) -> bool {
    args.contains_key("help") || args.contains_key("h")
}

// ─── String utilities ────────────────────────────────────────────

/// `create_post` and `createPost` both become `create-post`.
pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, ch) in s.chars().enumerate() {
        if ch == '_' {
            out.push('-');
        } else if ch.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Flag name for an account: `systemProgram` → `system-program-account`.
pub fn account_flag(name: &str) -> String {
    format!("{}-account", to_kebab_case(name))
}

pub fn idl_type_hint(ty: &IdlType) -> String {
    match ty.as_primitive() {
        Some(p) => match p {
            PrimitiveType::U8 | PrimitiveType::U16 | PrimitiveType::U32
            | PrimitiveType::U64 | PrimitiveType::U128 => "NUMBER".to_string(),
            PrimitiveType::I8 | PrimitiveType::I16 | PrimitiveType::I32
            | PrimitiveType::I64 | PrimitiveType::I128 => "SIGNED".to_string(),
            PrimitiveType::Bool => "true|false".to_string(),
            PrimitiveType::StringUtf8 => "TEXT".to_string(),
            PrimitiveType::PublicKey => "BASE58".to_string(),
            PrimitiveType::RawBytes => "BYTES".to_string(),
        },
        None => "TEXT".to_string(),
    }
}
