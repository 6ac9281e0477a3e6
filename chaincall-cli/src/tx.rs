//! Instruction request building.
//!
//! Turns IDL-driven CLI flags into the request body the backend expects:
//! program id, ordered account metas, hex instruction data and an
//! optional fee payer. Signing and submission happen elsewhere.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use chaincall_core::codec::InstructionCodec;
use chaincall_core::hex::{decode_pubkey, to_base64};
use chaincall_core::idl::IdlInstruction;
use chaincall_core::parse::{parse_field, TypedValue};
use chaincall_core::types::{AccountRef, ArgumentValue, EncodedInstruction};

use crate::cli::{account_flag, to_kebab_case};

/// Body of a send/simulate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRequest {
    pub program_id: String,
    pub accounts: Vec<AccountRef>,
    /// Hex of `discriminator || payload`.
    pub instruction_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_payer: Option<String>,
}

/// Everything produced for one instruction.
#[derive(Debug, Clone)]
pub struct BuiltInstruction {
    pub request: InstructionRequest,
    pub encoded: EncodedInstruction,
    pub values: Vec<(String, TypedValue)>,
}

/// Build the request for `ix` from `--<arg>` and `--<account>-account` flags.
pub fn build_request(
    codec: &InstructionCodec,
    ix: &IdlInstruction,
    args: &HashMap<String, String>,
    program_id: &str,
    fee_payer: Option<&str>,
) -> Result<BuiltInstruction> {
    decode_pubkey(program_id)
        .map_err(anyhow::Error::msg)
        .context("--program-id")?;
    if let Some(payer) = fee_payer {
        decode_pubkey(payer)
            .map_err(anyhow::Error::msg)
            .context("--fee-payer")?;
    }

    check_flag_collisions(ix)?;

    // Validate required args
    let mut missing = vec![];
    for arg in &ix.args {
        let key = to_kebab_case(&arg.name);
        if !args.contains_key(&key) {
            missing.push(format!("--{}", key));
        }
    }
    for acc in &ix.accounts {
        let key = account_flag(&acc.name);
        if !acc.optional && !args.contains_key(&key) {
            missing.push(format!("--{}", key));
        }
    }
    if !missing.is_empty() {
        bail!("Missing required arguments: {}", missing.join(", "));
    }

    let specs = ix.field_specs(codec.config().unknown_types)?;
    let arguments: Vec<ArgumentValue> = specs
        .into_iter()
        .map(|spec| {
            let raw = args[&to_kebab_case(&spec.name)].clone();
            ArgumentValue::new(spec, raw)
        })
        .collect();

    let accounts = collect_accounts(ix, args, program_id)?;
    let discriminator = ix.discriminator()?;
    let encoded = codec
        .encode_instruction_with(discriminator, &arguments)
        .with_context(|| format!("encoding '{}'", ix.name))?;

    // Re-coerce for display; this cannot fail after a successful encode.
    let values = arguments
        .iter()
        .filter_map(|a| {
            parse_field(&a.field, &a.raw, codec.config())
                .ok()
                .map(|v| (a.field.name.clone(), v))
        })
        .collect();

    tracing::debug!(instruction = %ix.name, accounts = accounts.len(), len = encoded.len(), "built request");

    Ok(BuiltInstruction {
        request: InstructionRequest {
            program_id: program_id.to_string(),
            accounts,
            instruction_data: encoded.to_hex(),
            fee_payer: fee_payer.map(str::to_string),
        },
        encoded,
        values,
    })
}

/// Args and accounts share one flag namespace, so an arg `postAccount`
/// and an account `post` would both read `--post-account`.
fn check_flag_collisions(ix: &IdlInstruction) -> Result<()> {
    let mut owners: HashMap<String, String> = HashMap::new();
    let mut clashes = vec![];
    let flags = ix
        .args
        .iter()
        .map(|a| (to_kebab_case(&a.name), format!("arg '{}'", a.name)))
        .chain(
            ix.accounts
                .iter()
                .map(|a| (account_flag(&a.name), format!("account '{}'", a.name))),
        );
    for (flag, owner) in flags {
        if let Some(first) = owners.get(&flag) {
            clashes.push(format!("--{} ({} and {})", flag, first, owner));
        } else {
            owners.insert(flag, owner);
        }
    }
    if !clashes.is_empty() {
        bail!(
            "Instruction '{}' has ambiguous flags: {}",
            ix.name,
            clashes.join(", ")
        );
    }
    Ok(())
}

/// Account metas in IDL order. A missing optional account is replaced by
/// the program id, read-only and not a signer.
fn collect_accounts(
    ix: &IdlInstruction,
    args: &HashMap<String, String>,
    program_id: &str,
) -> Result<Vec<AccountRef>> {
    let mut accounts = Vec::with_capacity(ix.accounts.len());
    let mut errors = vec![];
    for acc in &ix.accounts {
        let key = account_flag(&acc.name);
        match args.get(&key) {
            Some(raw) => match decode_pubkey(raw) {
                Ok(_) => accounts.push(AccountRef {
                    pubkey: raw.clone(),
                    is_signer: acc.signer,
                    is_writable: acc.writable,
                }),
                Err(e) => errors.push(format!("--{}: {}", key, e)),
            },
            None => accounts.push(AccountRef {
                pubkey: program_id.to_string(),
                is_signer: false,
                is_writable: false,
            }),
        }
    }
    if !errors.is_empty() {
        bail!("Invalid accounts:\n  {}", errors.join("\n  "));
    }
    Ok(accounts)
}

/// Print a human-readable preview of a built instruction.
pub fn print_preview(ix: &IdlInstruction, built: &BuiltInstruction) {
    println!("📋 Instruction: {}", ix.name);
    println!();
    println!("Accounts:");
    for (item, acc) in ix.accounts.iter().zip(&built.request.accounts) {
        let mut flags = vec![];
        if acc.is_writable { flags.push("mut"); }
        if acc.is_signer { flags.push("signer"); }
        let flags_str = if flags.is_empty() { String::new() } else { format!(" [{}]", flags.join(", ")) };
        println!("  📦 {} → {}{}", item.name, acc.pubkey, flags_str);
    }
    println!();
    println!("Arguments (parsed):");
    for (name, val) in &built.values {
        println!("  {} = {}", name, val);
    }
    println!();
    let bytes = built.encoded.to_bytes();
    println!("🔧 Instruction data ({} bytes):", bytes.len());
    println!("  discriminator: {}", &built.request.instruction_data[..16]);
    println!("  hex:    {}", built.request.instruction_data);
    println!("  base64: {}", to_base64(&bytes));
    println!();
}
