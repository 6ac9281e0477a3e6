//! IDL (Interface Definition Language) types for on-chain programs.
//!
//! A fetched IDL describes each instruction's accounts and arguments.
//! This module deserializes it and maps argument types onto the
//! primitive layouts the codec can encode.

use serde::{Deserialize, Serialize};

use crate::config::UnknownTypePolicy;
use crate::discriminator::{discriminator_from_slice, instruction_discriminator, DISCRIMINATOR_LEN};
use crate::error::{CodecError, CodecResult};
use crate::types::{FieldSpec, PrimitiveType};

/// Top-level IDL for a program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramIdl {
    #[serde(default)]
    pub version: String,
    pub name: String,
    pub instructions: Vec<IdlInstruction>,
}

/// An instruction in the IDL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    /// Present in newer IDLs; derived from the name otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Vec<u8>>,
    #[serde(default)]
    pub accounts: Vec<IdlAccountItem>,
    #[serde(default)]
    pub args: Vec<IdlArg>,
}

/// An account expected by an instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlAccountItem {
    pub name: String,
    #[serde(default, alias = "isMut")]
    pub writable: bool,
    #[serde(default, alias = "isSigner")]
    pub signer: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

fn is_false(v: &bool) -> bool { !v }

/// An instruction argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlArg {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: IdlType,
}

/// Type representation in the IDL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlType {
    Primitive(String),
    Vec { vec: Box<IdlType> },
    Option { option: Box<IdlType> },
    Defined { defined: serde_json::Value },
    Array { array: (Box<IdlType>, usize) },
}

impl IdlType {
    /// Human-readable type name, e.g. `Vec<u8>` or `[u8; 32]`.
    pub fn display_name(&self) -> String {
        match self {
            IdlType::Primitive(s) => s.clone(),
            IdlType::Vec { vec } => format!("Vec<{}>", vec.display_name()),
            IdlType::Option { option } => format!("Option<{}>", option.display_name()),
            IdlType::Defined { defined } => match defined {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Object(map) => map
                    .get("name")
                    .and_then(|n| n.as_str())
                    .unwrap_or("defined")
                    .to_string(),
                other => other.to_string(),
            },
            IdlType::Array { array } => format!("[{}; {}]", array.0.display_name(), array.1),
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            IdlType::Primitive(name) => PrimitiveType::from_idl_name(name),
            _ => None,
        }
    }
}

/// Resolve a declared type name for a field, applying the unknown-type policy.
pub fn resolve_field_type(
    field: &str,
    type_name: &str,
    policy: UnknownTypePolicy,
) -> CodecResult<PrimitiveType> {
    if let Some(ty) = PrimitiveType::from_idl_name(type_name) {
        return Ok(ty);
    }
    match policy {
        UnknownTypePolicy::FallbackToString => {
            tracing::warn!(
                field,
                type_name,
                "unsupported type, encoding as length-prefixed string"
            );
            Ok(PrimitiveType::StringUtf8)
        }
        UnknownTypePolicy::Reject => Err(CodecError::UnknownType {
            field: field.to_string(),
            type_name: type_name.to_string(),
        }),
    }
}

impl IdlArg {
    /// Map the argument onto a codec field.
    ///
    /// A declared `bytes` argument becomes `RawBytes` and is written with
    /// no length prefix. Anchor programs read `bytes` as a u32
    /// length-prefixed `Vec<u8>`, so such instructions need the prefix
    /// supplied in the input; a warning is logged when this mapping is used.
    pub fn field_spec(&self, policy: UnknownTypePolicy) -> CodecResult<FieldSpec> {
        let ty = match self.type_.as_primitive() {
            Some(ty) => ty,
            None => resolve_field_type(&self.name, &self.type_.display_name(), policy)?,
        };
        if ty == PrimitiveType::RawBytes {
            tracing::warn!(
                field = %self.name,
                "bytes argument is encoded without a length prefix"
            );
        }
        Ok(FieldSpec::new(self.name.clone(), ty))
    }
}

impl IdlInstruction {
    /// Argument layout in declared order.
    pub fn field_specs(&self, policy: UnknownTypePolicy) -> CodecResult<Vec<FieldSpec>> {
        self.args.iter().map(|arg| arg.field_spec(policy)).collect()
    }

    /// The IDL's own discriminator if it has one, else the name-derived one.
    pub fn discriminator(&self) -> CodecResult<[u8; DISCRIMINATOR_LEN]> {
        match &self.discriminator {
            Some(bytes) => discriminator_from_slice(bytes),
            None => Ok(instruction_discriminator(&self.name)),
        }
    }
}

impl ProgramIdl {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn instruction(&self, name: &str) -> Option<&IdlInstruction> {
        self.instructions.iter().find(|ix| ix.name == name)
    }

    /// Serialize the IDL to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
