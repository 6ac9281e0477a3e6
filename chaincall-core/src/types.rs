//! Core types for the instruction codec.
//!
//! These describe the layout being encoded (`FieldSpec`), the raw form
//! input (`ArgumentValue`), the account envelope carried alongside
//! (`AccountRef`), and the single output artifact (`EncodedInstruction`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::discriminator::DISCRIMINATOR_LEN;
use crate::hex::to_hex;

/// Closed set of field types the codec can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    Bool,
    #[serde(rename = "string")]
    StringUtf8,
    #[serde(rename = "pubkey", alias = "publicKey")]
    PublicKey,
    #[serde(rename = "bytes")]
    RawBytes,
}

impl PrimitiveType {
    /// Every supported type, in the order they are listed to users.
    pub const ALL: [PrimitiveType; 14] = [
        PrimitiveType::U8,
        PrimitiveType::U16,
        PrimitiveType::U32,
        PrimitiveType::U64,
        PrimitiveType::U128,
        PrimitiveType::I8,
        PrimitiveType::I16,
        PrimitiveType::I32,
        PrimitiveType::I64,
        PrimitiveType::I128,
        PrimitiveType::Bool,
        PrimitiveType::PublicKey,
        PrimitiveType::StringUtf8,
        PrimitiveType::RawBytes,
    ];

    /// Look up a declared type name. Case-insensitive; accepts the
    /// Anchor spellings `publicKey` and `String`.
    pub fn from_idl_name(name: &str) -> Option<Self> {
        let ty = match name.trim().to_ascii_lowercase().as_str() {
            "u8" => PrimitiveType::U8,
            "u16" => PrimitiveType::U16,
            "u32" => PrimitiveType::U32,
            "u64" => PrimitiveType::U64,
            "u128" => PrimitiveType::U128,
            "i8" => PrimitiveType::I8,
            "i16" => PrimitiveType::I16,
            "i32" => PrimitiveType::I32,
            "i64" => PrimitiveType::I64,
            "i128" => PrimitiveType::I128,
            "bool" => PrimitiveType::Bool,
            "string" => PrimitiveType::StringUtf8,
            "pubkey" | "publickey" => PrimitiveType::PublicKey,
            "bytes" => PrimitiveType::RawBytes,
            _ => return None,
        };
        Some(ty)
    }

    /// Canonical lowercase name.
    pub fn idl_name(self) -> &'static str {
        match self {
            PrimitiveType::U8 => "u8",
            PrimitiveType::U16 => "u16",
            PrimitiveType::U32 => "u32",
            PrimitiveType::U64 => "u64",
            PrimitiveType::U128 => "u128",
            PrimitiveType::I8 => "i8",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::I128 => "i128",
            PrimitiveType::Bool => "bool",
            PrimitiveType::StringUtf8 => "string",
            PrimitiveType::PublicKey => "pubkey",
            PrimitiveType::RawBytes => "bytes",
        }
    }

    /// Encoded width in bytes, or `None` for variable-length types.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            PrimitiveType::U8 | PrimitiveType::I8 | PrimitiveType::Bool => Some(1),
            PrimitiveType::U16 | PrimitiveType::I16 => Some(2),
            PrimitiveType::U32 | PrimitiveType::I32 => Some(4),
            PrimitiveType::U64 | PrimitiveType::I64 => Some(8),
            PrimitiveType::U128 | PrimitiveType::I128 => Some(16),
            PrimitiveType::PublicKey => Some(32),
            PrimitiveType::StringUtf8 | PrimitiveType::RawBytes => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.idl_name())
    }
}

/// One argument slot in an instruction layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PrimitiveType,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: PrimitiveType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Raw form input paired with the slot it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentValue {
    pub field: FieldSpec,
    pub raw: String,
}

impl ArgumentValue {
    pub fn new(field: FieldSpec, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }

    /// Shorthand for building a layout by hand.
    pub fn of(name: impl Into<String>, ty: PrimitiveType, raw: impl Into<String>) -> Self {
        Self::new(FieldSpec::new(name, ty), raw)
    }
}

/// An account passed to the instruction. Not part of the payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Output of encoding a named instruction.
///
/// `payload` holds only the argument bytes; `to_bytes` gives the full
/// instruction data the program receives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedInstruction {
    pub discriminator: [u8; DISCRIMINATOR_LEN],
    pub payload: Vec<u8>,
}

impl EncodedInstruction {
    /// `discriminator || payload`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.discriminator);
        out.extend_from_slice(&self.payload);
        out
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.to_bytes())
    }

    pub fn len(&self) -> usize {
        DISCRIMINATOR_LEN + self.payload.len()
    }
}
