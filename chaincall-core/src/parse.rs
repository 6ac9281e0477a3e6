//! Type-aware coercion of raw form strings into typed values.

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::config::{BoolMode, CodecConfig};
use crate::error::{CodecError, CodecResult};
use crate::hex::{decode_pubkey, encode_pubkey, to_hex, PUBKEY_LEN};
use crate::types::{ArgumentValue, FieldSpec, PrimitiveType};

/// A coerced value. The variant fixes the encoded type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Bool(bool),
    Str(String),
    PublicKey([u8; PUBKEY_LEN]),
    Bytes(Vec<u8>),
}

impl TypedValue {
    pub fn ty(&self) -> PrimitiveType {
        match self {
            TypedValue::U8(_) => PrimitiveType::U8,
            TypedValue::U16(_) => PrimitiveType::U16,
            TypedValue::U32(_) => PrimitiveType::U32,
            TypedValue::U64(_) => PrimitiveType::U64,
            TypedValue::U128(_) => PrimitiveType::U128,
            TypedValue::I8(_) => PrimitiveType::I8,
            TypedValue::I16(_) => PrimitiveType::I16,
            TypedValue::I32(_) => PrimitiveType::I32,
            TypedValue::I64(_) => PrimitiveType::I64,
            TypedValue::I128(_) => PrimitiveType::I128,
            TypedValue::Bool(_) => PrimitiveType::Bool,
            TypedValue::Str(_) => PrimitiveType::StringUtf8,
            TypedValue::PublicKey(_) => PrimitiveType::PublicKey,
            TypedValue::Bytes(_) => PrimitiveType::RawBytes,
        }
    }

    /// Number of bytes this value occupies once serialized.
    pub fn encoded_len(&self) -> usize {
        match self {
            TypedValue::Str(s) => 4 + s.len(),
            TypedValue::Bytes(b) => b.len(),
            // every other variant has a fixed width
            other => other.ty().fixed_size().unwrap_or(0),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::U8(v) => write!(f, "{}", v),
            TypedValue::U16(v) => write!(f, "{}", v),
            TypedValue::U32(v) => write!(f, "{}", v),
            TypedValue::U64(v) => write!(f, "{}", v),
            TypedValue::U128(v) => write!(f, "{}", v),
            TypedValue::I8(v) => write!(f, "{}", v),
            TypedValue::I16(v) => write!(f, "{}", v),
            TypedValue::I32(v) => write!(f, "{}", v),
            TypedValue::I64(v) => write!(f, "{}", v),
            TypedValue::I128(v) => write!(f, "{}", v),
            TypedValue::Bool(v) => write!(f, "{}", v),
            TypedValue::Str(s) => write!(f, "\"{}\"", s),
            TypedValue::PublicKey(key) => write!(f, "{}", encode_pubkey(key)),
            TypedValue::Bytes(bytes) => write!(f, "0x{}", to_hex(bytes)),
        }
    }
}

/// Coerce one raw string to the declared type.
///
/// Errors carry an empty field name; `parse_field` fills it in.
pub fn parse_value(raw: &str, ty: PrimitiveType, config: &CodecConfig) -> CodecResult<TypedValue> {
    let value = match ty {
        PrimitiveType::U8 => TypedValue::U8(parse_unsigned(raw, ty)?),
        PrimitiveType::U16 => TypedValue::U16(parse_unsigned(raw, ty)?),
        PrimitiveType::U32 => TypedValue::U32(parse_unsigned(raw, ty)?),
        PrimitiveType::U64 => TypedValue::U64(parse_unsigned(raw, ty)?),
        PrimitiveType::U128 => TypedValue::U128(parse_unsigned(raw, ty)?),
        PrimitiveType::I8 => TypedValue::I8(parse_signed(raw, ty)?),
        PrimitiveType::I16 => TypedValue::I16(parse_signed(raw, ty)?),
        PrimitiveType::I32 => TypedValue::I32(parse_signed(raw, ty)?),
        PrimitiveType::I64 => TypedValue::I64(parse_signed(raw, ty)?),
        PrimitiveType::I128 => TypedValue::I128(parse_signed(raw, ty)?),
        PrimitiveType::Bool => TypedValue::Bool(parse_bool(raw, config.bool_mode)?),
        PrimitiveType::StringUtf8 => TypedValue::Str(raw.to_string()),
        PrimitiveType::PublicKey => TypedValue::PublicKey(
            decode_pubkey(raw.trim()).map_err(|e| CodecError::coercion("", ty, e))?,
        ),
        PrimitiveType::RawBytes => TypedValue::Bytes(raw.as_bytes().to_vec()),
    };
    Ok(value)
}

/// Coerce a raw string for a named slot.
pub fn parse_field(field: &FieldSpec, raw: &str, config: &CodecConfig) -> CodecResult<TypedValue> {
    parse_value(raw, field.ty, config).map_err(|e| e.for_field(&field.name))
}

/// Coerce a whole argument list in order, stopping at the first failure.
pub fn parse_arguments(args: &[ArgumentValue], config: &CodecConfig) -> CodecResult<Vec<TypedValue>> {
    args.iter()
        .map(|arg| {
            tracing::trace!(field = %arg.field.name, ty = %arg.field.ty, "coercing argument");
            parse_field(&arg.field, &arg.raw, config)
        })
        .collect()
}

fn parse_unsigned<T>(raw: &str, ty: PrimitiveType) -> CodecResult<T>
where
    T: FromStr<Err = ParseIntError> + Default,
{
    let text = raw.trim();
    if text.is_empty() {
        return Ok(T::default());
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::coercion(
            "",
            ty,
            format!("'{}' is not an unsigned decimal integer", raw),
        ));
    }
    text.parse::<T>().map_err(|e| int_error(e, text, ty))
}

fn parse_signed<T>(raw: &str, ty: PrimitiveType) -> CodecResult<T>
where
    T: FromStr<Err = ParseIntError> + Default,
{
    let text = raw.trim();
    if text.is_empty() {
        return Ok(T::default());
    }
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::coercion(
            "",
            ty,
            format!("'{}' is not a decimal integer", raw),
        ));
    }
    text.parse::<T>().map_err(|e| int_error(e, text, ty))
}

fn int_error(err: ParseIntError, text: &str, ty: PrimitiveType) -> CodecError {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CodecError::overflow("", ty, text),
        _ => CodecError::coercion("", ty, err.to_string()),
    }
}

fn parse_bool(raw: &str, mode: BoolMode) -> CodecResult<bool> {
    match (mode, raw) {
        (_, "true") => Ok(true),
        (BoolMode::Permissive, _) => Ok(false),
        (BoolMode::Strict, "false") => Ok(false),
        (BoolMode::Strict, _) => Err(CodecError::coercion(
            "",
            PrimitiveType::Bool,
            format!("'{}' is not true/false", raw),
        )),
    }
}
