//! Binary layout reader: the inverse of `serialize`.

use borsh::BorshDeserialize;

use crate::discriminator::DISCRIMINATOR_LEN;
use crate::error::{CodecError, CodecResult};
use crate::hex::{to_hex, PUBKEY_LEN};
use crate::parse::TypedValue;
use crate::types::PrimitiveType;

/// Read values of the given types from `data`, in order.
///
/// `bytes` carries no length, so it may only appear as the last field,
/// where it takes everything that is left. The whole buffer must be
/// consumed.
pub fn deserialize_layout(fields: &[PrimitiveType], data: &[u8]) -> CodecResult<Vec<TypedValue>> {
    let mut cursor = data;
    let mut values = Vec::with_capacity(fields.len());

    for (i, ty) in fields.iter().enumerate() {
        let offset = data.len() - cursor.len();
        if *ty == PrimitiveType::RawBytes {
            if i + 1 != fields.len() {
                return Err(CodecError::decode(
                    offset,
                    format!("bytes field {} must be last, its length is not encoded", i),
                ));
            }
            values.push(TypedValue::Bytes(cursor.to_vec()));
            cursor = &[];
            continue;
        }
        let value = read_value(*ty, &mut cursor).map_err(|e| {
            CodecError::decode(offset, format!("field {} ({}): {}", i, ty, e))
        })?;
        values.push(value);
    }

    if !cursor.is_empty() {
        return Err(CodecError::decode(
            data.len() - cursor.len(),
            format!("{} trailing bytes", cursor.len()),
        ));
    }
    Ok(values)
}

/// Check and remove an expected discriminator prefix.
pub fn strip_discriminator<'a>(
    data: &'a [u8],
    expected: &[u8; DISCRIMINATOR_LEN],
) -> CodecResult<&'a [u8]> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(CodecError::decode(
            0,
            format!("{} bytes is too short for a discriminator", data.len()),
        ));
    }
    let (prefix, rest) = data.split_at(DISCRIMINATOR_LEN);
    if prefix != expected {
        return Err(CodecError::decode(
            0,
            format!(
                "discriminator {} does not match expected {}",
                to_hex(prefix),
                to_hex(expected)
            ),
        ));
    }
    Ok(rest)
}

fn read_value(ty: PrimitiveType, cursor: &mut &[u8]) -> std::io::Result<TypedValue> {
    let value = match ty {
        PrimitiveType::U8 => TypedValue::U8(u8::deserialize(cursor)?),
        PrimitiveType::U16 => TypedValue::U16(u16::deserialize(cursor)?),
        PrimitiveType::U32 => TypedValue::U32(u32::deserialize(cursor)?),
        PrimitiveType::U64 => TypedValue::U64(u64::deserialize(cursor)?),
        PrimitiveType::U128 => TypedValue::U128(u128::deserialize(cursor)?),
        PrimitiveType::I8 => TypedValue::I8(i8::deserialize(cursor)?),
        PrimitiveType::I16 => TypedValue::I16(i16::deserialize(cursor)?),
        PrimitiveType::I32 => TypedValue::I32(i32::deserialize(cursor)?),
        PrimitiveType::I64 => TypedValue::I64(i64::deserialize(cursor)?),
        PrimitiveType::I128 => TypedValue::I128(i128::deserialize(cursor)?),
        PrimitiveType::Bool => TypedValue::Bool(bool::deserialize(cursor)?),
        PrimitiveType::StringUtf8 => TypedValue::Str(String::deserialize(cursor)?),
        PrimitiveType::PublicKey => TypedValue::PublicKey(<[u8; PUBKEY_LEN]>::deserialize(cursor)?),
        // handled by the caller
        PrimitiveType::RawBytes => TypedValue::Bytes(std::mem::take(cursor).to_vec()),
    };
    Ok(value)
}
