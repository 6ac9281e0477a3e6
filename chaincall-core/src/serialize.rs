//! Binary layout writer.
//!
//! Values are written in the order given, little-endian, with no padding.
//! Integers, bools, strings and keys go through borsh, whose encodings
//! match what on-chain deserializers expect: fixed-width LE integers,
//! one-byte bools, u32 LE length-prefixed strings and raw `[u8; 32]` keys.
//! Raw bytes are appended verbatim.

use borsh::BorshSerialize;

use crate::discriminator::DISCRIMINATOR_LEN;
use crate::error::{CodecError, CodecResult};
use crate::parse::TypedValue;

/// Growable output buffer with an optional hard limit.
#[derive(Debug)]
pub struct LayoutWriter {
    buf: Vec<u8>,
    limit: Option<usize>,
}

impl LayoutWriter {
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            buf: Vec::new(),
            limit,
        }
    }

    pub fn write_discriminator(&mut self, discriminator: &[u8; DISCRIMINATOR_LEN]) -> CodecResult<()> {
        self.reserve(DISCRIMINATOR_LEN)?;
        self.buf.extend_from_slice(discriminator);
        Ok(())
    }

    pub fn write(&mut self, value: &TypedValue) -> CodecResult<()> {
        self.reserve(value.encoded_len())?;
        let result = match value {
            TypedValue::U8(v) => v.serialize(&mut self.buf),
            TypedValue::U16(v) => v.serialize(&mut self.buf),
            TypedValue::U32(v) => v.serialize(&mut self.buf),
            TypedValue::U64(v) => v.serialize(&mut self.buf),
            TypedValue::U128(v) => v.serialize(&mut self.buf),
            TypedValue::I8(v) => v.serialize(&mut self.buf),
            TypedValue::I16(v) => v.serialize(&mut self.buf),
            TypedValue::I32(v) => v.serialize(&mut self.buf),
            TypedValue::I64(v) => v.serialize(&mut self.buf),
            TypedValue::I128(v) => v.serialize(&mut self.buf),
            TypedValue::Bool(v) => v.serialize(&mut self.buf),
            TypedValue::Str(s) => s.serialize(&mut self.buf),
            TypedValue::PublicKey(key) => key.serialize(&mut self.buf),
            TypedValue::Bytes(bytes) => {
                self.buf.extend_from_slice(bytes);
                Ok(())
            }
        };
        // Writing into a Vec only fails if a string is longer than u32::MAX.
        result.map_err(|e| CodecError::Serialization {
            message: e.to_string(),
        })
    }

    /// Hand over the bytes written so far.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        let required = self.buf.len() + additional;
        if let Some(limit) = self.limit {
            if required > limit {
                return Err(CodecError::Capacity { limit, required });
            }
        }
        self.buf.reserve(additional);
        Ok(())
    }
}

/// Serialize a sequence of values into one buffer, optionally prefixed
/// with a discriminator. Nothing is returned unless every value fits.
pub fn serialize_layout(
    values: &[TypedValue],
    discriminator: Option<&[u8; DISCRIMINATOR_LEN]>,
    limit: Option<usize>,
) -> CodecResult<Vec<u8>> {
    let mut writer = LayoutWriter::with_limit(limit);
    if let Some(discriminator) = discriminator {
        writer.write_discriminator(discriminator)?;
    }
    for value in values {
        writer.write(value)?;
    }
    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::to_hex;

    fn hex_of(values: &[TypedValue]) -> String {
        to_hex(&serialize_layout(values, None, None).unwrap())
    }

    #[test]
    fn test_fixed_width_integers_are_little_endian() {
        assert_eq!(hex_of(&[TypedValue::U8(0xff)]), "ff");
        assert_eq!(hex_of(&[TypedValue::U16(0x0102)]), "0201");
        assert_eq!(hex_of(&[TypedValue::U32(1)]), "01000000");
        assert_eq!(hex_of(&[TypedValue::U64(1)]), "0100000000000000");
        assert_eq!(hex_of(&[TypedValue::U128(1)]), format!("01{}", "00".repeat(15)));
    }

    #[test]
    fn test_signed_integers_are_twos_complement() {
        assert_eq!(hex_of(&[TypedValue::I8(-1)]), "ff");
        assert_eq!(hex_of(&[TypedValue::I16(-2)]), "feff");
        assert_eq!(hex_of(&[TypedValue::I64(-1)]), "ff".repeat(8));
    }

    #[test]
    fn test_bool_is_one_byte() {
        assert_eq!(hex_of(&[TypedValue::Bool(true), TypedValue::Bool(false)]), "0100");
    }

    #[test]
    fn test_string_has_u32_length_prefix() {
        assert_eq!(hex_of(&[TypedValue::Str("Hi".into())]), "020000004869");
        assert_eq!(hex_of(&[TypedValue::Str(String::new())]), "00000000");
        // length counts bytes, not chars
        assert_eq!(hex_of(&[TypedValue::Str("é".into())]), "02000000c3a9");
    }

    #[test]
    fn test_pubkey_has_no_prefix() {
        let key = [7u8; 32];
        let out = serialize_layout(&[TypedValue::PublicKey(key)], None, None).unwrap();
        assert_eq!(out, key.to_vec());
    }

    #[test]
    fn test_raw_bytes_are_verbatim() {
        assert_eq!(hex_of(&[TypedValue::Bytes(vec![0xde, 0xad])]), "dead");
        assert_eq!(hex_of(&[TypedValue::Bytes(vec![])]), "");
    }

    #[test]
    fn test_discriminator_comes_first() {
        let disc = [1, 2, 3, 4, 5, 6, 7, 8];
        let out = serialize_layout(&[TypedValue::U8(9)], Some(&disc), None).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_no_fixed_scratch_size() {
        let big = "x".repeat(4096);
        let out = serialize_layout(&[TypedValue::Str(big)], None, None).unwrap();
        assert_eq!(out.len(), 4 + 4096);
    }

    #[test]
    fn test_limit_is_enforced() {
        let values = [TypedValue::U64(1), TypedValue::U64(2)];
        assert_eq!(serialize_layout(&values, None, Some(16)).unwrap().len(), 16);
        let err = serialize_layout(&values, None, Some(15)).unwrap_err();
        assert_eq!(err, CodecError::Capacity { limit: 15, required: 16 });
    }

    #[test]
    fn test_limit_counts_discriminator() {
        let err = serialize_layout(&[], Some(&[0; 8]), Some(4)).unwrap_err();
        assert_eq!(err, CodecError::Capacity { limit: 4, required: 8 });
    }
}
