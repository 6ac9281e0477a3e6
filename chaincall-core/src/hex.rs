//! Hex, base64 and base58 rendering.

use base58::{FromBase58, ToBase58};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CodecError, CodecResult};

pub const PUBKEY_LEN: usize = 32;

/// Lowercase hex, two digits per byte, no separators.
pub fn to_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Inverse of `to_hex`. Accepts either case and an optional `0x` prefix.
pub fn from_hex(input: &str) -> CodecResult<Vec<u8>> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    ::hex::decode(digits).map_err(|e| CodecError::InvalidHex {
        message: e.to_string(),
    })
}

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base58 key into exactly 32 bytes.
pub fn decode_pubkey(input: &str) -> Result<[u8; PUBKEY_LEN], String> {
    let bytes = input
        .from_base58()
        .map_err(|e| format!("'{}' is not valid base58: {:?}", input, e))?;
    <[u8; PUBKEY_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
        format!(
            "Base58 decoded to {} bytes, expected {}",
            bytes.len(),
            PUBKEY_LEN
        )
    })
}

pub fn encode_pubkey(key: &[u8; PUBKEY_LEN]) -> String {
    key.to_base58()
}
