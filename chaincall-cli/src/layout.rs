//! Raw byte-layout packing and unpacking, no discriminator involved.
//!
//! Fields are given as `type=value` or `name:type=value`, e.g.
//! `u8=1 title:string=Hello`.

use anyhow::{bail, Context, Result};
use serde::Serialize;

use chaincall_core::codec::InstructionCodec;
use chaincall_core::hex::{from_hex, to_base64, to_hex};
use chaincall_core::types::{ArgumentValue, FieldSpec};

/// Result of packing a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackResponse {
    pub buffer_hex: String,
    pub buffer_base64: String,
    pub length: usize,
}

/// One decoded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnpackedField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub value: String,
}

/// Parse one `[name:]type=value` item.
pub fn parse_layout_item(codec: &InstructionCodec, index: usize, item: &str) -> Result<ArgumentValue> {
    let Some((decl, raw)) = item.split_once('=') else {
        bail!("Field {} '{}': expected [name:]type=value", index, item);
    };
    let spec = parse_field_decl(codec, index, decl)?;
    Ok(ArgumentValue::new(spec, raw))
}

/// Parse one `[name:]type` declaration.
pub fn parse_field_decl(codec: &InstructionCodec, index: usize, decl: &str) -> Result<FieldSpec> {
    let (name, type_name) = match decl.split_once(':') {
        Some((name, ty)) => (name.to_string(), ty),
        None => (format!("field{}", index), decl),
    };
    Ok(codec.field_spec(&name, type_name)?)
}

pub fn pack(codec: &InstructionCodec, items: &[String]) -> Result<PackResponse> {
    let args = items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_layout_item(codec, i, item))
        .collect::<Result<Vec<_>>>()?;
    let bytes = codec.encode_layout(&args)?;
    Ok(PackResponse {
        buffer_hex: to_hex(&bytes),
        buffer_base64: to_base64(&bytes),
        length: bytes.len(),
    })
}

pub fn unpack(codec: &InstructionCodec, hex: &str, decls: &[String]) -> Result<Vec<UnpackedField>> {
    let data = from_hex(hex).context("--hex")?;
    let specs = decls
        .iter()
        .enumerate()
        .map(|(i, decl)| parse_field_decl(codec, i, decl))
        .collect::<Result<Vec<_>>>()?;
    let values = codec.decode_layout(&specs, &data)?;
    Ok(specs
        .into_iter()
        .zip(values)
        .map(|(spec, value)| UnpackedField {
            name: spec.name,
            type_: spec.ty.to_string(),
            value: value.to_string(),
        })
        .collect())
}
