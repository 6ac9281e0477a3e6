//! Instruction encoding entry points.
//!
//! `InstructionCodec` ties the pieces together: coerce every argument,
//! then write discriminator and values into one buffer. Any failure
//! aborts the whole encode.

use crate::config::CodecConfig;
use crate::deserialize::deserialize_layout;
use crate::discriminator::{instruction_discriminator, DISCRIMINATOR_LEN};
use crate::error::CodecResult;
use crate::hex::to_hex;
use crate::idl::resolve_field_type;
use crate::parse::{parse_arguments, TypedValue};
use crate::serialize::serialize_layout;
use crate::types::{ArgumentValue, EncodedInstruction, FieldSpec, PrimitiveType};

/// Stateless encoder parameterised by a `CodecConfig`.
#[derive(Debug, Clone, Default)]
pub struct InstructionCodec {
    config: CodecConfig,
}

impl InstructionCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Build a field spec from a declared type name.
    pub fn field_spec(&self, name: &str, declared_type: &str) -> CodecResult<FieldSpec> {
        let ty = resolve_field_type(name, declared_type, self.config.unknown_types)?;
        Ok(FieldSpec::new(name, ty))
    }

    /// Encode a named instruction with its name-derived discriminator.
    pub fn encode_instruction(&self, name: &str, args: &[ArgumentValue]) -> CodecResult<EncodedInstruction> {
        self.encode_instruction_with(instruction_discriminator(name), args)
    }

    /// Encode with an explicit discriminator, e.g. one taken from an IDL.
    pub fn encode_instruction_with(
        &self,
        discriminator: [u8; DISCRIMINATOR_LEN],
        args: &[ArgumentValue],
    ) -> CodecResult<EncodedInstruction> {
        let values = parse_arguments(args, &self.config)?;
        // the limit covers discriminator + payload
        let mut data = serialize_layout(&values, Some(&discriminator), self.config.max_payload_len)?;
        let payload = data.split_off(DISCRIMINATOR_LEN);

        tracing::debug!(
            discriminator = %to_hex(&discriminator),
            args = args.len(),
            payload_len = payload.len(),
            "encoded instruction"
        );
        Ok(EncodedInstruction {
            discriminator,
            payload,
        })
    }

    /// Encode arguments without any discriminator.
    pub fn encode_layout(&self, args: &[ArgumentValue]) -> CodecResult<Vec<u8>> {
        let values = parse_arguments(args, &self.config)?;
        let bytes = serialize_layout(&values, None, self.config.max_payload_len)?;
        tracing::debug!(fields = args.len(), len = bytes.len(), "encoded layout");
        Ok(bytes)
    }

    /// Read back values for a layout from encoded bytes.
    pub fn decode_layout(&self, fields: &[FieldSpec], data: &[u8]) -> CodecResult<Vec<TypedValue>> {
        let types: Vec<PrimitiveType> = fields.iter().map(|f| f.ty).collect();
        deserialize_layout(&types, data)
    }
}

/// Encode a named instruction with the default configuration.
pub fn encode_instruction(name: &str, args: &[ArgumentValue]) -> CodecResult<EncodedInstruction> {
    InstructionCodec::default().encode_instruction(name, args)
}

/// Encode a layout with the default configuration.
pub fn encode_layout(args: &[ArgumentValue]) -> CodecResult<Vec<u8>> {
    InstructionCodec::default().encode_layout(args)
}
