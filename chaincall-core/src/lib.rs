//! # ChainCall Core
//!
//! Instruction codec for IDL-described on-chain programs: turns loosely
//! typed form input into the exact instruction data a program expects.

pub mod codec;
pub mod config;
pub mod deserialize;
pub mod discriminator;
pub mod error;
pub mod hex;
pub mod idl;
pub mod parse;
pub mod serialize;
pub mod types;

pub mod prelude {
    pub use crate::codec::{encode_instruction, encode_layout, InstructionCodec};
    pub use crate::config::{BoolMode, CodecConfig, UnknownTypePolicy};
    pub use crate::discriminator::instruction_discriminator;
    pub use crate::error::{CodecError, CodecResult};
    pub use crate::hex::{from_hex, to_base64, to_hex};
    pub use crate::parse::TypedValue;
    pub use crate::types::{AccountRef, ArgumentValue, EncodedInstruction, FieldSpec, PrimitiveType};
}
