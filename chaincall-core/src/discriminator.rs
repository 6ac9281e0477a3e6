//! Instruction discriminators.
//!
//! A discriminator is the first 8 bytes of `sha256("<namespace>:<name>")`.
//! Instructions use the `global` namespace.

use sha2::{Digest, Sha256};

use crate::error::{CodecError, CodecResult};

pub const DISCRIMINATOR_LEN: usize = 8;

const INSTRUCTION_NAMESPACE: &str = "global";

/// Discriminator for a `<namespace>:<name>` preimage.
pub fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let preimage = format!("{}:{}", namespace, name);
    let hash = Sha256::digest(preimage.as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    discriminator
}

/// Discriminator for an instruction, as the program's dispatcher computes it.
/// The name is hashed as given, with no case conversion.
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash(INSTRUCTION_NAMESPACE, name)
}

/// Accept a discriminator supplied by an IDL.
pub fn discriminator_from_slice(bytes: &[u8]) -> CodecResult<[u8; DISCRIMINATOR_LEN]> {
    <[u8; DISCRIMINATOR_LEN]>::try_from(bytes)
        .map_err(|_| CodecError::InvalidDiscriminator { len: bytes.len() })
}
