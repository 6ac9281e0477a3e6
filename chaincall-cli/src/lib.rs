//! Generic IDL-driven CLI library for encoding program instructions.
//!
//! Provides:
//! - IDL-aware argument handling and help text
//! - Request body assembly (accounts + hex instruction data)
//! - Raw layout packing/unpacking for byte-level previews
//! - Codec settings from a config file and flags
//!
//! Use this as a library to build program-specific tools, or use the
//! `chaincall` binary for a fully generic IDL-driven experience.

pub mod cli;
pub mod config;
pub mod layout;
pub mod tx;
