//! Codec settings shared by every subcommand: an optional JSON config
//! file, overridden by command-line flags.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use chaincall_core::config::{BoolMode, CodecConfig, UnknownTypePolicy};

#[derive(Args, Debug, Clone, Default)]
pub struct CodecArgs {
    /// JSON codec config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only accept "true"/"false" for bool fields
    #[arg(long, global = true)]
    pub strict_bool: bool,

    /// Fail on unsupported arg types instead of encoding them as strings
    #[arg(long, global = true)]
    pub reject_unknown: bool,

    /// Maximum instruction data size in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    pub max_len: Option<usize>,
}

impl CodecArgs {
    /// Read the config file if one was given, then apply the flags.
    pub fn load_config(&self) -> Result<CodecConfig> {
        let base = match &self.config {
            Some(path) => CodecConfig::from_file(path)?,
            None => CodecConfig::default(),
        };
        let config = self.apply(base);
        tracing::debug!(?config, "codec config");
        Ok(config)
    }

    /// Flags only ever tighten or replace file settings; an unset flag
    /// leaves the file's value alone.
    pub fn apply(&self, mut config: CodecConfig) -> CodecConfig {
        if self.strict_bool {
            config.bool_mode = BoolMode::Strict;
        }
        if self.reject_unknown {
            config.unknown_types = UnknownTypePolicy::Reject;
        }
        if self.max_len.is_some() {
            config.max_payload_len = self.max_len;
        }
        config
    }
}
