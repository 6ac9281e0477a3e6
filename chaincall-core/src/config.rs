//! Codec configuration.
//!
//! Defaults reproduce the byte output of the ChainCall packing service.
//! Stricter behaviour is opt-in, either in code or from a JSON file:
//!
//! ```json
//! { "bool_mode": "strict", "unknown_types": "reject", "max_payload_len": 1232 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// How `bool` fields read their raw text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolMode {
    /// `"true"` is true, anything else is false.
    #[default]
    Permissive,
    /// Only `"true"` and `"false"` are accepted.
    Strict,
}

/// What to do with a declared type name the codec does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTypePolicy {
    /// Encode as a length-prefixed string and log a warning.
    #[default]
    FallbackToString,
    /// Fail with `CodecError::UnknownType`.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub bool_mode: BoolMode,
    pub unknown_types: UnknownTypePolicy,
    /// Upper bound on discriminator + payload bytes. `None` is unbounded.
    pub max_payload_len: Option<usize>,
}

impl CodecConfig {
    pub fn strict() -> Self {
        Self {
            bool_mode: BoolMode::Strict,
            unknown_types: UnknownTypePolicy::Reject,
            max_payload_len: None,
        }
    }

    pub fn with_max_payload_len(mut self, limit: usize) -> Self {
        self.max_payload_len = Some(limit);
        self
    }

    pub fn from_json_str(json: &str) -> CodecResult<Self> {
        serde_json::from_str(json).map_err(|e| CodecError::Config {
            message: e.to_string(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> CodecResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| CodecError::Config {
            message: format!("Failed to read '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&json)
    }
}
