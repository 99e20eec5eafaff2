//! Decode limits configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Largest map a single `consume_bounded_map` call accepts.
pub const MAX_MAP_ENTRY_COUNT: u32 = 10;

/// Largest array a single `consume_bounded_array` call accepts.
pub const MAX_ARRAY_ENTRY_COUNT: u32 = 65535;

/// Longest string, in bytes, a cursor will materialize.
pub const MAX_STRING_LENGTH: u32 = 1024;

/// Hard caps applied to every container header and string a cursor reads.
///
/// Loadable from a flat TOML document; unset fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    pub max_map_entries: u32,
    pub max_array_entries: u32,
    pub max_string_length: u32,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_map_entries: MAX_MAP_ENTRY_COUNT,
            max_array_entries: MAX_ARRAY_ENTRY_COUNT,
            max_string_length: MAX_STRING_LENGTH,
        }
    }
}

impl DecodeLimits {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
