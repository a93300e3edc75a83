//! Which converter groups a default service is assembled from.

use morph_core::{ConversionError, ConversionResult};
use serde::Deserialize;

/// Converter groups to register. Every group is enabled by default; an
/// absent field in a JSON document keeps its default.
///
/// ```text
/// { "fallback_to_string": false, "byte_buffer_converters": false }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools, reason = "one switch per converter group")]
pub struct ConversionConfig {
    /// Numbers, strings, characters, booleans, enums and UUIDs.
    pub scalar_converters: bool,
    /// Arrays, collections, maps and streams.
    pub collection_converters: bool,
    pub byte_buffer_converters: bool,
    /// Declared `to<X>()`, `valueOf`/`of`/`from` and constructor members,
    /// plus `find<Entity>` lookups.
    pub convention_converters: bool,
    pub fallback_to_string: bool,
    pub optional_converters: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            scalar_converters: true,
            collection_converters: true,
            byte_buffer_converters: true,
            convention_converters: true,
            fallback_to_string: true,
            optional_converters: true,
        }
    }
}

impl ConversionConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> ConversionResult<Self> {
        serde_json::from_str(text).map_err(ConversionError::other)
    }
}

#[cfg(test)]
mod tests;
