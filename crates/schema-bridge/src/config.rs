//! Configuration types for the schema bridge

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Configuration shared by the synthesizer, the type mapper and pin building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Type name used when a synthesized enum has no usable name at all
    pub default_enum_name: String,
    /// Prefix for fallback enum names built from a pin name (e.g. "Enum" -> "Enum_mode")
    pub enum_fallback_prefix: String,
    /// Whether pin summaries/remarks get trailing periods stripped per line
    pub clean_descriptions: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_enum_name: defaults::ENUM_NAME.to_string(),
            enum_fallback_prefix: defaults::ENUM_FALLBACK_PREFIX.to_string(),
            clean_descriptions: true,
        }
    }
}

impl BridgeConfig {
    /// Fallback enum name for a pin (`<prefix>_<pin>`), or the bare prefix without a pin
    pub fn fallback_enum_name(&self, pin_name: Option<&str>) -> String {
        match pin_name.map(str::trim).filter(|p| !p.is_empty()) {
            Some(pin) => format!("{}_{}", self.enum_fallback_prefix, pin),
            None => self.enum_fallback_prefix.clone(),
        }
    }
}
