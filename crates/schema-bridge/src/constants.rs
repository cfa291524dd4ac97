//! Constants shared across the bridge

/// Default values for configuration
pub mod defaults {
    /// Type name used when neither the declared nor the fallback name sanitizes to anything
    pub const ENUM_NAME: &str = "DynamicEnum";

    /// Prefix for fallback enum names derived from a pin name (`Enum_<pin>`)
    pub const ENUM_FALLBACK_PREFIX: &str = "Enum";
}

/// Normalized key reserved for `LiteralValue::Null`.
///
/// Contains a NUL so it can never collide with a trimmed string literal such as
/// `""` or `"null"`.
pub const NULL_KEY: &str = "\u{0}null";

/// Separates the sanitized name from the value keys in a synthesis cache key
pub const CACHE_KEY_NAME_SEPARATOR: char = ':';

/// Separates normalized value keys in a synthesis cache key
pub const CACHE_KEY_VALUE_SEPARATOR: &str = "|";

/// Number of hex characters of the blake3 digest kept in a synthesized identity
pub const IDENTITY_HASH_LEN: usize = 16;
