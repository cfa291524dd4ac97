//! Runtime synthesis of enum types from schema value lists
//!
//! Remote schemas describe many enums only by an ordered value list. The
//! synthesizer turns each distinct `(sanitized name, ordered values)` pair into
//! exactly one [`SynthesizedEnumType`] and caches it for its own lifetime.
//!
//! # Identity
//!
//! The cache key is `name + ":" + join(normalized keys, "|")`, with `\` and `|`
//! backslash-escaped inside each key. Order is part of the key, so `[a, b]`
//! and `[b, a]` are distinct types. Nothing is ever evicted: if a schema
//! changes an enum's values mid-session, a second type is created next to the
//! first.
//!
//! # Concurrency
//!
//! Lookups take a shared read lock only. A miss takes the synthesis mutex,
//! checks the cache again, and synthesizes only if the key is still absent,
//! so concurrent callers with identical inputs always observe one instance.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::ident::{member_labels, sanitize_identifier};
use super::EnumSchema;
use crate::config::BridgeConfig;
use crate::constants::{
    defaults, CACHE_KEY_NAME_SEPARATOR, CACHE_KEY_VALUE_SEPARATOR, IDENTITY_HASH_LEN,
};
use crate::error::{Result, SchemaBridgeError};
use crate::literal::{normalize_all, LiteralValue, WireLiteral};

/// An enum type synthesized from a schema value list
#[derive(Debug)]
pub struct SynthesizedEnumType {
    identity: String,
    name: String,
    cache_key: String,
    variants: Vec<LiteralValue>,
    labels: Vec<String>,
    /// Lower-cased normalized key -> ordinal (first-seen wins)
    index: HashMap<String, usize>,
}

impl SynthesizedEnumType {
    fn build(name: String, cache_key: String, variants: Vec<LiteralValue>) -> Self {
        let labels = member_labels(&variants);

        let mut index = HashMap::with_capacity(variants.len());
        for (ordinal, variant) in variants.iter().enumerate() {
            index
                .entry(variant.normalized_key().to_lowercase())
                .or_insert(ordinal);
        }

        let identity = format!("{}_{}", name, stable_hash(&variants));

        Self {
            identity,
            name,
            cache_key,
            variants,
            labels,
            index,
        }
    }

    /// Sanitized type name (without the hash suffix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key this type is cached under
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }
}

impl EnumSchema for SynthesizedEnumType {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn variants(&self) -> &[LiteralValue] {
        &self.variants
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Case-insensitive match on the normalized key
    fn ordinal_for_key(&self, key: &str) -> Option<usize> {
        self.index.get(&key.to_lowercase()).copied()
    }
}

/// Counters describing the synthesis cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisStats {
    /// Types currently cached
    pub cached_types: usize,
    /// Types synthesized since creation (equals `cached_types` without eviction)
    pub synthesized: usize,
}

/// Creates and caches enum types, at most once per cache key
///
/// Share one instance (e.g. in an `Arc`) between every caller that should see
/// the same type identities.
pub struct EnumSynthesizer {
    default_name: String,
    cache: RwLock<HashMap<String, Arc<SynthesizedEnumType>>>,
    synthesis_lock: Mutex<()>,
    synthesized: AtomicUsize,
}

impl EnumSynthesizer {
    /// Create a synthesizer using the configured default type name
    pub fn new(config: &BridgeConfig) -> Self {
        Self::with_default_name(config.default_enum_name.clone())
    }

    /// Create a synthesizer with an explicit default type name
    pub fn with_default_name(default_name: impl Into<String>) -> Self {
        let mut default_name = sanitize_identifier(&default_name.into());
        if default_name.is_empty() {
            default_name = defaults::ENUM_NAME.to_string();
        }
        Self {
            default_name,
            cache: RwLock::new(HashMap::new()),
            synthesis_lock: Mutex::new(()),
            synthesized: AtomicUsize::new(0),
        }
    }

    /// Get the cached type for these inputs, synthesizing it on first sight.
    ///
    /// `declared_name_hint` names the type; a blank hint falls back to
    /// `fallback_name_hint`. Returns `None` when `values` is empty.
    pub fn get_or_create<R: WireLiteral>(
        &self,
        declared_name_hint: Option<&str>,
        values: &[R],
        fallback_name_hint: &str,
    ) -> Option<Arc<SynthesizedEnumType>> {
        if values.is_empty() {
            return None;
        }

        let name = self.resolve_name(declared_name_hint, fallback_name_hint);
        let variants = normalize_all(values);
        let key = cache_key(&name, &variants);

        if let Some(hit) = self.cache.read().get(&key) {
            return Some(hit.clone());
        }

        let _guard = self.synthesis_lock.lock();
        if let Some(hit) = self.cache.read().get(&key) {
            return Some(hit.clone());
        }

        let enum_type = Arc::new(SynthesizedEnumType::build(name, key.clone(), variants));
        self.cache.write().insert(key, enum_type.clone());
        self.synthesized.fetch_add(1, Ordering::Relaxed);

        log::debug!(
            "Synthesized enum type '{}' with {} variants",
            enum_type.identity(),
            enum_type.len()
        );
        Some(enum_type)
    }

    /// Like [`get_or_create`](Self::get_or_create), but reports an empty value set as an error
    pub fn try_get_or_create<R: WireLiteral>(
        &self,
        declared_name_hint: Option<&str>,
        values: &[R],
        fallback_name_hint: &str,
    ) -> Result<Arc<SynthesizedEnumType>> {
        self.get_or_create(declared_name_hint, values, fallback_name_hint)
            .ok_or_else(|| SchemaBridgeError::EmptyValueSet {
                name: self.resolve_name(declared_name_hint, fallback_name_hint),
            })
    }

    /// Default ordinal for a synthesized type: the first declared variant
    pub fn default_value(_enum_type: &SynthesizedEnumType) -> usize {
        0
    }

    /// Whether `enum_type` is the instance this synthesizer cached for its key
    pub fn is_synthesized(&self, enum_type: &SynthesizedEnumType) -> bool {
        self.cache
            .read()
            .get(enum_type.cache_key())
            .is_some_and(|cached| std::ptr::eq(cached.as_ref(), enum_type))
    }

    /// Find a cached type by its identity string
    pub fn by_identity(&self, identity: &str) -> Option<Arc<SynthesizedEnumType>> {
        self.cache
            .read()
            .values()
            .find(|t| t.identity() == identity)
            .cloned()
    }

    /// Number of cached types
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Whether nothing has been synthesized yet
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Cache statistics
    pub fn stats(&self) -> SynthesisStats {
        SynthesisStats {
            cached_types: self.len(),
            synthesized: self.synthesized.load(Ordering::Relaxed),
        }
    }

    fn resolve_name(&self, declared_name_hint: Option<&str>, fallback_name_hint: &str) -> String {
        let hint = declared_name_hint
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(fallback_name_hint);
        let name = sanitize_identifier(hint);
        if name.is_empty() {
            self.default_name.clone()
        } else {
            name
        }
    }
}

impl Default for EnumSynthesizer {
    fn default() -> Self {
        Self::new(&BridgeConfig::default())
    }
}

/// Deterministic, order-sensitive cache key for a synthesized enum
///
/// `\` and the value separator are backslash-escaped inside each key, so
/// distinct value lists never share a cache key.
pub fn cache_key(sanitized_name: &str, variants: &[LiteralValue]) -> String {
    let keys = variants
        .iter()
        .map(|v| escape_key_fragment(&v.normalized_key()))
        .collect::<Vec<_>>()
        .join(CACHE_KEY_VALUE_SEPARATOR);
    format!("{}{}{}", sanitized_name, CACHE_KEY_NAME_SEPARATOR, keys)
}

fn escape_key_fragment(key: &str) -> String {
    let escaped_separator = format!("\\{}", CACHE_KEY_VALUE_SEPARATOR);
    key.replace('\\', "\\\\")
        .replace(CACHE_KEY_VALUE_SEPARATOR, &escaped_separator)
}

fn stable_hash(variants: &[LiteralValue]) -> String {
    let mut hasher = blake3::Hasher::new();
    for variant in variants {
        let key = variant.normalized_key();
        hasher.update(&(key.len() as u64).to_le_bytes());
        hasher.update(key.as_bytes());
    }
    let hex = hasher.finalize().to_hex();
    hex.as_str()[..IDENTITY_HASH_LEN].to_string()
}
