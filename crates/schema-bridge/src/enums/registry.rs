//! Registry of pre-built enum types
//!
//! Pre-built enums are produced ahead of time by a generator outside this
//! crate and registered either explicitly or at link time through
//! `inventory`:
//!
//! ```ignore
//! fn sampler_enum() -> schema_bridge::RegisteredEnumType {
//!     schema_bridge::RegisteredEnumType::from_values("Sampler", vec![/* ... */])
//! }
//!
//! inventory::submit!(schema_bridge::EnumDescriptorFn(sampler_enum));
//!
//! let registry = schema_bridge::EnumRegistry::with_builtins();
//! ```
//!
//! Lookup is by declared name only. A caller's value list is never checked
//! against the registered variants.

use std::collections::HashMap;
use std::sync::Arc;

use super::ident::{display_name, member_labels};
use super::EnumSchema;
use crate::literal::{LiteralValue, WireLiteral};

/// Namespace assigned when the generator provides none
pub const DEFAULT_NAMESPACE: &str = "Other";

/// One variant of a pre-built enum
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredVariant {
    /// Member label (identifier-safe)
    pub label: String,
    /// Wire literal sent to the remote schema
    pub literal: LiteralValue,
    /// Optional human description
    pub description: Option<String>,
}

impl RegisteredVariant {
    /// Create a variant with a label and wire literal
    pub fn new(label: impl Into<String>, literal: LiteralValue) -> Self {
        Self {
            label: label.into(),
            literal,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A pre-built enum type, immutable once registered
#[derive(Debug, Clone)]
pub struct RegisteredEnumType {
    name: String,
    namespace: String,
    literals: Vec<LiteralValue>,
    labels: Vec<String>,
    display_names: Vec<String>,
    descriptions: Vec<Option<String>>,
    /// Exact normalized key -> ordinal (first-seen wins)
    index: HashMap<String, usize>,
}

impl RegisteredEnumType {
    /// Build from explicit variants
    pub fn new(name: impl Into<String>, variants: Vec<RegisteredVariant>) -> Self {
        let mut literals = Vec::with_capacity(variants.len());
        let mut labels = Vec::with_capacity(variants.len());
        let mut descriptions = Vec::with_capacity(variants.len());
        for variant in variants {
            literals.push(variant.literal);
            labels.push(variant.label);
            descriptions.push(variant.description);
        }
        Self::assemble(name.into(), literals, labels, descriptions)
    }

    /// Build from wire literals alone, deriving member labels
    pub fn from_values(name: impl Into<String>, literals: Vec<LiteralValue>) -> Self {
        let labels = member_labels(&literals);
        let descriptions = vec![None; literals.len()];
        Self::assemble(name.into(), literals, labels, descriptions)
    }

    fn assemble(
        name: String,
        literals: Vec<LiteralValue>,
        labels: Vec<String>,
        descriptions: Vec<Option<String>>,
    ) -> Self {
        let mut index = HashMap::with_capacity(literals.len());
        for (ordinal, literal) in literals.iter().enumerate() {
            index.entry(literal.normalized_key()).or_insert(ordinal);
        }
        let display_names = labels.iter().map(|l| display_name(l)).collect();

        Self {
            name,
            namespace: DEFAULT_NAMESPACE.to_string(),
            literals,
            labels,
            display_names,
            descriptions,
            index,
        }
    }

    /// Set the namespace used for grouping
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grouping namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Display names in declared order ("SomeValue" -> "Some Value")
    pub fn display_names(&self) -> &[String] {
        &self.display_names
    }

    /// Description of the variant at `ordinal`, if any
    pub fn description(&self, ordinal: usize) -> Option<&str> {
        self.descriptions.get(ordinal).and_then(|d| d.as_deref())
    }

    /// Wire literal for `ordinal`, falling back to the member label, then `""`
    pub fn literal_or_label(&self, ordinal: usize) -> LiteralValue {
        self.literals
            .get(ordinal)
            .cloned()
            .or_else(|| self.labels.get(ordinal).map(|l| LiteralValue::Str(l.clone())))
            .unwrap_or_else(|| LiteralValue::Str(String::new()))
    }
}

impl EnumSchema for RegisteredEnumType {
    fn identity(&self) -> &str {
        &self.name
    }

    fn variants(&self) -> &[LiteralValue] {
        &self.literals
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Exact match first; case-insensitive only on a miss, in declared order
    fn ordinal_for_key(&self, key: &str) -> Option<usize> {
        if let Some(&ordinal) = self.index.get(key) {
            return Some(ordinal);
        }
        let folded = key.to_lowercase();
        self.literals
            .iter()
            .position(|lit| lit.normalized_key().to_lowercase() == folded)
    }
}

/// Link-time registration of a pre-built enum.
///
/// Follows the function-pointer pattern of node descriptors: the generator
/// submits a constructor, the registry calls it in [`EnumRegistry::with_builtins`].
pub struct EnumDescriptorFn(pub fn() -> RegisteredEnumType);

inventory::collect!(EnumDescriptorFn);

/// Registry of pre-built enum types keyed by declared name
///
/// Read-only once built; share it through `Arc` without locking.
pub struct EnumRegistry {
    entries: HashMap<String, Arc<RegisteredEnumType>>,
}

impl EnumRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry holding every enum submitted through `inventory`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in inventory::iter::<EnumDescriptorFn> {
            registry.register((descriptor.0)());
        }
        log::info!("Registered {} pre-built enums", registry.len());
        registry
    }

    /// Register a pre-built enum.
    ///
    /// The first registration of a name wins; later ones are skipped and
    /// `false` is returned.
    pub fn register(&mut self, enum_type: RegisteredEnumType) -> bool {
        let name = enum_type.name().trim().to_string();
        if name.is_empty() {
            log::warn!("Skipping pre-built enum with a blank name");
            return false;
        }
        if self.entries.contains_key(&name) {
            log::warn!(
                "Enum name collision: '{}' already registered, skipping",
                name
            );
            return false;
        }

        log::debug!(
            "Registered enum '{}' with {} values",
            name,
            enum_type.len()
        );
        self.entries.insert(name, Arc::new(enum_type));
        true
    }

    /// Look up a pre-built enum by declared name (trimmed; blank never matches)
    pub fn lookup(&self, declared_name: &str) -> Option<Arc<RegisteredEnumType>> {
        let name = declared_name.trim();
        if name.is_empty() {
            return None;
        }
        self.entries.get(name).cloned()
    }

    /// Look up by name for a descriptor carrying a candidate value list.
    ///
    /// The values are not compared with the registered variants.
    pub fn lookup_for<R: WireLiteral>(
        &self,
        declared_name: &str,
        _values: &[R],
    ) -> Option<Arc<RegisteredEnumType>> {
        self.lookup(declared_name)
    }

    /// Check if a name is registered
    pub fn contains(&self, declared_name: &str) -> bool {
        self.lookup(declared_name).is_some()
    }

    /// Number of registered enums
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no enums are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered names, sorted
    pub fn enum_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Registered enums grouped by namespace
    pub fn enums_by_namespace(&self) -> HashMap<String, Vec<Arc<RegisteredEnumType>>> {
        let mut grouped: HashMap<String, Vec<Arc<RegisteredEnumType>>> = HashMap::new();
        for enum_type in self.entries.values() {
            grouped
                .entry(enum_type.namespace().to_string())
                .or_default()
                .push(enum_type.clone());
        }
        grouped
    }

    /// Member labels of a registered enum, empty if unknown
    pub fn value_names(&self, declared_name: &str) -> Vec<String> {
        self.lookup(declared_name)
            .map(|t| t.labels().to_vec())
            .unwrap_or_default()
    }

    /// Display name -> wire literal for a registered enum, empty if unknown
    pub fn value_map(&self, declared_name: &str) -> HashMap<String, LiteralValue> {
        self.lookup(declared_name)
            .map(|t| {
                t.display_names()
                    .iter()
                    .cloned()
                    .zip(t.variants().iter().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Merge another registry into this one
    ///
    /// Entries from `other` override entries in `self` if they share a name.
    pub fn merge(&mut self, other: EnumRegistry) {
        self.entries.extend(other.entries);
    }
}

impl Default for EnumRegistry {
    fn default() -> Self {
        Self::new()
    }
}
