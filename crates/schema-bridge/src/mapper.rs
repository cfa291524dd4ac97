//! Mapping of schema type descriptors onto host kinds
//!
//! [`TypeMapper::map`] turns a [`TypeDescriptor`] plus an optional schema
//! default into a [`MappedType`]. It never fails: unknown kinds become
//! strings, enums without values become strings, and defaults that cannot be
//! coerced are replaced by the kind's zero value.
//!
//! # Unions
//!
//! Open kinds (`any`, `union`, `oneof`, `either`) are narrowed to one family:
//!
//! 1. a declared name containing `number`/`float`/`int`, `bool`, or `str`/`text`
//! 2. otherwise the nested types, searched recursively. Numeric alone or with
//!    non-string members is numeric, boolean alone is boolean, string alone is
//!    string. Anything mixing strings with other members is an object.
//! 3. no nested types and no hint: object
//!
//! Numeric unions map to [`HostKind::Float`].

use std::sync::Arc;

use crate::config::BridgeConfig;
use crate::descriptor::{TypeDescriptor, DICT_KINDS, LIST_KINDS, UNION_KINDS};
use crate::enums::{EnumHandle, EnumRegistry, EnumSynthesizer};
use crate::host::{HostKind, HostValue, MediaKind};
use crate::pin::PinDescription;

const NUMERIC_KINDS: [&str; 4] = ["int", "integer", "float", "number"];
const BOOLEAN_KINDS: [&str; 2] = ["bool", "boolean"];
const STRING_KINDS: [&str; 3] = ["str", "string", "text"];

/// Result of mapping one descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub kind: HostKind,
    pub default: HostValue,
    /// Whether the schema marked the value optional
    pub optional: bool,
}

/// Concrete family chosen for a union
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionFamily {
    Numeric,
    Boolean,
    String,
    Object,
}

impl UnionFamily {
    fn host_kind(self) -> HostKind {
        match self {
            UnionFamily::Numeric => HostKind::Float,
            UnionFamily::Boolean => HostKind::Boolean,
            UnionFamily::String => HostKind::String,
            UnionFamily::Object => HostKind::Object,
        }
    }
}

/// Maps schema descriptors to host kinds and defaults
///
/// Holds the shared enum sources; clone the `Arc`s to share them between
/// mappers so every caller sees the same enum identities.
#[derive(Clone)]
pub struct TypeMapper {
    registry: Arc<EnumRegistry>,
    synthesizer: Arc<EnumSynthesizer>,
    config: BridgeConfig,
}

impl TypeMapper {
    /// Create a mapper over shared enum sources with the default configuration
    pub fn new(registry: Arc<EnumRegistry>, synthesizer: Arc<EnumSynthesizer>) -> Self {
        Self {
            registry,
            synthesizer,
            config: BridgeConfig::default(),
        }
    }

    /// Create a mapper with its own registry of built-ins and a fresh synthesizer
    pub fn from_config(config: BridgeConfig) -> Self {
        Self {
            registry: Arc::new(EnumRegistry::with_builtins()),
            synthesizer: Arc::new(EnumSynthesizer::new(&config)),
            config,
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &Arc<EnumRegistry> {
        &self.registry
    }

    pub fn synthesizer(&self) -> &Arc<EnumSynthesizer> {
        &self.synthesizer
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Map a descriptor and its schema default
    pub fn map(
        &self,
        descriptor: &TypeDescriptor,
        schema_default: Option<&serde_json::Value>,
    ) -> MappedType {
        self.map_inner(None, descriptor, schema_default)
    }

    /// Map the descriptor of a named pin; unnamed enums are called `Enum_<pin>`
    pub fn map_pin(
        &self,
        pin_name: &str,
        descriptor: &TypeDescriptor,
        schema_default: Option<&serde_json::Value>,
    ) -> MappedType {
        self.map_inner(Some(pin_name), descriptor, schema_default)
    }

    /// Build the pin description the editor renders for this input
    pub fn describe_pin(
        &self,
        pin_name: &str,
        descriptor: &TypeDescriptor,
        schema_default: Option<&serde_json::Value>,
    ) -> PinDescription {
        let mapped = self.map_pin(pin_name, descriptor, schema_default);
        PinDescription::new(pin_name, mapped.kind, mapped.default)
            .with_clean_descriptions(self.config.clean_descriptions)
    }

    /// Host kind alone, without default handling
    pub fn host_kind(&self, descriptor: &TypeDescriptor) -> HostKind {
        self.kind_for(None, descriptor)
    }

    fn map_inner(
        &self,
        pin_name: Option<&str>,
        descriptor: &TypeDescriptor,
        schema_default: Option<&serde_json::Value>,
    ) -> MappedType {
        let kind = self.kind_for(pin_name, descriptor);
        let default = HostValue::coerce_or_zero(&kind, schema_default);
        MappedType {
            kind,
            default,
            optional: descriptor.optional,
        }
    }

    fn kind_for(&self, pin_name: Option<&str>, descriptor: &TypeDescriptor) -> HostKind {
        let kind = descriptor.normalized_kind();
        let kind = kind.as_str();

        if let Some(media) = MediaKind::from_kind(kind) {
            return HostKind::Media(media);
        }

        match kind {
            "str" | "string" | "text" => HostKind::String,
            "int" | "integer" => HostKind::Integer,
            "float" | "number" => HostKind::Float,
            "bool" | "boolean" => HostKind::Boolean,
            k if LIST_KINDS.contains(&k) => HostKind::StringList,
            k if DICT_KINDS.contains(&k) => HostKind::Object,
            "datetime" => HostKind::DateTime,
            "enum" => match self.resolve_enum(pin_name, descriptor) {
                Some(handle) => HostKind::Enum(handle),
                None => {
                    log::debug!(
                        "Enum '{}' has no registered type and no values, mapping to string",
                        descriptor.declared_name().unwrap_or("<unnamed>")
                    );
                    HostKind::String
                }
            },
            k if UNION_KINDS.contains(&k) => classify_union(descriptor).host_kind(),
            other => {
                log::debug!("Unknown schema kind '{}', mapping to string", other);
                HostKind::String
            }
        }
    }

    fn resolve_enum(
        &self,
        pin_name: Option<&str>,
        descriptor: &TypeDescriptor,
    ) -> Option<EnumHandle> {
        if let Some(name) = descriptor.declared_name() {
            if let Some(registered) = self.registry.lookup_for(name, descriptor.values()) {
                return Some(registered.into());
            }
        }

        let fallback = self.config.fallback_enum_name(pin_name);
        self.synthesizer
            .get_or_create(descriptor.declared_name(), descriptor.values(), &fallback)
            .map(EnumHandle::from)
    }
}

impl Default for TypeMapper {
    fn default() -> Self {
        Self::from_config(BridgeConfig::default())
    }
}

/// Narrow a union descriptor to a single family
pub fn classify_union(descriptor: &TypeDescriptor) -> UnionFamily {
    if let Some(family) = descriptor.declared_name().and_then(family_from_hint) {
        return family;
    }

    let nested = &descriptor.nested_types;
    if nested.is_empty() {
        return UnionFamily::Object;
    }

    let numeric = nested.iter().any(is_numeric);
    let boolean = nested.iter().any(is_boolean);
    let string = nested.iter().any(is_string);
    let other = nested
        .iter()
        .any(|t| !is_numeric(t) && !is_boolean(t) && !is_string(t));

    if string {
        if numeric || boolean || other {
            UnionFamily::Object
        } else {
            UnionFamily::String
        }
    } else if numeric {
        UnionFamily::Numeric
    } else if boolean && !other {
        UnionFamily::Boolean
    } else {
        UnionFamily::Object
    }
}

fn family_from_hint(name: &str) -> Option<UnionFamily> {
    let hint = name.to_lowercase();
    if ["number", "float", "int"].iter().any(|h| hint.contains(h)) {
        Some(UnionFamily::Numeric)
    } else if hint.contains("bool") {
        Some(UnionFamily::Boolean)
    } else if ["str", "text"].iter().any(|h| hint.contains(h)) {
        Some(UnionFamily::String)
    } else {
        None
    }
}

fn has_kind(descriptor: &TypeDescriptor, kinds: &[&str]) -> bool {
    kinds.contains(&descriptor.normalized_kind().as_str())
        || descriptor.nested_types.iter().any(|t| has_kind(t, kinds))
}

fn is_numeric(descriptor: &TypeDescriptor) -> bool {
    has_kind(descriptor, &NUMERIC_KINDS)
}

fn is_boolean(descriptor: &TypeDescriptor) -> bool {
    has_kind(descriptor, &BOOLEAN_KINDS)
}

fn is_string(descriptor: &TypeDescriptor) -> bool {
    has_kind(descriptor, &STRING_KINDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{EnumSchema, RegisteredEnumType};
    use crate::literal::LiteralValue;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn mapper() -> TypeMapper {
        TypeMapper::new(Arc::new(EnumRegistry::new()), Arc::new(EnumSynthesizer::default()))
    }

    fn union_of(kinds: &[&str]) -> TypeDescriptor {
        TypeDescriptor::union(kinds.iter().map(|k| TypeDescriptor::new(*k)).collect())
    }

    #[test]
    fn test_primitive_kinds() {
        let m = mapper();
        let cases = [
            ("str", HostKind::String, HostValue::String(String::new())),
            (" TEXT ", HostKind::String, HostValue::String(String::new())),
            ("int", HostKind::Integer, HostValue::Integer(0)),
            ("number", HostKind::Float, HostValue::Float(0.0)),
            ("Boolean", HostKind::Boolean, HostValue::Boolean(false)),
            ("array", HostKind::StringList, HostValue::StringList(Vec::new())),
            ("dict", HostKind::Object, HostValue::Object(json!(null))),
            ("datetime", HostKind::DateTime, HostValue::DateTime(DateTime::<Utc>::UNIX_EPOCH)),
            ("audio", HostKind::Media(MediaKind::Audio), HostValue::Media(None)),
        ];
        for (kind, expected_kind, expected_default) in cases {
            let mapped = m.map(&TypeDescriptor::new(kind), None);
            assert_eq!(mapped.kind, expected_kind, "kind {kind}");
            assert_eq!(mapped.default, expected_default, "kind {kind}");
        }
    }

    #[test]
    fn test_schema_default_coerced() {
        let m = mapper();
        let mapped = m.map(&TypeDescriptor::new("int"), Some(&json!("42")));
        assert_eq!(mapped.default, HostValue::Integer(42));

        let mapped = m.map(&TypeDescriptor::new("float"), Some(&json!("not a number")));
        assert_eq!(mapped.default, HostValue::Float(0.0));
    }

    #[test]
    fn test_unknown_kind_is_string() {
        let m = mapper();
        let mapped = m.map(&TypeDescriptor::new("frobnicate"), None);
        assert_eq!(mapped.kind, HostKind::String);
        assert_eq!(mapped.default, HostValue::String(String::new()));

        let mapped = m.map(&TypeDescriptor::new("frobnicate"), Some(&json!("x")));
        assert_eq!(mapped.default, HostValue::String("x".to_string()));
    }

    #[test]
    fn test_enum_synthesized_with_default() {
        let m = mapper();
        let descriptor =
            TypeDescriptor::enumeration("Color", vec![json!("Red"), json!("Green"), json!("Blue")]);
        let mapped = m.map(&descriptor, Some(&json!("Green")));

        let handle = mapped.kind.enum_handle().unwrap();
        assert!(handle.is_synthesized());
        assert_eq!(mapped.default.as_ordinal(), Some(1));
        assert_eq!(mapped.default.to_wire(), json!("Green"));
    }

    #[test]
    fn test_enum_pin_fallback_name() {
        let m = mapper();
        let descriptor =
            TypeDescriptor::from_json(r#"{"type": "enum", "values": ["fast", "slow"]}"#).unwrap();

        let mapped = m.map_pin("speed mode", &descriptor, None);
        let handle = mapped.kind.enum_handle().unwrap();
        assert!(handle.identity().starts_with("Enum_speed_mode_"));

        let mapped = m.map(&descriptor, None);
        assert!(mapped.kind.enum_handle().unwrap().identity().starts_with("Enum_"));
    }

    #[test]
    fn test_enum_without_values_is_string() {
        let m = mapper();
        let mapped = m.map(&TypeDescriptor::enumeration("Empty", Vec::new()), Some(&json!("a")));
        assert_eq!(mapped.kind, HostKind::String);
        assert_eq!(mapped.default, HostValue::String("a".to_string()));
    }

    #[test]
    fn test_registered_enum_wins() {
        let mut registry = EnumRegistry::new();
        registry.register(RegisteredEnumType::from_values(
            "Quality",
            vec![LiteralValue::Str("low".into()), LiteralValue::Str("high".into())],
        ));
        let synthesizer = Arc::new(EnumSynthesizer::default());
        let m = TypeMapper::new(Arc::new(registry), synthesizer.clone());

        // Stale value list is ignored for registered enums
        let descriptor = TypeDescriptor::enumeration("Quality", vec![json!("ultra")]);
        let mapped = m.map(&descriptor, Some(&json!("HIGH")));

        let handle = mapped.kind.enum_handle().unwrap();
        assert!(!handle.is_synthesized());
        assert_eq!(mapped.default.as_ordinal(), Some(1));
        assert!(synthesizer.is_empty());
    }

    #[test]
    fn test_same_enum_shares_handle_across_pins() {
        let m = mapper();
        let descriptor = TypeDescriptor::enumeration("Color", vec![json!("Red"), json!("Green")]);
        let a = m.map_pin("fg", &descriptor, None);
        let b = m.map_pin("bg", &descriptor, None);
        assert_eq!(a.kind, b.kind);
        assert_eq!(m.synthesizer().stats().synthesized, 1);
    }

    #[test]
    fn test_union_classification() {
        assert_eq!(classify_union(&union_of(&["int", "float"])), UnionFamily::Numeric);
        assert_eq!(classify_union(&union_of(&["int", "bool"])), UnionFamily::Numeric);
        assert_eq!(classify_union(&union_of(&["bool"])), UnionFamily::Boolean);
        assert_eq!(classify_union(&union_of(&["str", "text"])), UnionFamily::String);
        assert_eq!(classify_union(&union_of(&["int", "string"])), UnionFamily::Object);
        assert_eq!(classify_union(&union_of(&["bool", "str"])), UnionFamily::Object);
        assert_eq!(classify_union(&union_of(&["image", "video"])), UnionFamily::Object);
        assert_eq!(classify_union(&union_of(&["int", "image"])), UnionFamily::Numeric);
        assert_eq!(classify_union(&union_of(&[])), UnionFamily::Object);
    }

    #[test]
    fn test_union_recurses_into_nested() {
        let nested_numeric =
            TypeDescriptor::new("list").with_nested(vec![TypeDescriptor::new("float")]);
        let descriptor = TypeDescriptor::union(vec![nested_numeric, TypeDescriptor::new("bool")]);
        assert_eq!(classify_union(&descriptor), UnionFamily::Numeric);
    }

    #[test]
    fn test_union_name_hint() {
        let descriptor = union_of(&["str"]).with_name("IntOrString");
        assert_eq!(classify_union(&descriptor), UnionFamily::Numeric);

        let descriptor = TypeDescriptor::new("any").with_name("MaybeBool");
        assert_eq!(classify_union(&descriptor), UnionFamily::Boolean);

        let descriptor = TypeDescriptor::new("any").with_name("FreeText");
        assert_eq!(classify_union(&descriptor), UnionFamily::String);

        let descriptor = TypeDescriptor::new("any").with_name("Payload");
        assert_eq!(classify_union(&descriptor), UnionFamily::Object);
    }

    #[test]
    fn test_numeric_union_maps_to_float() {
        let m = mapper();
        let mapped = m.map(&union_of(&["int", "float"]), Some(&json!(3)));
        assert_eq!(mapped.kind, HostKind::Float);
        assert_eq!(mapped.default, HostValue::Float(3.0));
    }

    #[test]
    fn test_optional_carried() {
        let m = mapper();
        let mapped = m.map(&TypeDescriptor::new("int").optional(), Some(&json!(null)));
        assert!(mapped.optional);
        assert_eq!(mapped.default, HostValue::Integer(0));
    }

    #[test]
    fn test_describe_pin() {
        let m = mapper();
        let pin = m
            .describe_pin("steps", &TypeDescriptor::new("int"), Some(&json!(20)))
            .with_summary("Sampling steps.");
        assert_eq!(pin.name, "steps");
        assert_eq!(pin.default, HostValue::Integer(20));
        assert_eq!(pin.summary.as_deref(), Some("Sampling steps"));

        let raw = m
            .clone()
            .with_config(BridgeConfig {
                clean_descriptions: false,
                ..BridgeConfig::default()
            })
            .describe_pin("steps", &TypeDescriptor::new("int"), None)
            .with_summary("Sampling steps.");
        assert_eq!(raw.summary.as_deref(), Some("Sampling steps."));
    }
}
