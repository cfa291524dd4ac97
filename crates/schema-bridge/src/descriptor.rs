//! Schema type descriptors
//!
//! A `TypeDescriptor` is the schema-level description of one node parameter or
//! output, as delivered by the remote metadata endpoint. Descriptors are
//! immutable trees: unions, lists and dicts carry their member types in
//! `nested_types`; enums carry their ordered wire values in `value_set`.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kinds that reference media assets rather than inline data
static ASSET_KINDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["image", "audio", "video", "document", "folder", "model_ref"]
        .into_iter()
        .collect()
});

/// Kinds treated as primitive scalars
const PRIMITIVE_KINDS: [&str; 9] = [
    "int", "integer", "float", "number", "bool", "boolean", "str", "string", "text",
];

/// Kinds mapped to a list of values
pub const LIST_KINDS: [&str; 2] = ["list", "array"];

/// Kinds mapped to an opaque object
pub const DICT_KINDS: [&str; 2] = ["dict", "object"];

/// Kinds whose concrete type is decided by their nested types
pub const UNION_KINDS: [&str; 4] = ["any", "union", "oneof", "either"];

/// Schema-level description of a parameter/output type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type identifier (e.g. "str", "int", "enum", "union", "image")
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Declared type name (enum name, custom type name or union hint)
    #[serde(
        rename = "type_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub declared_name: Option<String>,
    /// Ordered enum values as raw wire literals
    #[serde(rename = "values", default, skip_serializing_if = "Option::is_none")]
    pub value_set: Option<Vec<serde_json::Value>>,
    /// Type arguments (list element, dict key/value, union members)
    #[serde(rename = "type_args", default, skip_serializing_if = "Vec::is_empty")]
    pub nested_types: Vec<TypeDescriptor>,
    /// Whether the value may be absent
    #[serde(default)]
    pub optional: bool,
}

impl TypeDescriptor {
    /// Create a descriptor of the given kind
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Create an enum descriptor with a declared name and ordered values
    pub fn enumeration(name: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        Self {
            kind: "enum".to_string(),
            declared_name: Some(name.into()),
            value_set: Some(values),
            ..Self::default()
        }
    }

    /// Create a union descriptor over the given member types
    pub fn union(members: Vec<TypeDescriptor>) -> Self {
        Self {
            kind: "union".to_string(),
            nested_types: members,
            ..Self::default()
        }
    }

    /// Parse a descriptor from its wire JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the declared type name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.declared_name = Some(name.into());
        self
    }

    /// Set the nested type arguments
    pub fn with_nested(mut self, nested: Vec<TypeDescriptor>) -> Self {
        self.nested_types = nested;
        self
    }

    /// Mark this descriptor as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Kind trimmed and lower-cased, as used for dispatch
    pub fn normalized_kind(&self) -> String {
        self.kind.trim().to_ascii_lowercase()
    }

    /// Declared name, trimmed, if non-blank
    pub fn declared_name(&self) -> Option<&str> {
        self.declared_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Enum values, empty if absent
    pub fn values(&self) -> &[serde_json::Value] {
        self.value_set.as_deref().unwrap_or(&[])
    }

    pub fn is_enum(&self) -> bool {
        self.normalized_kind() == "enum"
    }

    pub fn is_list(&self) -> bool {
        LIST_KINDS.contains(&self.normalized_kind().as_str())
    }

    pub fn is_dict(&self) -> bool {
        DICT_KINDS.contains(&self.normalized_kind().as_str())
    }

    /// Whether this is an open/union kind (`any`, `union`, `oneof`, `either`)
    pub fn is_union(&self) -> bool {
        UNION_KINDS.contains(&self.normalized_kind().as_str())
    }

    pub fn is_primitive(&self) -> bool {
        PRIMITIVE_KINDS.contains(&self.normalized_kind().as_str())
    }

    /// Whether this references an asset; with `recursive`, unions count if any member does
    pub fn is_asset(&self, recursive: bool) -> bool {
        if recursive && self.is_union() {
            return self.nested_types.iter().any(|t| t.is_asset(true));
        }
        ASSET_KINDS.contains(&self.normalized_kind().as_str())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |sep: &str| {
            self.nested_types
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(sep)
        };

        match self.normalized_kind().as_str() {
            k if LIST_KINDS.contains(&k) && !self.nested_types.is_empty() => {
                write!(f, "List[{}]", self.nested_types[0])
            }
            k if DICT_KINDS.contains(&k) && self.nested_types.len() >= 2 => {
                write!(f, "Dict[{}, {}]", self.nested_types[0], self.nested_types[1])
            }
            k if DICT_KINDS.contains(&k) && self.declared_name().is_none() => {
                write!(f, "Dict[Any, Any]")
            }
            "tuple" => write!(f, "Tuple[{}]", join(", ")),
            k if UNION_KINDS.contains(&k) && !self.nested_types.is_empty() => {
                write!(f, "({})", join(" | "))
            }
            "enum" => {
                let values = self
                    .values()
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Enum[{}]", values)
            }
            _ => write!(f, "{}", self.declared_name().unwrap_or(&self.kind)),
        }
    }
}
