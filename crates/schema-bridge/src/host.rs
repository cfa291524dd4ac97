//! Host-side kinds and values
//!
//! A [`HostKind`] is what the mapper decides a schema type becomes in the
//! editor; a [`HostValue`] is a concrete value of one of those kinds. Schema
//! defaults arrive as loose JSON and are coerced here; values leave again
//! through [`HostValue::to_wire`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::EnumHandle;
use crate::error::{Result, SchemaBridgeError};
use crate::marshal::{from_wire_literal, to_wire_literal};

/// Naive timestamp layout accepted for date-time defaults (interpreted as UTC)
const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Media families that are passed around by reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    Document,
}

impl MediaKind {
    /// Media kind for a normalized schema kind
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "image" => Some(Self::Image),
            "audio" => Some(Self::Audio),
            "video" => Some(Self::Video),
            "document" => Some(Self::Document),
            _ => None,
        }
    }

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
        }
    }
}

/// Reference to a media asset held elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    pub kind: MediaKind,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

impl MediaReference {
    pub fn new(kind: MediaKind, uri: impl Into<String>) -> Self {
        Self {
            kind,
            uri: uri.into(),
            asset_id: None,
        }
    }

    pub fn with_asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }
}

/// Concrete host representation chosen for a schema type
#[derive(Debug, Clone, PartialEq)]
pub enum HostKind {
    String,
    Integer,
    Float,
    Boolean,
    StringList,
    /// Opaque JSON object
    Object,
    DateTime,
    /// Dropdown backed by an enum type
    Enum(EnumHandle),
    /// Reference to a media asset
    Media(MediaKind),
}

impl HostKind {
    /// Short name used in logs and coercion errors
    pub fn name(&self) -> &'static str {
        match self {
            HostKind::String => "string",
            HostKind::Integer => "integer",
            HostKind::Float => "float",
            HostKind::Boolean => "boolean",
            HostKind::StringList => "string_list",
            HostKind::Object => "object",
            HostKind::DateTime => "datetime",
            HostKind::Enum(_) => "enum",
            HostKind::Media(_) => "media",
        }
    }

    /// The enum handle, for enum kinds
    pub fn enum_handle(&self) -> Option<&EnumHandle> {
        match self {
            HostKind::Enum(handle) => Some(handle),
            _ => None,
        }
    }
}

/// A value of some [`HostKind`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    StringList(Vec<String>),
    Object(serde_json::Value),
    DateTime(DateTime<Utc>),
    Enum { handle: EnumHandle, ordinal: usize },
    Media(Option<MediaReference>),
}

impl HostValue {
    /// Zero value for a kind
    pub fn zero(kind: &HostKind) -> Self {
        match kind {
            HostKind::String => HostValue::String(String::new()),
            HostKind::Integer => HostValue::Integer(0),
            HostKind::Float => HostValue::Float(0.0),
            HostKind::Boolean => HostValue::Boolean(false),
            HostKind::StringList => HostValue::StringList(Vec::new()),
            HostKind::Object => HostValue::Object(serde_json::Value::Null),
            HostKind::DateTime => HostValue::DateTime(DateTime::<Utc>::UNIX_EPOCH),
            HostKind::Enum(handle) => HostValue::Enum {
                handle: handle.clone(),
                ordinal: 0,
            },
            HostKind::Media(_) => HostValue::Media(None),
        }
    }

    /// Coerce a loosely typed schema value into `kind`
    pub fn coerce(kind: &HostKind, value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        let fail = || SchemaBridgeError::coercion(kind.name(), value);

        match kind {
            HostKind::String => match value {
                Value::Null => Err(fail()),
                Value::String(s) => Ok(HostValue::String(s.clone())),
                other => Ok(HostValue::String(other.to_string())),
            },
            HostKind::Integer => match value {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().and_then(truncate_to_i64))
                    .map(HostValue::Integer)
                    .ok_or_else(fail),
                Value::String(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(HostValue::Integer)
                    .map_err(|_| fail()),
                _ => Err(fail()),
            },
            HostKind::Float => match value {
                Value::Number(n) => n.as_f64().map(HostValue::Float).ok_or_else(fail),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(HostValue::Float)
                    .ok_or_else(fail),
                _ => Err(fail()),
            },
            HostKind::Boolean => match value {
                Value::Bool(b) => Ok(HostValue::Boolean(*b)),
                Value::String(s) if s.trim().eq_ignore_ascii_case("true") => {
                    Ok(HostValue::Boolean(true))
                }
                Value::String(s) if s.trim().eq_ignore_ascii_case("false") => {
                    Ok(HostValue::Boolean(false))
                }
                _ => Err(fail()),
            },
            HostKind::StringList => match value {
                Value::Array(items) => Ok(HostValue::StringList(
                    items
                        .iter()
                        .map(|item| match item {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect(),
                )),
                Value::String(s) => Ok(HostValue::StringList(vec![s.clone()])),
                _ => Err(fail()),
            },
            HostKind::Object => match value {
                Value::Null => Err(fail()),
                other => Ok(HostValue::Object(other.clone())),
            },
            HostKind::DateTime => match value {
                Value::String(s) => parse_datetime(s.trim())
                    .map(HostValue::DateTime)
                    .ok_or_else(fail),
                _ => Err(fail()),
            },
            HostKind::Media(media) => match value {
                Value::String(s) if !s.trim().is_empty() => Ok(HostValue::Media(Some(
                    MediaReference::new(*media, s.trim()),
                ))),
                Value::Object(map) => {
                    let uri = map
                        .get("uri")
                        .and_then(Value::as_str)
                        .filter(|u| !u.trim().is_empty())
                        .ok_or_else(fail)?;
                    let mut reference = MediaReference::new(*media, uri.trim());
                    if let Some(asset_id) = map.get("asset_id").and_then(Value::as_str) {
                        reference = reference.with_asset_id(asset_id);
                    }
                    Ok(HostValue::Media(Some(reference)))
                }
                _ => Err(fail()),
            },
            HostKind::Enum(handle) => Ok(HostValue::Enum {
                handle: handle.clone(),
                ordinal: from_wire_literal(handle, value),
            }),
        }
    }

    /// Coerce `value` when present, falling back to the zero value
    pub fn coerce_or_zero(kind: &HostKind, value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(v) => Self::coerce(kind, v).unwrap_or_else(|e| {
                log::debug!("Using zero value for {}: {}", kind.name(), e);
                Self::zero(kind)
            }),
            None => Self::zero(kind),
        }
    }

    /// Outbound JSON form for transport
    pub fn to_wire(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            HostValue::String(s) => Value::String(s.clone()),
            HostValue::Integer(i) => Value::from(*i),
            HostValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            HostValue::Boolean(b) => Value::Bool(*b),
            HostValue::StringList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            HostValue::Object(v) => v.clone(),
            HostValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            HostValue::Enum { handle, ordinal } => to_wire_literal(handle, *ordinal)
                .map(|literal| literal.to_json())
                .unwrap_or(Value::Null),
            HostValue::Media(None) => Value::Null,
            HostValue::Media(Some(reference)) => {
                let mut map = serde_json::Map::new();
                map.insert("type".to_string(), Value::from(reference.kind.as_str()));
                map.insert("uri".to_string(), Value::String(reference.uri.clone()));
                if let Some(asset_id) = &reference.asset_id {
                    map.insert("asset_id".to_string(), Value::String(asset_id.clone()));
                }
                Value::Object(map)
            }
        }
    }

    /// Ordinal of an enum value
    pub fn as_ordinal(&self) -> Option<usize> {
        match self {
            HostValue::Enum { ordinal, .. } => Some(*ordinal),
            _ => None,
        }
    }
}

/// Truncate toward zero, rejecting values `i64` cannot hold
fn truncate_to_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    let t = f.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, NAIVE_DATETIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
