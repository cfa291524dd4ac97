//! Canonical wire literals
//!
//! Remote schemas deliver enum values and defaults as loosely typed JSON.
//! Everything entering the bridge is normalized once into a [`LiteralValue`]
//! through the [`WireLiteral`] trait, so the enum and mapper code only ever
//! handles the five canonical shapes.
//!
//! # Normalization rules
//!
//! - Integral numbers become `Int`, non-integral numbers become `Float`
//! - Arrays and objects (invalid as literals) become `Str` holding their JSON text
//! - A `LiteralValue` normalizes to itself
//!
//! Each literal also has a *normalized key*: its trimmed string form, with
//! `Null` mapped to [`NULL_KEY`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::NULL_KEY;

/// Canonical in-process representation of a wire value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// JSON null / absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integral number
    Int(i64),
    /// Non-integral number
    Float(f64),
    /// Text
    Str(String),
}

impl LiteralValue {
    /// Normalize any wire literal into canonical form
    pub fn from_wire<R: WireLiteral + ?Sized>(raw: &R) -> Self {
        raw.to_literal()
    }

    /// Whether this is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, LiteralValue::Null)
    }

    /// Borrow the text of a `Str` literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Key used by enum reverse indices and synthesis cache keys
    pub fn normalized_key(&self) -> String {
        match self {
            LiteralValue::Null => NULL_KEY.to_string(),
            other => other.to_string().trim().to_string(),
        }
    }

    /// Interpret this literal as an enum ordinal.
    ///
    /// Accepts non-negative integers and strings that parse as one.
    pub fn as_ordinal(&self) -> Option<usize> {
        match self {
            LiteralValue::Int(i) => usize::try_from(*i).ok(),
            LiteralValue::Str(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|i| usize::try_from(i).ok()),
            _ => None,
        }
    }

    /// Plain JSON form used for transport
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            LiteralValue::Null => serde_json::Value::Null,
            LiteralValue::Bool(b) => serde_json::Value::Bool(*b),
            LiteralValue::Int(i) => serde_json::Value::from(*i),
            LiteralValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            LiteralValue::Str(s) => serde_json::Value::String(s.clone()),
        }
    }

    fn from_f64(f: f64) -> Self {
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            LiteralValue::Int(f as i64)
        } else {
            LiteralValue::Float(f)
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "null"),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Int(i) => write!(f, "{}", i),
            LiteralValue::Float(v) => write!(f, "{}", v),
            LiteralValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Anything that can arrive as a wire literal
///
/// Callers never need to pre-normalize: native primitives, generic JSON values
/// and already-canonical literals are all accepted.
pub trait WireLiteral {
    /// Convert into the canonical literal form
    fn to_literal(&self) -> LiteralValue;
}

impl WireLiteral for LiteralValue {
    fn to_literal(&self) -> LiteralValue {
        self.clone()
    }
}

impl WireLiteral for serde_json::Value {
    fn to_literal(&self) -> LiteralValue {
        match self {
            serde_json::Value::Null => LiteralValue::Null,
            serde_json::Value::Bool(b) => LiteralValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => LiteralValue::Int(i),
                None => n
                    .as_f64()
                    .map(LiteralValue::from_f64)
                    .unwrap_or_else(|| LiteralValue::Str(n.to_string())),
            },
            serde_json::Value::String(s) => LiteralValue::Str(s.clone()),
            container => LiteralValue::Str(container.to_string()),
        }
    }
}

impl WireLiteral for str {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Str(self.to_string())
    }
}

impl WireLiteral for String {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Str(self.clone())
    }
}

impl WireLiteral for bool {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Bool(*self)
    }
}

impl WireLiteral for i64 {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Int(*self)
    }
}

impl WireLiteral for i32 {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Int(i64::from(*self))
    }
}

impl WireLiteral for u32 {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Int(i64::from(*self))
    }
}

impl WireLiteral for f64 {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::from_f64(*self)
    }
}

impl WireLiteral for f32 {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::from_f64(f64::from(*self))
    }
}

impl<T: WireLiteral> WireLiteral for Option<T> {
    fn to_literal(&self) -> LiteralValue {
        self.as_ref().map_or(LiteralValue::Null, WireLiteral::to_literal)
    }
}

impl<T: WireLiteral + ?Sized> WireLiteral for &T {
    fn to_literal(&self) -> LiteralValue {
        (**self).to_literal()
    }
}

/// Normalize an ordered value list, preserving order
pub fn normalize_all<R: WireLiteral>(values: &[R]) -> Vec<LiteralValue> {
    values.iter().map(WireLiteral::to_literal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_scalars_normalize() {
        assert_eq!(json!(null).to_literal(), LiteralValue::Null);
        assert_eq!(json!(true).to_literal(), LiteralValue::Bool(true));
        assert_eq!(json!(3).to_literal(), LiteralValue::Int(3));
        assert_eq!(json!(1.5).to_literal(), LiteralValue::Float(1.5));
        assert_eq!(json!("abc").to_literal(), LiteralValue::Str("abc".to_string()));
    }

    #[test]
    fn test_integral_float_becomes_int() {
        assert_eq!(json!(2.0).to_literal(), LiteralValue::Int(2));
        assert_eq!(4.0f64.to_literal(), LiteralValue::Int(4));
        assert_eq!(f64::NAN.to_literal().to_string(), "NaN");
        assert_eq!(1e300f64.to_literal(), LiteralValue::Float(1e300));
    }

    #[test]
    fn test_containers_become_json_text() {
        assert_eq!(
            json!([1, 2]).to_literal(),
            LiteralValue::Str("[1,2]".to_string())
        );
        assert_eq!(
            json!({"a": 1}).to_literal(),
            LiteralValue::Str("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let literals = [
            LiteralValue::Null,
            LiteralValue::Bool(false),
            LiteralValue::Int(-7),
            LiteralValue::Float(2.0),
            LiteralValue::Str(" padded ".to_string()),
        ];
        for lit in literals {
            assert_eq!(LiteralValue::from_wire(&lit), lit);
            assert_eq!(lit.to_literal().to_literal(), lit);
        }
    }

    #[test]
    fn test_normalized_keys() {
        assert_eq!(LiteralValue::Str("  Red ".to_string()).normalized_key(), "Red");
        assert_eq!(LiteralValue::Int(5).normalized_key(), "5");
        assert_eq!(LiteralValue::Bool(true).normalized_key(), "true");
        assert_eq!(LiteralValue::Null.normalized_key(), NULL_KEY);
        assert_ne!(LiteralValue::Null.normalized_key(), "");
        assert_ne!(
            LiteralValue::Null.normalized_key(),
            LiteralValue::Str("null".to_string()).normalized_key()
        );
    }

    #[test]
    fn test_as_ordinal() {
        assert_eq!(LiteralValue::Int(2).as_ordinal(), Some(2));
        assert_eq!(LiteralValue::Int(-1).as_ordinal(), None);
        assert_eq!(LiteralValue::Str(" 1 ".to_string()).as_ordinal(), Some(1));
        assert_eq!(LiteralValue::Str("one".to_string()).as_ordinal(), None);
        assert_eq!(LiteralValue::Float(1.5).as_ordinal(), None);
        assert_eq!(LiteralValue::Bool(true).as_ordinal(), None);
    }

    #[test]
    fn test_native_primitives() {
        assert_eq!("x".to_literal(), LiteralValue::Str("x".to_string()));
        assert_eq!(7i32.to_literal(), LiteralValue::Int(7));
        assert_eq!(None::<i64>.to_literal(), LiteralValue::Null);
        assert_eq!(Some(true).to_literal(), LiteralValue::Bool(true));
    }

    #[test]
    fn test_untagged_serde() {
        let lit: LiteralValue = serde_json::from_str("2").unwrap();
        assert_eq!(lit, LiteralValue::Int(2));
        let lit: LiteralValue = serde_json::from_str("null").unwrap();
        assert_eq!(lit, LiteralValue::Null);
        assert_eq!(serde_json::to_string(&LiteralValue::Str("a".into())).unwrap(), "\"a\"");
        assert_eq!(LiteralValue::Float(0.5).to_json(), json!(0.5));
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let values = vec![json!("b"), json!(1), json!(null)];
        assert_eq!(
            normalize_all(&values),
            vec![
                LiteralValue::Str("b".to_string()),
                LiteralValue::Int(1),
                LiteralValue::Null
            ]
        );
    }
}
