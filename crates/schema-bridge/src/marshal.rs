//! Conversion between wire literals and enum ordinals
//!
//! Outbound (`to_wire_literal`) is a plain index into the variant list.
//! Inbound (`from_wire_literal`) never fails and tries, in order:
//!
//! 1. the type's reverse index on the literal's normalized key
//!    (synthesized: case-insensitive; registered: exact, then case-insensitive)
//! 2. the literal read as an ordinal, if in range
//! 3. ordinal 0

use crate::enums::EnumSchema;
use crate::error::{Result, SchemaBridgeError};
use crate::literal::{LiteralValue, WireLiteral};

/// Which tier resolved an inbound literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Matched a variant's normalized key
    Key,
    /// Interpreted as a raw ordinal
    Ordinal,
    /// Nothing matched; first variant chosen
    Fallback,
}

/// Outcome of resolving an inbound literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved ordinal
    pub ordinal: usize,
    /// Tier that produced it
    pub tier: MatchTier,
}

/// Wire literal for `ordinal`, or `None` if out of range
pub fn to_wire_literal<T>(enum_type: &T, ordinal: usize) -> Option<LiteralValue>
where
    T: EnumSchema + ?Sized,
{
    enum_type.variants().get(ordinal).cloned()
}

/// Wire literal for `ordinal`, reporting an out-of-range ordinal as an error
pub fn try_to_wire_literal<T>(enum_type: &T, ordinal: usize) -> Result<LiteralValue>
where
    T: EnumSchema + ?Sized,
{
    to_wire_literal(enum_type, ordinal).ok_or_else(|| SchemaBridgeError::OrdinalOutOfRange {
        name: enum_type.identity().to_string(),
        ordinal,
        len: enum_type.len(),
    })
}

/// Resolve an inbound literal, reporting which tier matched
pub fn resolve<T, R>(enum_type: &T, raw: &R) -> Resolution
where
    T: EnumSchema + ?Sized,
    R: WireLiteral + ?Sized,
{
    let literal = raw.to_literal();

    if let Some(ordinal) = enum_type.ordinal_for_key(&literal.normalized_key()) {
        return Resolution {
            ordinal,
            tier: MatchTier::Key,
        };
    }

    if let Some(ordinal) = literal.as_ordinal().filter(|&i| i < enum_type.len()) {
        return Resolution {
            ordinal,
            tier: MatchTier::Ordinal,
        };
    }

    log::debug!(
        "No variant of '{}' matches '{}', using the first variant",
        enum_type.identity(),
        literal
    );
    Resolution {
        ordinal: 0,
        tier: MatchTier::Fallback,
    }
}

/// Ordinal for an inbound literal; never fails
pub fn from_wire_literal<T, R>(enum_type: &T, raw: &R) -> usize
where
    T: EnumSchema + ?Sized,
    R: WireLiteral + ?Sized,
{
    resolve(enum_type, raw).ordinal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{EnumSynthesizer, RegisteredEnumType};
    use serde_json::json;

    fn s(v: &str) -> LiteralValue {
        LiteralValue::Str(v.to_string())
    }

    #[test]
    fn test_round_trip_all_ordinals() {
        let synth = EnumSynthesizer::default();
        let values = [json!("a"), json!(2), json!(1.5), json!(true), json!(null)];
        let t = synth.get_or_create(Some("Mixed"), &values, "Enum").unwrap();

        for i in 0..t.len() {
            let literal = to_wire_literal(t.as_ref(), i).unwrap();
            assert_eq!(from_wire_literal(t.as_ref(), &literal), i);
        }
    }

    #[test]
    fn test_to_wire_literal_out_of_range() {
        let synth = EnumSynthesizer::default();
        let t = synth.get_or_create(Some("Color"), &["Red"], "Enum").unwrap();
        assert_eq!(to_wire_literal(t.as_ref(), 0), Some(s("Red")));
        assert_eq!(to_wire_literal(t.as_ref(), 1), None);
        assert!(matches!(
            try_to_wire_literal(t.as_ref(), 3),
            Err(SchemaBridgeError::OrdinalOutOfRange { ordinal: 3, len: 1, .. })
        ));
    }

    #[test]
    fn test_case_insensitive_recovery() {
        let synth = EnumSynthesizer::default();
        let t = synth
            .get_or_create(Some("Color"), &["Red", "Green", "Blue"], "Enum")
            .unwrap();
        assert_eq!(from_wire_literal(t.as_ref(), "GREEN"), 1);
        assert_eq!(from_wire_literal(t.as_ref(), "  blue "), 2);
    }

    #[test]
    fn test_numeric_fallback() {
        let synth = EnumSynthesizer::default();
        let t = synth
            .get_or_create(Some("Color"), &["Red", "Green", "Blue"], "Enum")
            .unwrap();

        let resolution = resolve(t.as_ref(), "1");
        assert_eq!(
            resolution,
            Resolution {
                ordinal: 1,
                tier: MatchTier::Ordinal
            }
        );
        assert_eq!(from_wire_literal(t.as_ref(), &json!(2)), 2);
        assert_eq!(from_wire_literal(t.as_ref(), "7"), 0);
    }

    #[test]
    fn test_key_match_beats_ordinal() {
        let synth = EnumSynthesizer::default();
        let t = synth.get_or_create(Some("Steps"), &[json!(1), json!(0)], "Enum").unwrap();
        let resolution = resolve(t.as_ref(), &json!(1));
        assert_eq!(
            resolution,
            Resolution {
                ordinal: 0,
                tier: MatchTier::Key
            }
        );
    }

    #[test]
    fn test_unknown_literal_falls_back_to_first() {
        let synth = EnumSynthesizer::default();
        let t = synth.get_or_create(Some("Color"), &["Red", "Green"], "Enum").unwrap();
        let resolution = resolve(t.as_ref(), "totally-unknown");
        assert_eq!(
            resolution,
            Resolution {
                ordinal: 0,
                tier: MatchTier::Fallback
            }
        );
        assert_eq!(from_wire_literal(t.as_ref(), &json!({"nested": true})), 0);
    }

    #[test]
    fn test_registered_path() {
        let t = RegisteredEnumType::from_values("Quality", vec![s("low"), s("Low"), s("high")]);
        assert_eq!(from_wire_literal(&t, "Low"), 1);
        assert_eq!(from_wire_literal(&t, "LOW"), 0);
        assert_eq!(from_wire_literal(&t, "HIGH"), 2);
        assert_eq!(from_wire_literal(&t, &LiteralValue::Null), 0);
        assert_eq!(from_wire_literal(&t, "2"), 2);
        assert_eq!(to_wire_literal(&t, 2), Some(s("high")));
    }
}
