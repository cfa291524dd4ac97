//! Identifier and label helpers for enum types

use crate::literal::LiteralValue;

/// Make a string identifier-safe.
///
/// Letters, digits and `_` are kept; everything else becomes `_`. Runs of
/// underscores collapse to one and edge underscores are trimmed, so the result
/// may be empty.
pub fn sanitize_identifier(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_underscore = false;
    for ch in s.chars() {
        let c = if ch.is_alphanumeric() || ch == '_' { ch } else { '_' };
        if c == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

/// Readable, deterministic member label for the variant at `index`.
///
/// Empty labels become `Value_NN`; labels starting with a digit get a `V_`
/// prefix.
pub fn member_label(value: &LiteralValue, index: usize) -> String {
    let raw = match value {
        LiteralValue::Null => String::new(),
        other => other.to_string(),
    };

    let candidate = sanitize_identifier(raw.trim());
    if candidate.is_empty() {
        return format!("Value_{:02}", index);
    }

    if candidate.starts_with(|c: char| c.is_ascii_digit()) {
        format!("V_{}", candidate)
    } else {
        candidate
    }
}

/// Member labels for an ordered variant list, with collisions disambiguated by ordinal
pub fn member_labels(values: &[LiteralValue]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let mut label = member_label(value, index);
        if labels.contains(&label) {
            label = format!("{}_{}", label, index);
        }
        labels.push(label);
    }
    labels
}

/// Human-readable form of a member name ("SomeEnumValue" -> "Some Enum Value")
pub fn display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for ch in name.chars() {
        if let Some(p) = prev {
            if ch.is_uppercase() && !p.is_uppercase() {
                out.push(' ');
            }
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}
