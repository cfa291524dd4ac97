//! Pin descriptions handed to UI-pin building
//!
//! A [`PinDescription`] is everything the editor needs to build one input
//! control: the mapped host kind, its default, and the cleaned-up help text.
//! [`PinRecord`] is its serializable snapshot for the frontend.

use serde::{Deserialize, Serialize};

use crate::enums::{EnumHandle, EnumSchema};
use crate::host::{HostKind, HostValue};

/// Description of a single input pin
#[derive(Debug, Clone, PartialEq)]
pub struct PinDescription {
    pub name: String,
    pub kind: HostKind,
    pub default: HostValue,
    pub summary: Option<String>,
    pub remarks: Option<String>,
    pub visible: bool,
    pub tags: Vec<String>,
    clean_descriptions: bool,
}

impl PinDescription {
    /// Create a visible pin with no help text
    pub fn new(name: impl Into<String>, kind: HostKind, default: HostValue) -> Self {
        Self {
            name: name.into(),
            kind,
            default,
            summary: None,
            remarks: None,
            visible: true,
            tags: Vec::new(),
            clean_descriptions: true,
        }
    }

    /// Keep summaries and remarks exactly as given
    pub fn raw_descriptions(mut self) -> Self {
        self.clean_descriptions = false;
        self
    }

    pub(crate) fn with_clean_descriptions(mut self, clean: bool) -> Self {
        self.clean_descriptions = clean;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(self.clean(summary.into()));
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(self.clean(remarks.into()));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Dropdown options, for enum pins
    pub fn options(&self) -> Vec<PinOption> {
        self.kind
            .enum_handle()
            .map(enum_options)
            .unwrap_or_default()
    }

    /// Serializable snapshot of this pin
    pub fn to_record(&self) -> PinRecord {
        PinRecord {
            name: self.name.clone(),
            kind: self.kind.name().to_string(),
            default: self.default.to_wire(),
            summary: self.summary.clone(),
            remarks: self.remarks.clone(),
            visible: self.visible,
            tags: self.tags.clone(),
            options: self.options(),
        }
    }

    fn clean(&self, text: String) -> String {
        if self.clean_descriptions {
            strip_trailing_periods_per_line(&text)
        } else {
            text
        }
    }
}

/// One selectable dropdown entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinOption {
    /// Wire literal sent back when selected
    pub value: serde_json::Value,
    /// Human-readable label
    pub label: String,
    /// Ordinal of the variant
    pub ordinal: usize,
}

/// Serializable form of a [`PinDescription`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRecord {
    pub name: String,
    pub kind: String,
    pub default: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PinOption>,
}

fn enum_options(handle: &EnumHandle) -> Vec<PinOption> {
    let labels: &[String] = match handle {
        EnumHandle::Registered(t) => t.display_names(),
        EnumHandle::Synthesized(t) => t.labels(),
    };
    handle
        .variants()
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(ordinal, (literal, label))| PinOption {
            value: literal.to_json(),
            label: label.clone(),
            ordinal,
        })
        .collect()
}

/// Remove one trailing period, keeping ellipses
pub fn strip_trailing_period(line: &str) -> &str {
    let line = line.trim_end();
    if line.ends_with("...") {
        line
    } else {
        line.strip_suffix('.').unwrap_or(line)
    }
}

/// Apply [`strip_trailing_period`] to every line
pub fn strip_trailing_periods_per_line(text: &str) -> String {
    text.lines()
        .map(strip_trailing_period)
        .collect::<Vec<_>>()
        .join("\n")
}
