//! Enumerated types backing dropdown controls
//!
//! Two sources produce enum types:
//!
//! - [`EnumRegistry`]: pre-built enums registered ahead of time, looked up by name
//! - [`EnumSynthesizer`]: enums synthesized at runtime from a schema's value list
//!
//! Neither creates a language-level type. An enum type is a value object
//! (ordered variants plus a reverse index) handed to the UI as an opaque
//! [`EnumHandle`]; the [`EnumSchema`] trait is the seam the literal marshaller
//! works against.

pub mod ident;
pub mod registry;
pub mod synthesizer;

use std::sync::Arc;

use crate::literal::LiteralValue;

pub use registry::{EnumDescriptorFn, EnumRegistry, RegisteredEnumType, RegisteredVariant};
pub use synthesizer::{EnumSynthesizer, SynthesisStats, SynthesizedEnumType};

/// Read access to an enum type's variants and reverse index
pub trait EnumSchema: Send + Sync {
    /// Identity of the type (declared name or synthesized identity)
    fn identity(&self) -> &str;

    /// Wire literals in declared order; index = ordinal
    fn variants(&self) -> &[LiteralValue];

    /// Member labels in declared order
    fn labels(&self) -> &[String];

    /// Resolve a normalized key to an ordinal using this type's matching rules
    fn ordinal_for_key(&self, key: &str) -> Option<usize>;

    /// Number of variants
    fn len(&self) -> usize {
        self.variants().len()
    }

    /// Whether the type has no variants
    fn is_empty(&self) -> bool {
        self.variants().is_empty()
    }
}

/// Opaque handle to an enum type, as handed to UI-pin building
///
/// Equality is instance identity: two handles are equal only if they point at
/// the same registered or synthesized type.
#[derive(Debug, Clone)]
pub enum EnumHandle {
    /// Pre-built enum from the registry
    Registered(Arc<RegisteredEnumType>),
    /// Enum synthesized from a schema value list
    Synthesized(Arc<SynthesizedEnumType>),
}

impl EnumHandle {
    /// Whether this handle came from runtime synthesis
    pub fn is_synthesized(&self) -> bool {
        matches!(self, EnumHandle::Synthesized(_))
    }

    fn schema(&self) -> &dyn EnumSchema {
        match self {
            EnumHandle::Registered(t) => t.as_ref(),
            EnumHandle::Synthesized(t) => t.as_ref(),
        }
    }
}

impl PartialEq for EnumHandle {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EnumHandle::Registered(a), EnumHandle::Registered(b)) => Arc::ptr_eq(a, b),
            (EnumHandle::Synthesized(a), EnumHandle::Synthesized(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for EnumHandle {}

impl EnumSchema for EnumHandle {
    fn identity(&self) -> &str {
        self.schema().identity()
    }

    fn variants(&self) -> &[LiteralValue] {
        self.schema().variants()
    }

    fn labels(&self) -> &[String] {
        self.schema().labels()
    }

    fn ordinal_for_key(&self, key: &str) -> Option<usize> {
        self.schema().ordinal_for_key(key)
    }
}

impl From<Arc<RegisteredEnumType>> for EnumHandle {
    fn from(t: Arc<RegisteredEnumType>) -> Self {
        EnumHandle::Registered(t)
    }
}

impl From<Arc<SynthesizedEnumType>> for EnumHandle {
    fn from(t: Arc<SynthesizedEnumType>) -> Self {
        EnumHandle::Synthesized(t)
    }
}
