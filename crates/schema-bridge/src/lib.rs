//! Schema Bridge - Dynamic enum and type bridging for node editors
//!
//! Remote node schemas describe their inputs loosely: a type string, an
//! optional declared name, nested type arguments and, for enums, an ordered
//! list of wire values. This crate turns those descriptors into concrete
//! host kinds the editor can render as controls:
//!
//! - Enum synthesis from value lists, with stable cached identities
//! - Lookup of pre-built enums registered ahead of time
//! - Tiered conversion between wire literals and enum ordinals
//! - Classification of open/union kinds into one concrete kind
//!
//! # Architecture
//!
//! - `literal`: normalizes any incoming wire value into a `LiteralValue`
//! - `enums`: `EnumRegistry` (pre-built) and `EnumSynthesizer` (runtime), both
//!   handing out opaque `EnumHandle`s
//! - `marshal`: ordinal to wire literal and back
//! - `mapper`: `TypeMapper`, descriptor to `MappedType` / `PinDescription`
//!
//! # Example
//!
//! ```ignore
//! use schema_bridge::{TypeDescriptor, TypeMapper};
//!
//! let mapper = TypeMapper::default();
//! let descriptor = TypeDescriptor::from_json(
//!     r#"{"type": "enum", "type_name": "Color", "values": ["Red", "Green"]}"#,
//! )?;
//! let mapped = mapper.map(&descriptor, Some(&serde_json::json!("Green")));
//! assert_eq!(mapped.default.as_ordinal(), Some(1));
//! ```

pub mod config;
pub mod constants;
pub mod descriptor;
pub mod enums;
pub mod error;
pub mod host;
pub mod literal;
pub mod mapper;
pub mod marshal;
pub mod pin;

// Re-export key types
pub use config::BridgeConfig;
pub use descriptor::TypeDescriptor;
pub use enums::{
    EnumDescriptorFn, EnumHandle, EnumRegistry, EnumSchema, EnumSynthesizer, RegisteredEnumType,
    RegisteredVariant, SynthesisStats, SynthesizedEnumType,
};
pub use error::{Result, SchemaBridgeError};
pub use host::{HostKind, HostValue, MediaKind, MediaReference};
pub use literal::{LiteralValue, WireLiteral};
pub use mapper::{classify_union, MappedType, TypeMapper, UnionFamily};
pub use marshal::{
    from_wire_literal, resolve, to_wire_literal, try_to_wire_literal, MatchTier, Resolution,
};
pub use pin::{PinDescription, PinOption, PinRecord};
