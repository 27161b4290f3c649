// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # uatypes - generic type-descriptor lifecycle engine
//!
//! Runtime metadata for OPC UA data types, and the machinery that allocates,
//! initializes, deep-copies and deep-destroys a value of *any* registered
//! type from its descriptor alone, without per-type generated code.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use uatypes::{
//!     ArrayValue, BuiltinKind, DataTypeBuilder, DataTypeRegistry, Engine, MemberValue, NodeId,
//!     Result, Value,
//! };
//!
//! fn main() -> Result<()> {
//!     // Describe a structure at startup
//!     let mut reg = DataTypeRegistry::builder();
//!     let double = reg.builtin(BuiltinKind::Double);
//!     let string = reg.builtin(BuiltinKind::String);
//!     let reading = reg.add_custom(
//!         DataTypeBuilder::structure("Reading", NodeId::numeric(1, 5001))
//!             .member("Sensor", &string)
//!             .array_member("Samples", &double)
//!             .build(),
//!     )?;
//!     let engine = Engine::new(Arc::new(reg.build()));
//!
//!     // Allocate, fill, copy, delete
//!     let mut value = engine.new_value(&reading)?;
//!     if let Some(s) = value.as_structure_mut() {
//!         s.members[0] = MemberValue::Scalar(Value::from("TT-101"));
//!         let mut samples = engine.array_new(3, &double)?;
//!         samples[2] = Value::Double(21.5);
//!         s.members[1] = MemberValue::Array(ArrayValue::from_vec(samples));
//!     }
//!     let copy = engine.duplicate(&value, &reading)?;
//!     assert_eq!(*copy, *value);
//!
//!     engine.delete(copy, &reading);
//!     engine.delete(value, &reading);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |          Variant  |  ExtensionObject / NodeId / DiagnosticInfo      |
//! +---------------------------------------------------------------------+
//! |   Lifecycle Engine (new/init/copy/delete)  |  Range Addressing      |
//! |   Array Engine (array_new/copy/delete)     |                        |
//! +---------------------------------------------------------------------+
//! |   DataType descriptors + DataTypeRegistry (base + custom tables)    |
//! +---------------------------------------------------------------------+
//! |   Builtin primitives (numerics, strings, DateTime, Guid, ...)       |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DataType`] | Memory shape of one type: size, members, classification |
//! | [`DataTypeRegistry`] | Read-only descriptor tables, injected into the engine |
//! | [`Engine`] | Lifecycle and array operations driven by descriptors |
//! | [`Value`] | A value of any described type |
//! | [`Variant`] | Scalar or (multidimensional) array of any type |
//! | [`NumericRange`] | Sub-range selector such as `"1:2,0:3,5"` |
//!
//! ## Modules Overview
//!
//! - [`engine`] - Lifecycle and array engine (start here)
//! - [`types`] - Builtin primitives and union containers
//! - [`memory`] - Allocation bookkeeping and failure injection
//! - [`config`] - Constants and [`EngineConfig`]

// Clippy: No blanket suppressions. Fix issues properly or use inline #[allow] with justification.

/// Descriptor construction with computed layout.
pub mod builder;
/// Global constants and runtime engine configuration.
pub mod config;
/// Type descriptors (DataType, DataTypeMember, BuiltinKind).
pub mod data_type;
/// Generic lifecycle and array engine.
pub mod engine;
/// Error kinds for all engine operations.
pub mod error;
/// Allocator seam: bookkeeping and failure injection.
pub mod memory;
/// NumericRange parsing and index selection.
pub mod range;
/// Base and custom descriptor tables.
pub mod registry;
/// Builtin primitives and union containers.
pub mod types;
/// Value model (Value, Structure, ArrayValue).
pub mod value;
/// Variant container with owned and borrowed storage.
pub mod variant;

pub use builder::DataTypeBuilder;
pub use config::EngineConfig;
pub use data_type::{BuiltinKind, DataType, DataTypeKind, DataTypeMember};
pub use engine::Engine;
pub use error::{Error, Result};
pub use range::{NumericRange, NumericRangeDimension};
pub use registry::{DataTypeRegistry, RegistryBuilder};
pub use types::{
    ByteString, DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, ExtensionObject,
    ExtensionObjectEncoding, Guid, LocalizedText, NodeId, QualifiedName, StatusCode, UaString,
    XmlElement,
};
pub use value::{shared, ArrayValue, MemberValue, Shared, Structure, Value};
pub use variant::{Storage, StorageType, Variant, VariantState};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
