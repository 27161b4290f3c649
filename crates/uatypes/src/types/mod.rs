// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Builtin primitives and union containers.

mod data_value;
mod datetime;
mod diagnostic_info;
mod extension_object;
mod guid;
mod node_id;
mod random;
mod status_code;
mod string;
mod text;

pub use data_value::DataValue;
pub use datetime::{DateTime, DateTimeStruct};
pub use diagnostic_info::{presence, DiagnosticInfo};
pub use extension_object::{ExtensionObject, ExtensionObjectEncoding};
pub use guid::Guid;
pub use node_id::{ExpandedNodeId, Identifier, IdentifierType, NodeId};
pub use random::{random_seed, random_u32};
pub use status_code::StatusCode;
pub use string::{ByteString, UaString, XmlElement};
pub use text::{LocalizedText, QualifiedName};

/// Smallest `SByte`.
pub const SBYTE_MIN: i8 = i8::MIN;
/// Largest `SByte`.
pub const SBYTE_MAX: i8 = i8::MAX;
pub const BYTE_MIN: u8 = 0;
pub const BYTE_MAX: u8 = u8::MAX;
pub const INT16_MIN: i16 = i16::MIN;
pub const INT16_MAX: i16 = i16::MAX;
pub const UINT16_MIN: u16 = 0;
pub const UINT16_MAX: u16 = u16::MAX;
pub const INT32_MIN: i32 = i32::MIN;
pub const INT32_MAX: i32 = i32::MAX;
pub const UINT32_MIN: u32 = 0;
pub const UINT32_MAX: u32 = u32::MAX;
/// Two's-complement bounds.
pub const INT64_MIN: i64 = i64::MIN;
pub const INT64_MAX: i64 = i64::MAX;
pub const UINT64_MIN: u64 = 0;
pub const UINT64_MAX: u64 = u64::MAX;
