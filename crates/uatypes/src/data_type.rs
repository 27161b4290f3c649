// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: runtime metadata driving the lifecycle engine.
//!
//! A [`DataType`] describes the memory shape of one type: its footprint,
//! its ordered member list and the builtin / fixed-size / zero-copyable
//! classification. Members refer to their element type by table index and
//! namespace flag and are resolved through a
//! [`DataTypeRegistry`](crate::DataTypeRegistry).
//!
//! Descriptors are trusted: the engine never checks that `mem_size` agrees
//! with the member layout.

use crate::types::NodeId;

/// The 25 builtin types, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum BuiltinKind {
    Boolean = 0,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    String,
    DateTime,
    Guid,
    ByteString,
    XmlElement,
    NodeId,
    ExpandedNodeId,
    StatusCode,
    QualifiedName,
    LocalizedText,
    ExtensionObject,
    DataValue,
    Variant,
    DiagnosticInfo,
}

impl BuiltinKind {
    /// Table order.
    pub const ALL: [BuiltinKind; 25] = [
        Self::Boolean,
        Self::SByte,
        Self::Byte,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float,
        Self::Double,
        Self::String,
        Self::DateTime,
        Self::Guid,
        Self::ByteString,
        Self::XmlElement,
        Self::NodeId,
        Self::ExpandedNodeId,
        Self::StatusCode,
        Self::QualifiedName,
        Self::LocalizedText,
        Self::ExtensionObject,
        Self::DataValue,
        Self::Variant,
        Self::DiagnosticInfo,
    ];

    /// Position in the base-namespace table.
    pub fn index(self) -> u16 {
        self as u16
    }

    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
            Self::ByteString => "ByteString",
            Self::XmlElement => "XmlElement",
            Self::NodeId => "NodeId",
            Self::ExpandedNodeId => "ExpandedNodeId",
            Self::StatusCode => "StatusCode",
            Self::QualifiedName => "QualifiedName",
            Self::LocalizedText => "LocalizedText",
            Self::ExtensionObject => "ExtensionObject",
            Self::DataValue => "DataValue",
            Self::Variant => "Variant",
            Self::DiagnosticInfo => "DiagnosticInfo",
        }
    }

    /// Footprint of one instance (64-bit C layout).
    pub fn mem_size(self) -> usize {
        match self {
            Self::Boolean | Self::SByte | Self::Byte => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float | Self::StatusCode => 4,
            Self::Int64 | Self::UInt64 | Self::Double | Self::DateTime => 8,
            Self::String | Self::ByteString | Self::XmlElement | Self::Guid => 16,
            Self::NodeId | Self::QualifiedName => 24,
            Self::LocalizedText => 32,
            Self::ExpandedNodeId | Self::ExtensionObject | Self::Variant => 48,
            Self::DiagnosticInfo => 56,
            Self::DataValue => 96,
        }
    }

    pub fn alignment(self) -> u8 {
        match self {
            Self::Boolean | Self::SByte | Self::Byte => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float | Self::StatusCode | Self::Guid => 4,
            _ => 8,
        }
    }

    /// Owns no heap memory; deletion is a no-op.
    pub fn is_fixed_size(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Float
                | Self::Double
                | Self::DateTime
                | Self::Guid
                | Self::StatusCode
        )
    }

    /// Wire bytes equal memory bytes on little-endian hosts.
    pub fn is_zero_copyable(self) -> bool {
        self.is_fixed_size()
    }
}

/// Shape class of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTypeKind {
    /// One of the 25 builtins; handled by dedicated code.
    Builtin(BuiltinKind),
    /// Int32-shaped enumeration.
    Enumeration,
    /// Generic structure walked member by member.
    Structure,
}

/// One field of a structured type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypeMember {
    pub member_name: String,
    /// Index of the member's element type in the table selected by
    /// `namespace_zero`.
    pub member_type_index: u16,
    /// NodeId of the member's element type, checked on registration.
    pub member_type_id: NodeId,
    /// Padding bytes between the previous member and this one.
    pub padding: u8,
    /// Member type lives in the base namespace table.
    pub namespace_zero: bool,
    /// Stored as a `(length, pointer)` pair.
    pub is_array: bool,
}

/// Runtime metadata for one type.
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    pub type_name: String,
    pub type_id: NodeId,
    pub mem_size: usize,
    pub alignment: u8,
    /// Position in its table.
    pub type_index: u16,
    /// Registered in the base namespace table.
    pub namespace_zero: bool,
    pub kind: DataTypeKind,
    pub fixed_size: bool,
    pub zero_copyable: bool,
    pub members: Vec<DataTypeMember>,
}

impl DataType {
    /// Descriptor for a builtin kind.
    pub fn builtin(kind: BuiltinKind) -> Self {
        Self {
            type_name: kind.name().to_string(),
            type_id: NodeId::numeric(0, u32::from(kind.index()) + 1),
            mem_size: kind.mem_size(),
            alignment: kind.alignment(),
            type_index: kind.index(),
            namespace_zero: true,
            kind: DataTypeKind::Builtin(kind),
            fixed_size: kind.is_fixed_size(),
            zero_copyable: kind.is_zero_copyable(),
            members: Vec::new(),
        }
    }

    /// Has a dedicated (non-generic) lifecycle; recursion stops here.
    pub fn is_builtin(&self) -> bool {
        !matches!(self.kind, DataTypeKind::Structure)
    }

    pub fn builtin_kind(&self) -> Option<BuiltinKind> {
        match self.kind {
            DataTypeKind::Builtin(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_structure(&self) -> bool {
        matches!(self.kind, DataTypeKind::Structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        for (i, kind) in BuiltinKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.index()), i);
            assert_eq!(BuiltinKind::from_index(i as u16), Some(*kind));
        }
        assert_eq!(BuiltinKind::from_index(25), None);
        assert_eq!(BuiltinKind::DiagnosticInfo.index(), 24);
    }

    #[test]
    fn test_builtin_descriptor() {
        let t = DataType::builtin(BuiltinKind::Int32);
        assert_eq!(t.type_id, NodeId::numeric(0, 6));
        assert_eq!(t.mem_size, 4);
        assert!(t.is_builtin());
        assert!(t.fixed_size && t.zero_copyable);

        let s = DataType::builtin(BuiltinKind::String);
        assert!(!s.fixed_size);
        assert_eq!(s.type_id, NodeId::numeric(0, 12));
    }

    #[test]
    fn test_alignment_divides_size() {
        for kind in BuiltinKind::ALL {
            assert_eq!(kind.mem_size() % usize::from(kind.alignment()), 0, "{}", kind.name());
        }
    }
}
