// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for DataType descriptors.
//!
//! Computes member padding, `mem_size` and the fixed-size / zero-copyable
//! classification with C layout rules, so hand-written descriptors stay
//! consistent with their member lists.

use crate::data_type::{DataType, DataTypeKind, DataTypeMember};
use crate::types::NodeId;

/// `(length, pointer)` pair of an array member.
const ARRAY_MEMBER_SIZE: usize = 16;
const ARRAY_MEMBER_ALIGN: usize = 8;

/// Builder for creating structure and enumeration descriptors.
///
/// Member types must already be registered (their `type_index` and
/// namespace are recorded, not the descriptor itself).
///
/// # Example
///
/// ```rust
/// use uatypes::{BuiltinKind, DataTypeBuilder, DataTypeRegistry, NodeId};
///
/// let mut reg = DataTypeRegistry::builder();
/// let uint16 = reg.builtin(BuiltinKind::UInt16);
/// let double = reg.builtin(BuiltinKind::Double);
///
/// let range = DataTypeBuilder::structure("Range", NodeId::numeric(1, 3001))
///     .member("Low", &uint16)
///     .member("High", &double)
///     .build();
/// assert_eq!(range.members[1].padding, 6);
/// assert_eq!(range.mem_size, 16);
/// assert!(range.fixed_size && !range.zero_copyable);
/// ```
#[derive(Debug)]
pub struct DataTypeBuilder {
    name: String,
    type_id: NodeId,
    kind: DataTypeKind,
    members: Vec<PendingMember>,
}

#[derive(Debug)]
struct PendingMember {
    name: String,
    type_index: u16,
    type_id: NodeId,
    namespace_zero: bool,
    is_array: bool,
    mem_size: usize,
    alignment: usize,
    fixed_size: bool,
    zero_copyable: bool,
}

impl DataTypeBuilder {
    /// Start a structure descriptor.
    pub fn structure(name: impl Into<String>, type_id: NodeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            kind: DataTypeKind::Structure,
            members: Vec::new(),
        }
    }

    /// Start an enumeration descriptor (Int32 layout).
    pub fn enumeration(name: impl Into<String>, type_id: NodeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            kind: DataTypeKind::Enumeration,
            members: Vec::new(),
        }
    }

    /// Add a scalar member of type `ty`.
    pub fn member(self, name: impl Into<String>, ty: &DataType) -> Self {
        self.push(name, ty, false)
    }

    /// Add an array member with elements of type `ty`.
    pub fn array_member(self, name: impl Into<String>, ty: &DataType) -> Self {
        self.push(name, ty, true)
    }

    fn push(mut self, name: impl Into<String>, ty: &DataType, is_array: bool) -> Self {
        if matches!(self.kind, DataTypeKind::Enumeration) {
            log::debug!("[registry] enumeration {} ignores member", self.name);
            return self;
        }
        self.members.push(PendingMember {
            name: name.into(),
            type_index: ty.type_index,
            type_id: ty.type_id.clone(),
            namespace_zero: ty.namespace_zero,
            is_array,
            mem_size: ty.mem_size,
            alignment: usize::from(ty.alignment.max(1)),
            fixed_size: ty.fixed_size,
            zero_copyable: ty.zero_copyable,
        });
        self
    }

    /// Finish the descriptor. `type_index` and `namespace_zero` are
    /// assigned when it is added to a registry.
    pub fn build(self) -> DataType {
        if matches!(self.kind, DataTypeKind::Enumeration) {
            return DataType {
                type_name: self.name,
                type_id: self.type_id,
                mem_size: 4,
                alignment: 4,
                type_index: 0,
                namespace_zero: false,
                kind: DataTypeKind::Enumeration,
                fixed_size: true,
                zero_copyable: true,
                members: Vec::new(),
            };
        }

        let mut offset = 0usize;
        let mut max_align = 1usize;
        let mut fixed_size = true;
        let mut zero_copyable = true;
        let mut members = Vec::with_capacity(self.members.len());

        for m in self.members {
            let (size, align) = if m.is_array {
                (ARRAY_MEMBER_SIZE, ARRAY_MEMBER_ALIGN)
            } else {
                (m.mem_size, m.alignment)
            };
            let padding = (align - offset % align) % align;
            offset += padding + size;
            max_align = max_align.max(align);

            fixed_size &= !m.is_array && m.fixed_size;
            zero_copyable &= padding == 0 && !m.is_array && m.zero_copyable;

            members.push(DataTypeMember {
                member_name: m.name,
                member_type_index: m.type_index,
                member_type_id: m.type_id,
                padding: padding as u8,
                namespace_zero: m.namespace_zero,
                is_array: m.is_array,
            });
        }

        // Tail padding up to the structure alignment
        let mem_size = offset.div_ceil(max_align).max(1) * max_align;
        zero_copyable &= fixed_size && mem_size == offset;

        DataType {
            type_name: self.name,
            type_id: self.type_id,
            mem_size,
            alignment: max_align as u8,
            type_index: 0,
            namespace_zero: false,
            kind: DataTypeKind::Structure,
            fixed_size,
            zero_copyable,
            members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::BuiltinKind;

    fn b(kind: BuiltinKind) -> DataType {
        DataType::builtin(kind)
    }

    #[test]
    fn test_packed_structure_is_zero_copyable() {
        let t = DataTypeBuilder::structure("Pair", NodeId::numeric(1, 1))
            .member("a", &b(BuiltinKind::Int32))
            .member("b", &b(BuiltinKind::UInt32))
            .build();
        assert_eq!(t.mem_size, 8);
        assert!(t.fixed_size);
        assert!(t.zero_copyable);
        assert!(t.members.iter().all(|m| m.padding == 0));
    }

    #[test]
    fn test_tail_padding() {
        let t = DataTypeBuilder::structure("Tail", NodeId::numeric(1, 2))
            .member("a", &b(BuiltinKind::Double))
            .member("b", &b(BuiltinKind::Byte))
            .build();
        assert_eq!(t.mem_size, 16);
        assert!(t.fixed_size);
        assert!(!t.zero_copyable);
    }

    #[test]
    fn test_array_member_layout() {
        let t = DataTypeBuilder::structure("Samples", NodeId::numeric(1, 3))
            .member("count", &b(BuiltinKind::Byte))
            .array_member("values", &b(BuiltinKind::Double))
            .member("name", &b(BuiltinKind::String))
            .build();
        assert_eq!(t.members[1].padding, 7);
        assert!(t.members[1].is_array);
        assert_eq!(t.members[2].padding, 0);
        assert_eq!(t.mem_size, 40);
        assert!(!t.fixed_size);
        assert!(!t.zero_copyable);
        assert_eq!(t.members[2].member_type_index, BuiltinKind::String.index());
        assert!(t.members[2].namespace_zero);
    }

    #[test]
    fn test_enumeration() {
        let e = DataTypeBuilder::enumeration("NodeClass", NodeId::numeric(0, 257))
            .member("ignored", &b(BuiltinKind::String))
            .build();
        assert_eq!(e.kind, DataTypeKind::Enumeration);
        assert_eq!(e.mem_size, 4);
        assert!(e.members.is_empty());
        assert!(e.is_builtin());
    }

    #[test]
    fn test_empty_structure() {
        let t = DataTypeBuilder::structure("Empty", NodeId::numeric(1, 4)).build();
        assert_eq!(t.mem_size, 1);
        assert!(t.fixed_size);
    }
}
