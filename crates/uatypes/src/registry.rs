// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor tables.
//!
//! Two tables, frozen at startup and read-only afterwards:
//!
//! - **base namespace**: the 25 builtins at indices `0..25`, followed by
//!   standard structures added with [`RegistryBuilder::add_base`]
//! - **custom namespace**: application types added with
//!   [`RegistryBuilder::add_custom`], indexed from 0
//!
//! A member's `namespace_zero` flag selects the table its
//! `member_type_index` is resolved against.

use crate::config::BUILTIN_TYPES_COUNT;
use crate::data_type::{BuiltinKind, DataType, DataTypeMember};
use crate::error::{Error, Result};
use crate::types::NodeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable `type_index -> DataType` tables.
#[derive(Debug, Clone)]
pub struct DataTypeRegistry {
    base: Vec<Arc<DataType>>,
    custom: Vec<Arc<DataType>>,
    by_id: HashMap<NodeId, (bool, u16)>,
}

impl DataTypeRegistry {
    /// Registry holding only the builtin table.
    pub fn builtin() -> Self {
        Self::builder().build()
    }

    /// Start from the builtin table and add more types.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Look up `index` in the base (`namespace_zero`) or custom table.
    pub fn get(&self, namespace_zero: bool, index: u16) -> Option<&Arc<DataType>> {
        let table = if namespace_zero { &self.base } else { &self.custom };
        table.get(usize::from(index))
    }

    pub fn builtin_type(&self, kind: BuiltinKind) -> &Arc<DataType> {
        // The builtin prefix is filled in by RegistryBuilder::new
        &self.base[usize::from(kind.index())]
    }

    pub fn by_type_id(&self, type_id: &NodeId) -> Option<&Arc<DataType>> {
        let (namespace_zero, index) = *self.by_id.get(type_id)?;
        self.get(namespace_zero, index)
    }

    /// Descriptor of a member's element type.
    pub fn resolve_member(&self, member: &DataTypeMember) -> Result<&Arc<DataType>> {
        self.get(member.namespace_zero, member.member_type_index)
            .ok_or_else(|| {
                Error::TypeMismatch(format!(
                    "member {} refers to unknown type index {} (namespace zero: {})",
                    member.member_name, member.member_type_index, member.namespace_zero
                ))
            })
    }

    /// Number of base-namespace types (builtins included).
    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }
}

impl Default for DataTypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Accumulates descriptors, assigning table indices.
#[derive(Debug)]
pub struct RegistryBuilder {
    base: Vec<Arc<DataType>>,
    custom: Vec<Arc<DataType>>,
    by_id: HashMap<NodeId, (bool, u16)>,
}

impl RegistryBuilder {
    fn new() -> Self {
        let mut base = Vec::with_capacity(BUILTIN_TYPES_COUNT);
        let mut by_id = HashMap::with_capacity(BUILTIN_TYPES_COUNT);
        for kind in BuiltinKind::ALL {
            let ty = DataType::builtin(kind);
            by_id.insert(ty.type_id.clone(), (true, kind.index()));
            base.push(Arc::new(ty));
        }
        Self {
            base,
            custom: Vec::new(),
            by_id,
        }
    }

    /// Builtin descriptor, for use as a member type.
    pub fn builtin(&self, kind: BuiltinKind) -> Arc<DataType> {
        Arc::clone(&self.base[usize::from(kind.index())])
    }

    /// Add a base-namespace type. All of its members must be base-namespace
    /// types.
    pub fn add_base(&mut self, ty: DataType) -> Result<Arc<DataType>> {
        if let Some(m) = ty.members.iter().find(|m| !m.namespace_zero) {
            return Err(Error::TypeMismatch(format!(
                "base type {} has custom-namespace member {}",
                ty.type_name, m.member_name
            )));
        }
        self.insert(true, ty)
    }

    /// Add a custom-namespace type.
    pub fn add_custom(&mut self, ty: DataType) -> Result<Arc<DataType>> {
        self.insert(false, ty)
    }

    fn insert(&mut self, namespace_zero: bool, mut ty: DataType) -> Result<Arc<DataType>> {
        if self.by_id.contains_key(&ty.type_id) {
            return Err(Error::TypeMismatch(format!(
                "type id {} registered twice",
                ty.type_id
            )));
        }
        for m in &ty.members {
            let table = if m.namespace_zero { &self.base } else { &self.custom };
            match table.get(usize::from(m.member_type_index)) {
                Some(resolved) if resolved.type_id == m.member_type_id => {}
                Some(resolved) => {
                    log::debug!(
                        "[registry] member {} of {} expects {} but index {} holds {}",
                        m.member_name,
                        ty.type_name,
                        m.member_type_id,
                        m.member_type_index,
                        resolved.type_id
                    );
                    return Err(Error::TypeMismatch(format!(
                        "member {} of {} refers to unregistered type {}",
                        m.member_name, ty.type_name, m.member_type_id
                    )));
                }
                None => {
                    return Err(Error::TypeMismatch(format!(
                        "member {} of {} refers to unregistered type index {}",
                        m.member_name, ty.type_name, m.member_type_index
                    )));
                }
            }
        }

        let table = if namespace_zero {
            &mut self.base
        } else {
            &mut self.custom
        };
        let index = u16::try_from(table.len()).map_err(|_| {
            Error::TypeMismatch(format!("descriptor table full adding {}", ty.type_name))
        })?;
        ty.type_index = index;
        ty.namespace_zero = namespace_zero;

        log::debug!(
            "[registry] {} -> index {} (namespace zero: {})",
            ty.type_name,
            index,
            namespace_zero
        );
        self.by_id.insert(ty.type_id.clone(), (namespace_zero, index));
        let ty = Arc::new(ty);
        table.push(Arc::clone(&ty));
        Ok(ty)
    }

    pub fn build(self) -> DataTypeRegistry {
        DataTypeRegistry {
            base: self.base,
            custom: self.custom,
            by_id: self.by_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DataTypeBuilder;

    #[test]
    fn test_builtin_table() {
        let reg = DataTypeRegistry::builtin();
        assert_eq!(reg.base_len(), BUILTIN_TYPES_COUNT);
        assert_eq!(reg.custom_len(), 0);
        let dv = reg.builtin_type(BuiltinKind::DataValue);
        assert_eq!(dv.type_index, 22);
        assert_eq!(
            reg.by_type_id(&NodeId::numeric(0, 23)).map(|t| t.type_name.as_str()),
            Some("DataValue")
        );
    }

    #[test]
    fn test_add_base_and_custom() {
        let mut b = DataTypeRegistry::builder();
        let string = b.builtin(BuiltinKind::String);
        let argument = b
            .add_base(
                DataTypeBuilder::structure("Argument", NodeId::numeric(0, 296))
                    .member("Name", &string)
                    .build(),
            )
            .expect("add base");
        assert_eq!(argument.type_index, 25);
        assert!(argument.namespace_zero);

        let custom = b
            .add_custom(
                DataTypeBuilder::structure("Wrapper", NodeId::numeric(2, 1))
                    .member("arg", &argument)
                    .build(),
            )
            .expect("add custom");
        assert_eq!(custom.type_index, 0);
        assert!(!custom.namespace_zero);

        let reg = b.build();
        let resolved = reg.resolve_member(&custom.members[0]).expect("resolve");
        assert_eq!(resolved.type_name, "Argument");
    }

    #[test]
    fn test_base_rejects_custom_member() {
        let mut b = DataTypeRegistry::builder();
        let e = b
            .add_custom(DataTypeBuilder::enumeration("Mode", NodeId::numeric(2, 5)).build())
            .expect("add enum");
        let err = b.add_base(
            DataTypeBuilder::structure("Bad", NodeId::numeric(0, 9000))
                .member("mode", &e)
                .build(),
        );
        assert!(matches!(err, Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn test_duplicate_type_id() {
        let mut b = DataTypeRegistry::builder();
        let err = b.add_custom(DataTypeBuilder::enumeration("Dup", NodeId::numeric(0, 1)).build());
        assert!(matches!(err, Err(Error::TypeMismatch(_))));
    }

    #[test]
    fn test_unresolved_member() {
        let reg = DataTypeRegistry::builtin();
        let member = DataTypeMember {
            member_name: "x".into(),
            member_type_index: 7,
            member_type_id: NodeId::numeric(2, 7),
            padding: 0,
            namespace_zero: false,
            is_array: false,
        };
        assert!(reg.resolve_member(&member).is_err());
    }

    #[test]
    fn test_member_of_unregistered_type_rejected() {
        let mut b = DataTypeRegistry::builder();
        let string = b.builtin(BuiltinKind::String);
        let double = b.builtin(BuiltinKind::Double);
        let inner = DataTypeBuilder::structure("Inner", NodeId::numeric(2, 10))
            .member("s", &string)
            .build();
        b.add_custom(
            DataTypeBuilder::structure("Other", NodeId::numeric(2, 11))
                .member("d", &double)
                .build(),
        )
        .expect("add other");

        // `inner` still carries index 0, which now holds `Other`
        let err = b.add_custom(
            DataTypeBuilder::structure("Outer", NodeId::numeric(2, 12))
                .member("inner", &inner)
                .build(),
        );
        assert!(matches!(err, Err(Error::TypeMismatch(_))));
        assert_eq!(b.build().custom_len(), 1);
    }
}
