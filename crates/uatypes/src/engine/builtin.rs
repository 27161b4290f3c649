// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dedicated copy / delete for the builtin kinds.

use super::Engine;
use crate::data_type::BuiltinKind;
use crate::error::{Error, Result};
use crate::value::Value;

impl Engine {
    pub(super) fn copy_builtin(&self, src: &Value, kind: BuiltinKind) -> Result<Value> {
        if src.builtin_kind() != Some(kind) {
            return Err(Error::TypeMismatch(format!(
                "{} value does not match builtin {}",
                src.builtin_kind().map_or("Structure", |k| k.name()),
                kind.name()
            )));
        }
        if kind.is_fixed_size() {
            return Ok(src.clone());
        }

        let copy = match src {
            Value::String(s) => Value::String(s.deep_copy(self)?),
            Value::ByteString(s) => Value::ByteString(s.deep_copy(self)?),
            Value::XmlElement(s) => Value::XmlElement(s.deep_copy(self)?),
            Value::NodeId(n) => Value::NodeId(n.deep_copy(self)?),
            Value::ExpandedNodeId(n) => Value::ExpandedNodeId(n.deep_copy(self)?),
            Value::QualifiedName(q) => Value::QualifiedName(q.deep_copy(self)?),
            Value::LocalizedText(t) => Value::LocalizedText(t.deep_copy(self)?),
            Value::ExtensionObject(e) => Value::ExtensionObject(e.deep_copy(self)?),
            Value::DataValue(d) => Value::DataValue(Box::new(d.deep_copy(self)?)),
            Value::Variant(v) => Value::Variant(Box::new(v.deep_copy(self)?)),
            Value::DiagnosticInfo(d) => Value::DiagnosticInfo(d.deep_copy(self)?),
            fixed => fixed.clone(),
        };
        Ok(copy)
    }

    pub(super) fn delete_builtin(&self, value: &mut Value) {
        match value {
            Value::String(s) | Value::ByteString(s) | Value::XmlElement(s) => s.release(self),
            Value::NodeId(n) => n.release(self),
            Value::ExpandedNodeId(n) => n.release(self),
            Value::QualifiedName(q) => q.release(self),
            Value::LocalizedText(t) => t.release(self),
            Value::ExtensionObject(e) => e.release(self),
            Value::DataValue(d) => d.release(self),
            Value::Variant(v) => v.release(self),
            Value::DiagnosticInfo(d) => d.release(self),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::data_type::BuiltinKind;
    use crate::error::Error;
    use crate::memory::TrackingAllocator;
    use crate::registry::DataTypeRegistry;
    use crate::types::{Guid, LocalizedText, NodeId, QualifiedName, UaString};
    use crate::value::Value;
    use crate::Engine;
    use std::sync::Arc;

    #[test]
    fn test_builtin_round_trips_balance() {
        let alloc = Arc::new(TrackingAllocator::new());
        let engine = Engine::with_allocator(Arc::new(DataTypeRegistry::builtin()), alloc.clone());
        let values = [
            Value::Guid(Guid::new(1, 2, 3, [9; 8])),
            Value::from("text"),
            Value::ByteString(UaString::from(vec![1_u8, 2, 3])),
            Value::NodeId(NodeId::byte_string(4, vec![7_u8; 12])),
            Value::QualifiedName(QualifiedName::new(1, "Temperature")),
            Value::LocalizedText(LocalizedText::new("de", "Temperatur")),
        ];
        for v in &values {
            let kind = v.builtin_kind().expect("builtin");
            let ty = engine.registry().builtin_type(kind).clone();
            let mut copy = engine.copy_value(v, &ty).expect("copy");
            assert_eq!(&copy, v);
            engine.delete_members(&mut copy, &ty);
            assert_eq!(alloc.stats().live_bytes(), 0, "{}", kind.name());
        }
    }

    #[test]
    fn test_kind_mismatch() {
        let engine = Engine::new(Arc::new(DataTypeRegistry::builtin()));
        let ty = engine.registry().builtin_type(BuiltinKind::String).clone();
        assert!(matches!(
            engine.copy_value(&Value::Int32(1), &ty),
            Err(Error::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_delete_leaves_null_string() {
        let engine = Engine::new(Arc::new(DataTypeRegistry::builtin()));
        let ty = engine.registry().builtin_type(BuiltinKind::String).clone();
        let mut v = Value::from("gone");
        engine.delete_members(&mut v, &ty);
        assert!(v.as_string().is_some_and(UaString::is_null));
    }
}
