// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value model: one tagged variant per builtin kind plus generic structures.

use crate::data_type::BuiltinKind;
use crate::types::{
    ByteString, DataValue, DateTime, DiagnosticInfo, ExpandedNodeId, ExtensionObject, Guid,
    LocalizedText, NodeId, QualifiedName, StatusCode, UaString, XmlElement,
};
use crate::variant::Variant;
use parking_lot::RwLock;
use std::sync::Arc;

/// Storage shared with an external owner (borrowed content).
pub type Shared<T> = Arc<RwLock<T>>;

/// Wrap `value` for use as borrowed content.
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

/// A value of any described type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Fixed-size builtins
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    DateTime(DateTime),
    Guid(Guid),
    StatusCode(StatusCode),

    // Builtins owning heap content
    String(UaString),
    ByteString(ByteString),
    XmlElement(XmlElement),
    NodeId(NodeId),
    ExpandedNodeId(ExpandedNodeId),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),
    ExtensionObject(ExtensionObject),
    DataValue(Box<DataValue>),
    Variant(Box<Variant>),
    DiagnosticInfo(DiagnosticInfo),

    // Generic
    Structure(Structure),
}

impl Value {
    /// Zero value of a builtin kind.
    pub fn zero(kind: BuiltinKind) -> Self {
        match kind {
            BuiltinKind::Boolean => Self::Boolean(false),
            BuiltinKind::SByte => Self::SByte(0),
            BuiltinKind::Byte => Self::Byte(0),
            BuiltinKind::Int16 => Self::Int16(0),
            BuiltinKind::UInt16 => Self::UInt16(0),
            BuiltinKind::Int32 => Self::Int32(0),
            BuiltinKind::UInt32 => Self::UInt32(0),
            BuiltinKind::Int64 => Self::Int64(0),
            BuiltinKind::UInt64 => Self::UInt64(0),
            BuiltinKind::Float => Self::Float(0.0),
            BuiltinKind::Double => Self::Double(0.0),
            BuiltinKind::String => Self::String(UaString::null()),
            BuiltinKind::DateTime => Self::DateTime(DateTime::default()),
            BuiltinKind::Guid => Self::Guid(Guid::NULL),
            BuiltinKind::ByteString => Self::ByteString(ByteString::null()),
            BuiltinKind::XmlElement => Self::XmlElement(XmlElement::null()),
            BuiltinKind::NodeId => Self::NodeId(NodeId::NULL),
            BuiltinKind::ExpandedNodeId => Self::ExpandedNodeId(ExpandedNodeId::default()),
            BuiltinKind::StatusCode => Self::StatusCode(StatusCode::GOOD),
            BuiltinKind::QualifiedName => Self::QualifiedName(QualifiedName::default()),
            BuiltinKind::LocalizedText => Self::LocalizedText(LocalizedText::default()),
            BuiltinKind::ExtensionObject => Self::ExtensionObject(ExtensionObject::default()),
            BuiltinKind::DataValue => Self::DataValue(Box::default()),
            BuiltinKind::Variant => Self::Variant(Box::default()),
            BuiltinKind::DiagnosticInfo => Self::DiagnosticInfo(DiagnosticInfo::default()),
        }
    }

    /// Builtin kind of this value (`None` for structures).
    pub fn builtin_kind(&self) -> Option<BuiltinKind> {
        let kind = match self {
            Self::Boolean(_) => BuiltinKind::Boolean,
            Self::SByte(_) => BuiltinKind::SByte,
            Self::Byte(_) => BuiltinKind::Byte,
            Self::Int16(_) => BuiltinKind::Int16,
            Self::UInt16(_) => BuiltinKind::UInt16,
            Self::Int32(_) => BuiltinKind::Int32,
            Self::UInt32(_) => BuiltinKind::UInt32,
            Self::Int64(_) => BuiltinKind::Int64,
            Self::UInt64(_) => BuiltinKind::UInt64,
            Self::Float(_) => BuiltinKind::Float,
            Self::Double(_) => BuiltinKind::Double,
            Self::DateTime(_) => BuiltinKind::DateTime,
            Self::Guid(_) => BuiltinKind::Guid,
            Self::StatusCode(_) => BuiltinKind::StatusCode,
            Self::String(_) => BuiltinKind::String,
            Self::ByteString(_) => BuiltinKind::ByteString,
            Self::XmlElement(_) => BuiltinKind::XmlElement,
            Self::NodeId(_) => BuiltinKind::NodeId,
            Self::ExpandedNodeId(_) => BuiltinKind::ExpandedNodeId,
            Self::QualifiedName(_) => BuiltinKind::QualifiedName,
            Self::LocalizedText(_) => BuiltinKind::LocalizedText,
            Self::ExtensionObject(_) => BuiltinKind::ExtensionObject,
            Self::DataValue(_) => BuiltinKind::DataValue,
            Self::Variant(_) => BuiltinKind::Variant,
            Self::DiagnosticInfo(_) => BuiltinKind::DiagnosticInfo,
            Self::Structure(_) => return None,
        };
        Some(kind)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&UaString> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_structure_mut(&mut self) -> Option<&mut Structure> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_variant(&self) -> Option<&Variant> {
        match self {
            Self::Variant(v) => Some(&**v),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    i8 => SByte,
    u8 => Byte,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    DateTime => DateTime,
    Guid => Guid,
    StatusCode => StatusCode,
    UaString => String,
    NodeId => NodeId,
    ExpandedNodeId => ExpandedNodeId,
    QualifiedName => QualifiedName,
    LocalizedText => LocalizedText,
    ExtensionObject => ExtensionObject,
    DiagnosticInfo => DiagnosticInfo,
    Structure => Structure,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(UaString::from_chars(s))
    }
}

impl From<Variant> for Value {
    fn from(v: Variant) -> Self {
        Self::Variant(Box::new(v))
    }
}

impl From<DataValue> for Value {
    fn from(v: DataValue) -> Self {
        Self::DataValue(Box::new(v))
    }
}

/// Members of a generic structure, in descriptor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub members: Vec<MemberValue>,
}

impl Structure {
    pub fn new(members: Vec<MemberValue>) -> Self {
        Self { members }
    }

    pub fn member(&self, index: usize) -> Option<&MemberValue> {
        self.members.get(index)
    }

    pub fn member_mut(&mut self, index: usize) -> Option<&mut MemberValue> {
        self.members.get_mut(index)
    }

    /// Scalar member at `index`.
    pub fn scalar(&self, index: usize) -> Option<&Value> {
        match self.members.get(index)? {
            MemberValue::Scalar(v) => Some(v),
            MemberValue::Array(_) => None,
        }
    }

    /// Array member at `index`.
    pub fn array(&self, index: usize) -> Option<&ArrayValue> {
        match self.members.get(index)? {
            MemberValue::Array(a) => Some(a),
            MemberValue::Scalar(_) => None,
        }
    }
}

/// One member slot of a structure.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValue {
    Scalar(Value),
    Array(ArrayValue),
}

/// Three-way array state. Absent and empty are distinct.
///
/// Build from a vector with [`ArrayValue::from_vec`]. A hand-built
/// `Present(vec![])` is treated as `Empty`: it compares equal to it and
/// copies to it.
#[derive(Debug, Clone, Default)]
pub enum ArrayValue {
    /// No array (length 0, no storage).
    #[default]
    Absent,
    /// Zero-length array.
    Empty,
    /// Non-empty array.
    Present(Vec<Value>),
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Absent, _) | (_, Self::Absent) => false,
            _ => self.as_slice() == other.as_slice(),
        }
    }
}

impl ArrayValue {
    /// `Empty` for an empty vector, `Present` otherwise.
    pub fn from_vec(values: Vec<Value>) -> Self {
        if values.is_empty() {
            Self::Empty
        } else {
            Self::Present(values)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Present(v) => v.len(),
            Self::Absent | Self::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_slice(&self) -> &[Value] {
        match self {
            Self::Present(v) => v,
            Self::Absent | Self::Empty => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_matches_kind() {
        for kind in BuiltinKind::ALL {
            assert_eq!(Value::zero(kind).builtin_kind(), Some(kind));
        }
        assert_eq!(Value::Structure(Structure::default()).builtin_kind(), None);
    }

    #[test]
    fn test_array_value_states() {
        assert_eq!(ArrayValue::from_vec(Vec::new()), ArrayValue::Empty);
        assert_ne!(ArrayValue::Absent, ArrayValue::Empty);
        let a = ArrayValue::from_vec(vec![Value::from(1i32), Value::from(2i32)]);
        assert_eq!(a.len(), 2);
        assert_eq!(a.as_slice()[1].as_i32(), Some(2));
        assert!(ArrayValue::default().is_absent());
    }

    #[test]
    fn test_present_without_items_is_empty() {
        let hand_built = ArrayValue::Present(Vec::new());
        assert_eq!(hand_built, ArrayValue::Empty);
        assert_ne!(hand_built, ArrayValue::Absent);
        assert!(hand_built.is_empty());
        assert!(!hand_built.is_absent());
    }

    #[test]
    fn test_structure_accessors() {
        let s = Structure::new(vec![
            MemberValue::Scalar(Value::from("x")),
            MemberValue::Array(ArrayValue::Empty),
        ]);
        assert_eq!(s.scalar(0).and_then(Value::as_string).map(UaString::len), Some(1));
        assert!(s.scalar(1).is_none());
        assert_eq!(s.array(1), Some(&ArrayValue::Empty));
    }
}
