// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! NodeId and ExpandedNodeId.
//!
//! The identifier is a tagged union: the kind is carried by the enum
//! discriminant, so an untagged or ambiguous NodeId cannot be constructed.

use super::guid::Guid;
use super::string::{ByteString, UaString};
use crate::engine::Engine;
use crate::error::Result;
use std::fmt;

/// Wire tag of the active identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IdentifierType {
    Numeric = 0,
    String = 3,
    Guid = 4,
    ByteString = 5,
}

/// Active identifier of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Numeric(u32),
    String(UaString),
    Guid(Guid),
    ByteString(ByteString),
}

impl Identifier {
    pub fn identifier_type(&self) -> IdentifierType {
        match self {
            Self::Numeric(_) => IdentifierType::Numeric,
            Self::String(_) => IdentifierType::String,
            Self::Guid(_) => IdentifierType::Guid,
            Self::ByteString(_) => IdentifierType::ByteString,
        }
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::Numeric(0)
    }
}

/// Protocol-wide address of an entity.
///
/// Equality compares the namespace index, the identifier kind and the
/// active identifier's value. `ns=0;i=0` is the null NodeId.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub namespace_index: u16,
    pub identifier: Identifier,
}

impl NodeId {
    /// Canonical null NodeId.
    pub const NULL: NodeId = NodeId {
        namespace_index: 0,
        identifier: Identifier::Numeric(0),
    };

    pub const fn numeric(namespace_index: u16, id: u32) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Numeric(id),
        }
    }

    /// String identifier taking ownership of `id`.
    pub fn string(namespace_index: u16, id: impl Into<UaString>) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::String(id.into()),
        }
    }

    /// String identifier copied from `chars`.
    pub fn string_alloc(namespace_index: u16, chars: &str) -> Self {
        Self::string(namespace_index, UaString::from_chars(chars))
    }

    pub const fn guid(namespace_index: u16, id: Guid) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::Guid(id),
        }
    }

    pub fn byte_string(namespace_index: u16, id: impl Into<ByteString>) -> Self {
        Self {
            namespace_index,
            identifier: Identifier::ByteString(id.into()),
        }
    }

    /// True only for `ns=0;i=0`.
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    pub fn identifier_type(&self) -> IdentifierType {
        self.identifier.identifier_type()
    }

    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Self> {
        let identifier = match &self.identifier {
            Identifier::String(s) => Identifier::String(s.deep_copy(engine)?),
            Identifier::ByteString(b) => Identifier::ByteString(b.deep_copy(engine)?),
            other => other.clone(),
        };
        Ok(Self {
            namespace_index: self.namespace_index,
            identifier,
        })
    }

    /// Release the identifier buffer; the NodeId becomes null.
    pub(crate) fn release(&mut self, engine: &Engine) {
        match &mut self.identifier {
            Identifier::String(s) | Identifier::ByteString(s) => s.release(engine),
            Identifier::Numeric(_) | Identifier::Guid(_) => {}
        }
        *self = Self::NULL;
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index != 0 {
            write!(f, "ns={};", self.namespace_index)?;
        }
        match &self.identifier {
            Identifier::Numeric(n) => write!(f, "i={}", n),
            Identifier::String(s) => write!(f, "s={}", s),
            Identifier::Guid(g) => write!(f, "g={}", g),
            Identifier::ByteString(b) => {
                write!(f, "b=")?;
                for byte in b.as_bytes() {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

/// NodeId qualified with a namespace URI and a server index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    pub namespace_uri: UaString,
    pub server_index: u32,
}

impl ExpandedNodeId {
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            ..Self::default()
        }
    }

    pub fn numeric(namespace_index: u16, id: u32) -> Self {
        Self::new(NodeId::numeric(namespace_index, id))
    }

    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Self> {
        let mut node_id = self.node_id.deep_copy(engine)?;
        let namespace_uri = match self.namespace_uri.deep_copy(engine) {
            Ok(uri) => uri,
            Err(e) => {
                node_id.release(engine);
                return Err(e);
            }
        };
        Ok(Self {
            node_id,
            namespace_uri,
            server_index: self.server_index,
        })
    }

    pub(crate) fn release(&mut self, engine: &Engine) {
        self.node_id.release(engine);
        self.namespace_uri.release(engine);
        self.server_index = 0;
    }
}
