// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! ExtensionObject: container for an application-defined value.
//!
//! The encoding discriminant selects both the content and the lifecycle:
//! encoded bodies own plain buffers, a decoded body is owned and deleted
//! through the engine with its runtime descriptor, and a decoded-no-delete
//! body is borrowed and never released by the container.

use super::node_id::NodeId;
use super::string::{ByteString, XmlElement};
use crate::data_type::DataType;
use crate::engine::Engine;
use crate::error::Result;
use crate::value::{Shared, Value};
use std::sync::Arc;

/// Wire-level encoding tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExtensionObjectEncoding {
    EncodedNoBody = 0,
    EncodedByteString = 1,
    EncodedXml = 2,
    Decoded = 3,
    DecodedNoDelete = 4,
}

#[derive(Debug, Clone)]
pub enum ExtensionObject {
    /// Type identity without a body.
    EncodedNoBody { type_id: NodeId },
    /// Opaque binary body.
    EncodedByteString { type_id: NodeId, body: ByteString },
    /// Opaque XML body.
    EncodedXml { type_id: NodeId, body: XmlElement },
    /// Decoded body owned by the container.
    Decoded {
        data_type: Arc<DataType>,
        data: Box<Value>,
    },
    /// Decoded body with an external owner.
    DecodedNoDelete {
        data_type: Arc<DataType>,
        data: Shared<Value>,
    },
}

impl Default for ExtensionObject {
    fn default() -> Self {
        Self::EncodedNoBody {
            type_id: NodeId::NULL,
        }
    }
}

impl ExtensionObject {
    pub fn encoding(&self) -> ExtensionObjectEncoding {
        match self {
            Self::EncodedNoBody { .. } => ExtensionObjectEncoding::EncodedNoBody,
            Self::EncodedByteString { .. } => ExtensionObjectEncoding::EncodedByteString,
            Self::EncodedXml { .. } => ExtensionObjectEncoding::EncodedXml,
            Self::Decoded { .. } => ExtensionObjectEncoding::Decoded,
            Self::DecodedNoDelete { .. } => ExtensionObjectEncoding::DecodedNoDelete,
        }
    }

    /// Take ownership of a decoded value (normally from
    /// [`Engine::new_value`]).
    pub fn decoded(data_type: Arc<DataType>, data: Box<Value>) -> Self {
        Self::Decoded { data_type, data }
    }

    /// Borrow a decoded value; the container never releases it.
    pub fn decoded_no_delete(data_type: Arc<DataType>, data: Shared<Value>) -> Self {
        Self::DecodedNoDelete { data_type, data }
    }

    /// Identity of the body type.
    pub fn type_id(&self) -> &NodeId {
        match self {
            Self::EncodedNoBody { type_id }
            | Self::EncodedByteString { type_id, .. }
            | Self::EncodedXml { type_id, .. } => type_id,
            Self::Decoded { data_type, .. } | Self::DecodedNoDelete { data_type, .. } => {
                &data_type.type_id
            }
        }
    }

    /// Deep copy. Decoded bodies, borrowed or not, become owned copies.
    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Self> {
        match self {
            Self::EncodedNoBody { type_id } => Ok(Self::EncodedNoBody {
                type_id: type_id.deep_copy(engine)?,
            }),
            Self::EncodedByteString { type_id, body } => {
                let (type_id, body) = copy_encoded(engine, type_id, body)?;
                Ok(Self::EncodedByteString { type_id, body })
            }
            Self::EncodedXml { type_id, body } => {
                let (type_id, body) = copy_encoded(engine, type_id, body)?;
                Ok(Self::EncodedXml { type_id, body })
            }
            Self::Decoded { data_type, data } => Ok(Self::Decoded {
                data_type: Arc::clone(data_type),
                data: engine.duplicate(data, data_type)?,
            }),
            Self::DecodedNoDelete { data_type, data } => {
                let copy = engine.duplicate(&data.read(), data_type)?;
                Ok(Self::Decoded {
                    data_type: Arc::clone(data_type),
                    data: copy,
                })
            }
        }
    }

    /// Release owned content. The container becomes an empty
    /// `EncodedNoBody`; a borrowed body is left untouched.
    pub(crate) fn release(&mut self, engine: &Engine) {
        match std::mem::take(self) {
            Self::EncodedNoBody { mut type_id } => type_id.release(engine),
            Self::EncodedByteString {
                mut type_id,
                mut body,
            }
            | Self::EncodedXml {
                mut type_id,
                mut body,
            } => {
                type_id.release(engine);
                body.release(engine);
            }
            Self::Decoded { data_type, data } => engine.delete(data, &data_type),
            Self::DecodedNoDelete { .. } => {
                log::trace!("[engine] extension object body is borrowed, not released");
            }
        }
    }
}

fn copy_encoded(
    engine: &Engine,
    type_id: &NodeId,
    body: &ByteString,
) -> Result<(NodeId, ByteString)> {
    let mut type_id = type_id.deep_copy(engine)?;
    match body.deep_copy(engine) {
        Ok(body) => Ok((type_id, body)),
        Err(e) => {
            type_id.release(engine);
            Err(e)
        }
    }
}

impl PartialEq for ExtensionObject {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EncodedNoBody { type_id: a }, Self::EncodedNoBody { type_id: b }) => a == b,
            (
                Self::EncodedByteString {
                    type_id: a,
                    body: ab,
                },
                Self::EncodedByteString {
                    type_id: b,
                    body: bb,
                },
            )
            | (
                Self::EncodedXml {
                    type_id: a,
                    body: ab,
                },
                Self::EncodedXml {
                    type_id: b,
                    body: bb,
                },
            ) => a == b && ab == bb,
            (
                Self::Decoded {
                    data_type: at,
                    data: a,
                },
                Self::Decoded {
                    data_type: bt,
                    data: b,
                },
            ) => at.type_id == bt.type_id && a == b,
            (
                Self::DecodedNoDelete {
                    data_type: at,
                    data: a,
                },
                Self::DecodedNoDelete {
                    data_type: bt,
                    data: b,
                },
            ) => at.type_id == bt.type_id && (Arc::ptr_eq(a, b) || *a.read() == *b.read()),
            _ => false,
        }
    }
}
