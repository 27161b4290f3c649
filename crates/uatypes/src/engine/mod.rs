// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic lifecycle engine.
//!
//! Allocate, default-initialize, deep-copy and deep-destroy a value of any
//! described type, driven only by its [`DataType`] and the descriptor tables
//! of the [`DataTypeRegistry`] the engine was built with.
//!
//! # Operations
//!
//! - **new / delete**: accounted shell (`mem_size` bytes) plus content
//! - **init**: reset to the zero value; always succeeds
//! - **copy**: deep copy, all-or-nothing (a failed copy leaves the
//!   destination zero-initialized and releases everything it allocated)
//! - **delete_members**: release owned content, leave a safe zero value
//!
//! Array operations live in `array.rs`, builtin dispatch in `builtin.rs`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use uatypes::{BuiltinKind, DataTypeBuilder, DataTypeRegistry, Engine, NodeId, Value};
//! use uatypes::memory::TrackingAllocator;
//!
//! let mut reg = DataTypeRegistry::builder();
//! let string = reg.builtin(BuiltinKind::String);
//! let tag = reg
//!     .add_custom(
//!         DataTypeBuilder::structure("Tag", NodeId::numeric(1, 100))
//!             .member("name", &string)
//!             .array_member("aliases", &string)
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let alloc = Arc::new(TrackingAllocator::new());
//! let engine = Engine::with_allocator(Arc::new(reg.build()), alloc.clone());
//!
//! let original = engine.new_value(&tag).unwrap();
//! let copy = engine.duplicate(&original, &tag).unwrap();
//! assert_eq!(*copy, *original);
//!
//! engine.delete(copy, &tag);
//! engine.delete(original, &tag);
//! assert_eq!(alloc.stats().live_bytes(), 0);
//! ```

mod array;
mod builtin;

use crate::config::EngineConfig;
use crate::data_type::{DataType, DataTypeKind, DataTypeMember};
use crate::error::{Error, Result};
use crate::memory::{Allocator, SystemAllocator};
use crate::registry::DataTypeRegistry;
use crate::value::{ArrayValue, MemberValue, Structure, Value};
use std::sync::Arc;

/// Lifecycle and array engine bound to a registry and an allocator.
///
/// Stateless apart from its injected collaborators; cheap to clone and safe
/// to use from several threads on disjoint values.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<DataTypeRegistry>,
    allocator: Arc<dyn Allocator>,
    config: EngineConfig,
}

impl Engine {
    /// Engine without allocation bookkeeping.
    pub fn new(registry: Arc<DataTypeRegistry>) -> Self {
        Self::with_allocator(registry, Arc::new(SystemAllocator))
    }

    pub fn with_allocator(registry: Arc<DataTypeRegistry>, allocator: Arc<dyn Allocator>) -> Self {
        Self {
            registry,
            allocator,
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &Arc<DataTypeRegistry> {
        &self.registry
    }

    pub fn allocator(&self) -> &Arc<dyn Allocator> {
        &self.allocator
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ===================================================================
    // Bookkeeping
    // ===================================================================

    /// Announce an allocation of `bytes` (zero-byte requests are skipped).
    pub(crate) fn reserve(&self, bytes: usize) -> Result<()> {
        if bytes == 0 {
            return Ok(());
        }
        self.allocator.allocate(bytes)
    }

    /// Report a release of `bytes` (zero-byte releases are skipped).
    pub(crate) fn release(&self, bytes: usize) {
        if bytes != 0 {
            self.allocator.release(bytes);
        }
    }

    // ===================================================================
    // Lifecycle
    // ===================================================================

    /// Allocate a zero-initialized value of type `ty`.
    pub fn new_value(&self, ty: &DataType) -> Result<Box<Value>> {
        self.reserve(ty.mem_size)?;
        Ok(Box::new(self.default_value(ty)))
    }

    /// Reset `value` to the zero value of `ty`. Prior content is not
    /// released.
    pub fn init(&self, value: &mut Value, ty: &DataType) {
        *value = self.default_value(ty);
    }

    /// Zero value of `ty`: numerics 0, strings null, arrays absent,
    /// structures member-wise.
    pub fn default_value(&self, ty: &DataType) -> Value {
        match ty.kind {
            DataTypeKind::Builtin(kind) => Value::zero(kind),
            DataTypeKind::Enumeration => Value::Int32(0),
            DataTypeKind::Structure => {
                let members = ty
                    .members
                    .iter()
                    .map(|m| self.default_member(m))
                    .collect();
                Value::Structure(Structure { members })
            }
        }
    }

    fn default_member(&self, member: &DataTypeMember) -> MemberValue {
        if member.is_array {
            return MemberValue::Array(ArrayValue::Absent);
        }
        match self.registry.resolve_member(member) {
            Ok(mty) => MemberValue::Scalar(self.default_value(mty)),
            Err(e) => {
                log::debug!("[engine] init: {}", e);
                MemberValue::Scalar(Value::Structure(Structure::default()))
            }
        }
    }

    /// Deep-copy `src` into `dst`.
    ///
    /// All-or-nothing: on failure everything allocated for the copy is
    /// released and `dst` holds the zero value of `ty`. Prior content of
    /// `dst` is overwritten without being released.
    pub fn copy(&self, src: &Value, dst: &mut Value, ty: &DataType) -> Result<()> {
        match self.copy_value(src, ty) {
            Ok(copy) => {
                *dst = copy;
                Ok(())
            }
            Err(e) => {
                *dst = self.default_value(ty);
                Err(e)
            }
        }
    }

    /// Deep copy of `src` (content only, no shell accounting).
    pub fn copy_value(&self, src: &Value, ty: &DataType) -> Result<Value> {
        match ty.kind {
            DataTypeKind::Builtin(kind) => self.copy_builtin(src, kind),
            DataTypeKind::Enumeration => match src {
                Value::Int32(v) => Ok(Value::Int32(*v)),
                other => Err(mismatch(&ty.type_name, other)),
            },
            DataTypeKind::Structure => {
                let Value::Structure(s) = src else {
                    return Err(mismatch(&ty.type_name, src));
                };
                if s.members.len() != ty.members.len() {
                    return Err(Error::TypeMismatch(format!(
                        "{} has {} members, value has {}",
                        ty.type_name,
                        ty.members.len(),
                        s.members.len()
                    )));
                }
                if ty.fixed_size {
                    return Ok(src.clone());
                }
                self.copy_structure(s, ty).map(Value::Structure)
            }
        }
    }

    fn copy_structure(&self, src: &Structure, ty: &DataType) -> Result<Structure> {
        let mut copied = Vec::with_capacity(src.members.len());
        for (index, (member, value)) in ty.members.iter().zip(&src.members).enumerate() {
            match self.copy_member(member, value) {
                Ok(m) => copied.push(m),
                Err(e) => {
                    log::debug!(
                        "[engine] copy of {} failed at member {} ({}), rolling back {} member(s)",
                        ty.type_name,
                        member.member_name,
                        e,
                        index
                    );
                    self.delete_member_values(&ty.members[..index], &mut copied);
                    return Err(e);
                }
            }
        }
        Ok(Structure { members: copied })
    }

    fn copy_member(&self, member: &DataTypeMember, value: &MemberValue) -> Result<MemberValue> {
        let mty = self.registry.resolve_member(member)?;
        match (member.is_array, value) {
            (false, MemberValue::Scalar(v)) => self.copy_value(v, mty).map(MemberValue::Scalar),
            (true, MemberValue::Array(a)) => {
                let copy = match a {
                    ArrayValue::Absent => ArrayValue::Absent,
                    ArrayValue::Empty => ArrayValue::Empty,
                    ArrayValue::Present(items) if items.is_empty() => ArrayValue::Empty,
                    ArrayValue::Present(items) => ArrayValue::from_vec(self.array_copy(items, mty)?),
                };
                Ok(MemberValue::Array(copy))
            }
            _ => Err(Error::TypeMismatch(format!(
                "member {}: array flag {} does not match value",
                member.member_name, member.is_array
            ))),
        }
    }

    /// Allocate a shell and deep-copy `src` into it.
    pub fn duplicate(&self, src: &Value, ty: &DataType) -> Result<Box<Value>> {
        self.reserve(ty.mem_size)?;
        match self.copy_value(src, ty) {
            Ok(v) => Ok(Box::new(v)),
            Err(e) => {
                self.release(ty.mem_size);
                Err(e)
            }
        }
    }

    /// Release the content owned by `value`.
    ///
    /// No-op for fixed-size types. Afterwards strings are null, arrays
    /// absent and containers empty, so deleting again is harmless.
    pub fn delete_members(&self, value: &mut Value, ty: &DataType) {
        if ty.fixed_size {
            return;
        }
        match ty.kind {
            DataTypeKind::Builtin(_) => self.delete_builtin(value),
            DataTypeKind::Enumeration => {}
            DataTypeKind::Structure => match value {
                Value::Structure(s) => self.delete_member_values(&ty.members, &mut s.members),
                other => {
                    log::debug!("[engine] delete_members: {}", mismatch(&ty.type_name, other));
                }
            },
        }
    }

    /// `delete_members` on the value, then release its shell.
    pub fn delete(&self, mut value: Box<Value>, ty: &DataType) {
        self.delete_members(&mut value, ty);
        self.release(ty.mem_size);
    }

    /// Delete an inline value that is accounted as its own shell.
    pub(crate) fn delete_inline(&self, value: &mut Value, ty: &DataType) {
        self.delete_members(value, ty);
        self.release(ty.mem_size);
    }

    fn delete_member_values(&self, members: &[DataTypeMember], values: &mut [MemberValue]) {
        for (member, value) in members.iter().zip(values.iter_mut()) {
            let mty = match self.registry.resolve_member(member) {
                Ok(mty) => mty,
                Err(e) => {
                    log::debug!("[engine] delete_members: {}", e);
                    continue;
                }
            };
            match value {
                MemberValue::Scalar(v) => self.delete_members(v, mty),
                MemberValue::Array(a) => {
                    if let ArrayValue::Present(items) = std::mem::take(a) {
                        self.array_delete(items, mty);
                    }
                }
            }
        }
    }
}

fn mismatch(type_name: &str, value: &Value) -> Error {
    Error::TypeMismatch(format!(
        "{} value does not match descriptor {}",
        value.builtin_kind().map_or("Structure", |k| k.name()),
        type_name
    ))
}
