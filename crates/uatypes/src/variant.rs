// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant: self-describing container for a scalar or array of any type.
//!
//! # States
//!
//! Exactly one of these holds at any time (see [`VariantState`]):
//!
//! - **Absent**: no type, no value
//! - **EmptyArray**: zero-length array of a known type
//! - **Scalar**: one value
//! - **Array(n)**: `n > 0` elements, optionally shaped by `array_dimensions`
//!
//! # Ownership
//!
//! Content is either owned (released with the variant) or borrowed through
//! a [`Shared`] handle (`DataNoDelete`, never released by the variant).
//! Setters replace the content wholesale and never release what was there;
//! call [`Variant::clear`] first when the old content is owned.

use crate::data_type::DataType;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::memory::vec_with_capacity;
use crate::range::NumericRange;
use crate::value::{Shared, Value};
use std::sync::Arc;

/// Bytes accounted per `array_dimensions` entry.
const DIMENSION_SIZE: usize = std::mem::size_of::<u32>();

/// Owned or borrowed content.
#[derive(Debug, Clone)]
pub enum Storage<T> {
    Owned(T),
    Borrowed(Shared<T>),
}

impl<T> Storage<T> {
    /// Run `f` on the content (read-locked when borrowed).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self {
            Self::Owned(v) => f(v),
            Self::Borrowed(shared) => f(&*shared.read()),
        }
    }

    /// Run `f` on the content (write-locked when borrowed).
    pub fn with_mut<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        match self {
            Self::Owned(v) => f(v),
            Self::Borrowed(shared) => f(&mut *shared.write()),
        }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }
}

impl<T: PartialEq> PartialEq for Storage<T> {
    fn eq(&self, other: &Self) -> bool {
        if let (Self::Borrowed(a), Self::Borrowed(b)) = (self, other) {
            if Arc::ptr_eq(a, b) {
                return true;
            }
        }
        self.with(|a| other.with(|b| a == b))
    }
}

/// Who releases the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// Owned; released with the variant.
    Data,
    /// Borrowed; never released by the variant.
    DataNoDelete,
}

/// The four mutually exclusive variant states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantState {
    Absent,
    EmptyArray,
    Scalar,
    /// Array of the given (non-zero) length.
    Array(usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Content {
    #[default]
    Empty,
    EmptyArray(Arc<DataType>),
    Scalar(Arc<DataType>, Storage<Value>),
    Array(Arc<DataType>, Storage<Vec<Value>>),
}

/// Scalar or array of any described type.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use uatypes::{BuiltinKind, DataTypeRegistry, Engine, NumericRange, Value, Variant};
///
/// let engine = Engine::new(Arc::new(DataTypeRegistry::builtin()));
/// let int32 = engine.registry().builtin_type(BuiltinKind::Int32).clone();
///
/// let items: Vec<Value> = (0..10).map(Value::Int32).collect();
/// let mut v = Variant::new();
/// v.set_array_copy(&engine, &items, int32).unwrap();
///
/// let range: NumericRange = "2:4".parse().unwrap();
/// let slice = v.copy_range(&engine, &range).unwrap();
/// assert_eq!(slice.array_length(), 3);
/// assert_eq!(slice.with_array(|a| a.to_vec()), Some(vec![Value::Int32(2), Value::Int32(3), Value::Int32(4)]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variant {
    content: Content,
    array_dimensions: Option<Vec<u32>>,
}

impl Variant {
    /// Absent variant.
    pub fn new() -> Self {
        Self::default()
    }

    // ===================================================================
    // Inspection
    // ===================================================================

    /// Element type (`None` when absent).
    pub fn data_type(&self) -> Option<&Arc<DataType>> {
        match &self.content {
            Content::Empty => None,
            Content::EmptyArray(ty) | Content::Scalar(ty, _) | Content::Array(ty, _) => Some(ty),
        }
    }

    pub fn storage_type(&self) -> StorageType {
        let borrowed = match &self.content {
            Content::Scalar(_, s) => s.is_borrowed(),
            Content::Array(_, s) => s.is_borrowed(),
            Content::Empty | Content::EmptyArray(_) => false,
        };
        if borrowed {
            StorageType::DataNoDelete
        } else {
            StorageType::Data
        }
    }

    pub fn state(&self) -> VariantState {
        match &self.content {
            Content::Empty => VariantState::Absent,
            Content::EmptyArray(_) => VariantState::EmptyArray,
            Content::Scalar(..) => VariantState::Scalar,
            Content::Array(_, s) => match s.with(Vec::len) {
                0 => VariantState::EmptyArray,
                n => VariantState::Array(n),
            },
        }
    }

    /// Number of array elements; 0 for scalars and absent variants.
    pub fn array_length(&self) -> usize {
        match self.state() {
            VariantState::Array(n) => n,
            _ => 0,
        }
    }

    /// No value at all.
    pub fn is_empty(&self) -> bool {
        self.state() == VariantState::Absent
    }

    /// Exactly the scalar state.
    pub fn is_scalar(&self) -> bool {
        self.state() == VariantState::Scalar
    }

    pub fn is_array(&self) -> bool {
        matches!(self.state(), VariantState::EmptyArray | VariantState::Array(_))
    }

    pub fn array_dimensions(&self) -> Option<&[u32]> {
        self.array_dimensions.as_deref()
    }

    /// Run `f` on the scalar value.
    pub fn with_scalar<R>(&self, f: impl FnOnce(&Value) -> R) -> Option<R> {
        match &self.content {
            Content::Scalar(_, s) => Some(s.with(f)),
            _ => None,
        }
    }

    /// Run `f` on the array elements (empty slice for an empty array).
    pub fn with_array<R>(&self, f: impl FnOnce(&[Value]) -> R) -> Option<R> {
        match &self.content {
            Content::EmptyArray(_) => Some(f(&[][..])),
            Content::Array(_, s) => Some(s.with(|items| f(items.as_slice()))),
            _ => None,
        }
    }

    // ===================================================================
    // Setters
    // ===================================================================

    /// Adopt `value` (normally from [`Engine::new_value`]) as the scalar.
    pub fn set_scalar(&mut self, value: Box<Value>, ty: Arc<DataType>) {
        self.content = Content::Scalar(ty, Storage::Owned(*value));
        self.array_dimensions = None;
    }

    /// Borrow `value` as the scalar; it is never released by the variant.
    pub fn set_scalar_borrowed(&mut self, value: Shared<Value>, ty: Arc<DataType>) {
        self.content = Content::Scalar(ty, Storage::Borrowed(value));
        self.array_dimensions = None;
    }

    /// Deep-copy `value` into the variant. On failure the variant is empty.
    pub fn set_scalar_copy(&mut self, engine: &Engine, value: &Value, ty: Arc<DataType>) -> Result<()> {
        match engine.duplicate(value, &ty) {
            Ok(copy) => {
                self.set_scalar(copy, ty);
                Ok(())
            }
            Err(e) => {
                log::debug!("[variant] scalar copy of {} failed: {}", ty.type_name, e);
                *self = Self::new();
                Err(e)
            }
        }
    }

    /// Adopt `array` (normally from [`Engine::array_new`]). An empty vector
    /// makes an empty array.
    pub fn set_array(&mut self, array: Vec<Value>, ty: Arc<DataType>) {
        self.content = if array.is_empty() {
            Content::EmptyArray(ty)
        } else {
            Content::Array(ty, Storage::Owned(array))
        };
        self.array_dimensions = None;
    }

    /// Borrow `array`; it is never released by the variant.
    pub fn set_array_borrowed(&mut self, array: Shared<Vec<Value>>, ty: Arc<DataType>) {
        self.content = Content::Array(ty, Storage::Borrowed(array));
        self.array_dimensions = None;
    }

    /// Deep-copy `array` into the variant. On failure the variant is empty.
    pub fn set_array_copy(&mut self, engine: &Engine, array: &[Value], ty: Arc<DataType>) -> Result<()> {
        match engine.array_copy(array, &ty) {
            Ok(copy) => {
                self.set_array(copy, ty);
                Ok(())
            }
            Err(e) => {
                log::debug!(
                    "[variant] array copy of {} x {} failed: {}",
                    array.len(),
                    ty.type_name,
                    e
                );
                *self = Self::new();
                Err(e)
            }
        }
    }

    /// Shape the array. The product of `dims` must equal the array length.
    pub fn set_array_dimensions(&mut self, engine: &Engine, dims: &[u32]) -> Result<()> {
        let len = match self.state() {
            VariantState::Array(n) => n,
            VariantState::EmptyArray => 0,
            VariantState::Absent | VariantState::Scalar => {
                return Err(Error::TypeMismatch(
                    "array dimensions on a non-array variant".into(),
                ))
            }
        };
        if dims.is_empty() {
            return Err(Error::InvalidRange("no array dimensions".into()));
        }
        let product = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d as usize));
        if product != Some(len) {
            return Err(Error::InvalidRange(format!(
                "dimensions {:?} do not match array length {}",
                dims, len
            )));
        }
        let old = self.array_dimensions.take();
        if let Err(e) = self.adopt_dimensions(engine, dims) {
            self.array_dimensions = old;
            return Err(e);
        }
        if let Some(old) = old {
            engine.release(old.len() * DIMENSION_SIZE);
        }
        Ok(())
    }

    fn adopt_dimensions(&mut self, engine: &Engine, dims: &[u32]) -> Result<()> {
        let mut copy = vec_with_capacity(dims.len())?;
        engine.reserve(dims.len() * DIMENSION_SIZE)?;
        copy.extend_from_slice(dims);
        self.array_dimensions = Some(copy);
        Ok(())
    }

    // ===================================================================
    // Ranges
    // ===================================================================

    /// New variant holding copies of the elements selected by `range`.
    ///
    /// Fails with `TypeMismatch` for non-array variants and with
    /// `InvalidRange` when the range does not fit the array's shape. A
    /// shaped source yields a result shaped like the selection.
    pub fn copy_range(&self, engine: &Engine, range: &NumericRange) -> Result<Variant> {
        let dims = self.array_dimensions.as_deref();
        let (ty, storage) = match &self.content {
            Content::Array(ty, s) => (ty, s),
            Content::EmptyArray(_) => {
                return Err(Error::InvalidRange(format!("{} outside empty array", range)))
            }
            Content::Empty | Content::Scalar(..) => {
                return Err(Error::TypeMismatch("range copy from a non-array variant".into()))
            }
        };

        let items = storage.with(|items| -> Result<Vec<Value>> {
            let offsets = range.select(&shape_of(dims, items.len())?)?;
            engine.copy_elements(offsets.iter().map(|&o| &items[o]), offsets.len(), ty, true)
        })?;

        let mut dst = Variant::new();
        dst.set_array(items, Arc::clone(ty));
        if dims.is_some() {
            if let Err(e) = dst.adopt_dimensions(engine, &range.selected_shape()) {
                dst.release(engine);
                return Err(e);
            }
        }
        Ok(dst)
    }

    /// Move `values` into the elements selected by `range`.
    ///
    /// The displaced elements are moved back into `values`, whose owner
    /// stays responsible for them. Fails without touching anything when
    /// the range does not fit or selects a different number of elements.
    pub fn set_range(&mut self, values: &mut [Value], range: &NumericRange) -> Result<()> {
        let dims = self.array_dimensions.as_deref();
        let (_, storage) = Self::array_content(&mut self.content, range)?;
        storage.with_mut(|items| -> Result<()> {
            let offsets = selected_offsets(dims, items.len(), range, values.len())?;
            for (&o, v) in offsets.iter().zip(values.iter_mut()) {
                std::mem::swap(&mut items[o], v);
            }
            Ok(())
        })
    }

    /// Deep-copy `values` into the elements selected by `range`; the
    /// displaced elements are deleted. All-or-nothing.
    pub fn set_range_copy(&mut self, engine: &Engine, values: &[Value], range: &NumericRange) -> Result<()> {
        let dims = self.array_dimensions.as_deref();
        let (ty, storage) = Self::array_content(&mut self.content, range)?;
        storage.with_mut(|items| -> Result<()> {
            let offsets = selected_offsets(dims, items.len(), range, values.len())?;
            let mut copies = engine.copy_elements(values.iter(), values.len(), ty, false)?;
            for (&o, c) in offsets.iter().zip(copies.iter_mut()) {
                std::mem::swap(&mut items[o], c);
            }
            engine.delete_elements(&mut copies, ty);
            Ok(())
        })
    }

    fn array_content<'a>(
        content: &'a mut Content,
        range: &NumericRange,
    ) -> Result<(&'a Arc<DataType>, &'a mut Storage<Vec<Value>>)> {
        match content {
            Content::Array(ty, s) => Ok((&*ty, s)),
            Content::EmptyArray(_) => Err(Error::InvalidRange(format!("{} outside empty array", range))),
            Content::Empty | Content::Scalar(..) => {
                Err(Error::TypeMismatch("range write into a non-array variant".into()))
            }
        }
    }

    // ===================================================================
    // Lifecycle
    // ===================================================================

    /// Release owned content; the variant becomes absent.
    pub fn clear(&mut self, engine: &Engine) {
        self.release(engine);
    }

    /// Deep copy; borrowed content becomes owned in the copy.
    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Variant> {
        let content = match &self.content {
            Content::Empty => Content::Empty,
            Content::EmptyArray(ty) => Content::EmptyArray(Arc::clone(ty)),
            Content::Scalar(ty, s) => {
                let copy = s.with(|v| engine.duplicate(v, ty))?;
                Content::Scalar(Arc::clone(ty), Storage::Owned(*copy))
            }
            Content::Array(ty, s) => {
                let copy = s.with(|items| engine.array_copy(items, ty))?;
                if copy.is_empty() {
                    Content::EmptyArray(Arc::clone(ty))
                } else {
                    Content::Array(Arc::clone(ty), Storage::Owned(copy))
                }
            }
        };

        let mut copy = Variant {
            content,
            array_dimensions: None,
        };
        if let Some(dims) = &self.array_dimensions {
            if let Err(e) = copy.adopt_dimensions(engine, dims) {
                copy.release(engine);
                return Err(e);
            }
        }
        Ok(copy)
    }

    pub(crate) fn release(&mut self, engine: &Engine) {
        match std::mem::take(&mut self.content) {
            Content::Scalar(ty, Storage::Owned(mut value)) => engine.delete_inline(&mut value, &ty),
            Content::Array(ty, Storage::Owned(items)) => engine.array_delete(items, &ty),
            Content::Scalar(_, Storage::Borrowed(_)) | Content::Array(_, Storage::Borrowed(_)) => {
                log::trace!("[variant] borrowed content not released");
            }
            Content::Empty | Content::EmptyArray(_) => {}
        }
        if let Some(dims) = self.array_dimensions.take() {
            engine.release(dims.len() * DIMENSION_SIZE);
        }
    }
}

/// Row-major shape: the declared dimensions, or the flat length.
fn shape_of(dims: Option<&[u32]>, len: usize) -> Result<Vec<usize>> {
    let Some(dims) = dims else {
        return Ok(vec![len]);
    };
    let shape: Vec<usize> = dims.iter().map(|&d| d as usize).collect();
    let product = shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d));
    if product != Some(len) {
        return Err(Error::InvalidRange(format!(
            "dimensions {:?} do not match array length {}",
            dims, len
        )));
    }
    Ok(shape)
}

fn selected_offsets(
    dims: Option<&[u32]>,
    len: usize,
    range: &NumericRange,
    supplied: usize,
) -> Result<Vec<usize>> {
    let offsets = range.select(&shape_of(dims, len)?)?;
    if offsets.len() != supplied {
        log::debug!(
            "[variant] range {} selects {} element(s), {} supplied",
            range,
            offsets.len(),
            supplied
        );
        return Err(Error::TypeMismatch(format!(
            "range {} selects {} element(s), {} supplied",
            range,
            offsets.len(),
            supplied
        )));
    }
    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::BuiltinKind;
    use crate::memory::TrackingAllocator;
    use crate::registry::DataTypeRegistry;
    use crate::value::shared;

    fn setup() -> (Engine, Arc<TrackingAllocator>) {
        let alloc = Arc::new(TrackingAllocator::new());
        let engine = Engine::with_allocator(Arc::new(DataTypeRegistry::builtin()), alloc.clone());
        (engine, alloc)
    }

    fn ty(engine: &Engine, kind: BuiltinKind) -> Arc<DataType> {
        engine.registry().builtin_type(kind).clone()
    }

    fn ints(n: i32) -> Vec<Value> {
        (0..n).map(Value::Int32).collect()
    }

    fn assert_single_state(v: &Variant) {
        let flags = [
            v.is_empty(),
            v.state() == VariantState::EmptyArray,
            v.is_scalar(),
            matches!(v.state(), VariantState::Array(n) if n > 0),
        ];
        assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{:?}", v.state());
    }

    #[test]
    fn test_state_transitions() {
        let (engine, _) = setup();
        let int32 = ty(&engine, BuiltinKind::Int32);
        let mut v = Variant::new();
        assert_single_state(&v);
        assert!(v.data_type().is_none());

        v.set_array(Vec::new(), int32.clone());
        assert_single_state(&v);
        assert_eq!(v.state(), VariantState::EmptyArray);
        assert!(!v.is_scalar());

        v.set_scalar(Box::new(Value::Int32(5)), int32.clone());
        assert_single_state(&v);
        assert!(v.is_scalar());
        assert_eq!(v.with_scalar(|x| x.as_i32()), Some(Some(5)));

        v.set_array(ints(3), int32);
        assert_single_state(&v);
        assert_eq!(v.array_length(), 3);
        assert!(v.with_scalar(|_| ()).is_none());
    }

    #[test]
    fn test_borrowed_empty_array_state() {
        let (engine, _) = setup();
        let mut v = Variant::new();
        v.set_array_borrowed(shared(Vec::new()), ty(&engine, BuiltinKind::Int32));
        assert_eq!(v.state(), VariantState::EmptyArray);
        assert_eq!(v.storage_type(), StorageType::DataNoDelete);
    }

    #[test]
    fn test_set_scalar_copy_failure_leaves_empty() {
        let (engine, alloc) = setup();
        let string = ty(&engine, BuiltinKind::String);
        let mut v = Variant::new();
        v.set_scalar(Box::new(Value::Int32(1)), ty(&engine, BuiltinKind::Int32));

        // shell, then refuse the string buffer
        alloc.fail_nth(2);
        assert!(v.set_scalar_copy(&engine, &Value::from("x"), string).is_err());
        assert!(v.is_empty());
        assert_eq!(alloc.stats().live_bytes(), 0);
    }

    #[test]
    fn test_array_dimensions_must_match_length() {
        let (engine, alloc) = setup();
        let mut v = Variant::new();
        v.set_array_copy(&engine, &ints(6), ty(&engine, BuiltinKind::Int32))
            .expect("copy");
        assert!(matches!(
            v.set_array_dimensions(&engine, &[4, 2]),
            Err(Error::InvalidRange(_))
        ));
        v.set_array_dimensions(&engine, &[2, 3]).expect("dims");
        v.set_array_dimensions(&engine, &[3, 2]).expect("dims");
        assert_eq!(v.array_dimensions(), Some(&[3, 2][..]));

        v.clear(&engine);
        assert!(v.is_empty());
        assert_eq!(alloc.stats().live_bytes(), 0);

        assert!(matches!(
            v.set_array_dimensions(&engine, &[1]),
            Err(Error::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_copy_range_2d() {
        let (engine, alloc) = setup();
        let mut v = Variant::new();
        v.set_array_copy(&engine, &ints(12), ty(&engine, BuiltinKind::Int32))
            .expect("copy");
        v.set_array_dimensions(&engine, &[3, 4]).expect("dims");

        let range: NumericRange = "1:2,1:2".parse().expect("range");
        let mut slice = v.copy_range(&engine, &range).expect("copy_range");
        assert_eq!(slice.array_dimensions(), Some(&[2, 2][..]));
        assert_eq!(
            slice.with_array(|a| a.to_vec()),
            Some(vec![Value::Int32(5), Value::Int32(6), Value::Int32(9), Value::Int32(10)])
        );

        let flat: NumericRange = "1:2".parse().expect("range");
        assert!(matches!(v.copy_range(&engine, &flat), Err(Error::InvalidRange(_))));

        slice.clear(&engine);
        v.clear(&engine);
        assert_eq!(alloc.stats().live_bytes(), 0);
    }

    #[test]
    fn test_copy_range_requires_array() {
        let (engine, _) = setup();
        let range: NumericRange = "0".parse().expect("range");
        let mut v = Variant::new();
        assert!(matches!(v.copy_range(&engine, &range), Err(Error::TypeMismatch(_))));
        v.set_scalar(Box::new(Value::Int32(1)), ty(&engine, BuiltinKind::Int32));
        assert!(matches!(v.copy_range(&engine, &range), Err(Error::TypeMismatch(_))));
        v.set_array(Vec::new(), ty(&engine, BuiltinKind::Int32));
        assert!(matches!(v.copy_range(&engine, &range), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn test_set_range_swaps() {
        let (engine, _) = setup();
        let mut v = Variant::new();
        v.set_array(ints(5), ty(&engine, BuiltinKind::Int32));
        let range: NumericRange = "1:2".parse().expect("range");

        let mut values = vec![Value::Int32(10), Value::Int32(20)];
        v.set_range(&mut values, &range).expect("set_range");
        assert_eq!(values, vec![Value::Int32(1), Value::Int32(2)]);
        assert_eq!(
            v.with_array(|a| a.to_vec()),
            Some(vec![
                Value::Int32(0),
                Value::Int32(10),
                Value::Int32(20),
                Value::Int32(3),
                Value::Int32(4)
            ])
        );

        let mut three = ints(3);
        assert!(matches!(
            v.set_range(&mut three, &range),
            Err(Error::TypeMismatch(_))
        ));
        assert_eq!(three, ints(3));
    }

    #[test]
    fn test_set_range_copy_through_borrowed() {
        let (engine, alloc) = setup();
        let string = ty(&engine, BuiltinKind::String);
        let backing = shared(vec![Value::from("a"), Value::from("b"), Value::from("c")]);
        let mut v = Variant::new();
        v.set_array_borrowed(backing.clone(), string);

        let range: NumericRange = "2".parse().expect("range");
        v.set_range_copy(&engine, &[Value::from("zz")], &range)
            .expect("set_range_copy");
        assert_eq!(backing.read()[2], Value::from("zz"));

        // "zz" copied in, "c" displaced (accounted as a 1-byte release)
        let stats = alloc.stats();
        assert_eq!(stats.allocated_bytes, 2);
        assert_eq!(stats.released_bytes, 1);

        v.clear(&engine);
        assert_eq!(backing.read().len(), 3);
    }
}
