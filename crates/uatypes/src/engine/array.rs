// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array engine: homogeneous sequences of any described type.
//!
//! An array block is accounted as `count * mem_size` bytes and bounded by
//! [`EngineConfig::max_array_bytes`](crate::config::EngineConfig). The
//! element storage actually held, `count * size_of::<Value>()`, is bounded
//! by `max_array_host_bytes`. Zero-length arrays own no block.

use super::Engine;
use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::memory::vec_with_capacity;
use crate::value::Value;

impl Engine {
    /// Size of an array block, checked against the array ceiling and the
    /// host footprint limit.
    pub(crate) fn array_bytes(&self, count: usize, ty: &DataType) -> Result<usize> {
        let host = count.checked_mul(std::mem::size_of::<Value>());
        if !host.is_some_and(|h| h <= self.config.max_array_host_bytes) {
            log::debug!(
                "[engine] array of {} x {} exceeds host limit of {} bytes",
                count,
                ty.type_name,
                self.config.max_array_host_bytes
            );
            return Err(Error::AllocationFailure {
                bytes: host.unwrap_or(usize::MAX),
            });
        }
        match count.checked_mul(ty.mem_size) {
            Some(bytes) if bytes <= self.config.max_array_bytes => Ok(bytes),
            other => {
                let bytes = other.unwrap_or(usize::MAX);
                log::debug!(
                    "[engine] array of {} x {} ({} bytes) exceeds ceiling of {} bytes",
                    count,
                    ty.type_name,
                    bytes,
                    self.config.max_array_bytes
                );
                Err(Error::AllocationFailure { bytes })
            }
        }
    }

    /// Allocate `count` zero-initialized elements of type `ty`.
    ///
    /// Fails for `count == 0` (callers represent empty arrays without a
    /// block) and when the block would exceed the array ceiling.
    pub fn array_new(&self, count: usize, ty: &DataType) -> Result<Vec<Value>> {
        if count == 0 {
            return Err(Error::AllocationFailure { bytes: 0 });
        }
        let bytes = self.array_bytes(count, ty)?;
        let mut items = vec_with_capacity(count)?;
        self.reserve(bytes)?;
        let zero = self.default_value(ty);
        items.resize(count, zero);
        Ok(items)
    }

    /// Deep-copy an array. No partial array is ever returned: on failure
    /// the elements copied so far and the block are released.
    ///
    /// An empty source yields an empty vector without allocating.
    pub fn array_copy(&self, src: &[Value], ty: &DataType) -> Result<Vec<Value>> {
        self.copy_elements(src.iter(), src.len(), ty, true)
    }

    /// Copy `count` elements from `src`, optionally accounting the block.
    pub(crate) fn copy_elements<'a, I>(
        &self,
        src: I,
        count: usize,
        ty: &DataType,
        account_block: bool,
    ) -> Result<Vec<Value>>
    where
        I: Iterator<Item = &'a Value>,
    {
        if count == 0 {
            return Ok(Vec::new());
        }
        let bytes = self.array_bytes(count, ty)?;
        let mut items = vec_with_capacity(count)?;
        if account_block {
            self.reserve(bytes)?;
        }

        for (index, value) in src.enumerate() {
            match self.copy_value(value, ty) {
                Ok(v) => items.push(v),
                Err(e) => {
                    log::debug!(
                        "[engine] array copy of {} failed at element {}/{} ({})",
                        ty.type_name,
                        index,
                        count,
                        e
                    );
                    self.delete_elements(&mut items, ty);
                    if account_block {
                        self.release(bytes);
                    }
                    return Err(e);
                }
            }
        }
        Ok(items)
    }

    /// Release the elements' content, then the block.
    pub fn array_delete(&self, mut items: Vec<Value>, ty: &DataType) {
        if items.is_empty() {
            return;
        }
        self.delete_elements(&mut items, ty);
        self.release(items.len().saturating_mul(ty.mem_size));
    }

    pub(crate) fn delete_elements(&self, items: &mut [Value], ty: &DataType) {
        if ty.fixed_size {
            return;
        }
        for item in items.iter_mut() {
            self.delete_members(item, ty);
        }
    }
}
