// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Heap bookkeeping for the lifecycle engine.
//!
//! Every logical allocation the engine makes (value shells, array blocks,
//! string buffers, dimension lists) is announced to an [`Allocator`] before
//! it happens, and every release is reported back. The allocator may refuse
//! a request, which surfaces as [`Error::AllocationFailure`].
//!
//! [`TrackingAllocator`] keeps lock-free counters and can be armed to refuse
//! the k-th request, which is how the atomic-copy guarantees are tested.

use crate::error::{Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of (accounted) heap memory for the engine.
pub trait Allocator: Send + Sync + fmt::Debug {
    /// Reserve `bytes`. Refusal is reported as `AllocationFailure`.
    fn allocate(&self, bytes: usize) -> Result<()>;

    /// Give back `bytes` previously obtained through [`allocate`](Self::allocate).
    fn release(&self, bytes: usize);
}

/// Allocator without bookkeeping: every request succeeds.
///
/// Genuine out-of-memory conditions are still caught by the engine through
/// `try_reserve_exact`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    #[inline]
    fn allocate(&self, _bytes: usize) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn release(&self, _bytes: usize) {}
}

/// Point-in-time copy of the [`TrackingAllocator`] counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocStats {
    pub allocations: u64,
    pub releases: u64,
    pub allocated_bytes: u64,
    pub released_bytes: u64,
    pub refused: u64,
}

impl AllocStats {
    /// Bytes currently held (negative means more was released than allocated).
    pub fn live_bytes(&self) -> i64 {
        self.allocated_bytes as i64 - self.released_bytes as i64
    }

    /// Allocations without a matching release.
    pub fn outstanding(&self) -> i64 {
        self.allocations as i64 - self.releases as i64
    }

    /// Counter delta since `earlier`.
    pub fn since(&self, earlier: &AllocStats) -> AllocStats {
        AllocStats {
            allocations: self.allocations - earlier.allocations,
            releases: self.releases - earlier.releases,
            allocated_bytes: self.allocated_bytes - earlier.allocated_bytes,
            released_bytes: self.released_bytes - earlier.released_bytes,
            refused: self.refused - earlier.refused,
        }
    }
}

/// Counting allocator with failure injection.
///
/// # Example
///
/// ```rust
/// use uatypes::memory::{Allocator, TrackingAllocator};
///
/// let alloc = TrackingAllocator::new();
/// alloc.fail_nth(2);
/// assert!(alloc.allocate(8).is_ok());
/// assert!(alloc.allocate(8).is_err()); // second request refused
/// assert!(alloc.allocate(8).is_ok()); // disarmed again
/// ```
#[derive(Debug, Default)]
pub struct TrackingAllocator {
    allocations: AtomicU64,
    releases: AtomicU64,
    allocated_bytes: AtomicU64,
    released_bytes: AtomicU64,
    refused: AtomicU64,
    /// 0 = disarmed; n = the n-th upcoming request is refused.
    countdown: AtomicU64,
}

impl TrackingAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the `n`-th upcoming allocation (1-based). `0` disarms.
    pub fn fail_nth(&self, n: u64) {
        self.countdown.store(n, Ordering::SeqCst);
    }

    /// Disarm failure injection.
    pub fn disarm(&self) {
        self.countdown.store(0, Ordering::SeqCst);
    }

    /// Snapshot the counters.
    pub fn stats(&self) -> AllocStats {
        AllocStats {
            allocations: self.allocations.load(Ordering::SeqCst),
            releases: self.releases.load(Ordering::SeqCst),
            allocated_bytes: self.allocated_bytes.load(Ordering::SeqCst),
            released_bytes: self.released_bytes.load(Ordering::SeqCst),
            refused: self.refused.load(Ordering::SeqCst),
        }
    }

    fn should_refuse(&self) -> bool {
        let prev = self
            .countdown
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                if n == 0 {
                    None
                } else {
                    Some(n - 1)
                }
            });
        matches!(prev, Ok(1))
    }
}

impl Allocator for TrackingAllocator {
    fn allocate(&self, bytes: usize) -> Result<()> {
        if self.should_refuse() {
            self.refused.fetch_add(1, Ordering::SeqCst);
            log::trace!("[memory] injected refusal of {} bytes", bytes);
            return Err(Error::AllocationFailure { bytes });
        }
        self.allocations.fetch_add(1, Ordering::SeqCst);
        self.allocated_bytes
            .fetch_add(bytes as u64, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self, bytes: usize) {
        self.releases.fetch_add(1, Ordering::SeqCst);
        self.released_bytes
            .fetch_add(bytes as u64, Ordering::SeqCst);
    }
}

/// Vector with exactly `capacity` slots, OOM mapped to `AllocationFailure`.
pub(crate) fn vec_with_capacity<T>(capacity: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(capacity)
        .map_err(|_| Error::AllocationFailure {
            bytes: capacity.saturating_mul(std::mem::size_of::<T>()),
        })?;
    Ok(v)
}
