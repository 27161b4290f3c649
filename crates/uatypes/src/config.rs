// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Global constants and engine configuration - single source of truth.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: compile-time constants (builtin table size, array
//!   ceiling, DateTime units)
//! - **Level 2 (Runtime)**: [`EngineConfig`], handed to
//!   [`Engine::with_config`](crate::Engine::with_config)
//!
//! **NEVER hardcode these values elsewhere!**

// =======================================================================
// Builtin type table
// =======================================================================

/// Number of builtin types in the base namespace table.
///
/// Boolean (index 0) through DiagnosticInfo (index 24).
pub const BUILTIN_TYPES_COUNT: usize = 25;

// =======================================================================
// Array ceiling
// =======================================================================

/// Upper bound for a single array allocation, in bytes (100 MiB).
///
/// `array_new(count, T)` fails when `count * T.mem_size` exceeds this.
pub const MAX_ARRAY_SIZE: usize = 104_857_600;

/// Upper bound for the host memory behind one array block, in bytes (1 GiB).
///
/// Elements are held as [`Value`](crate::Value)s, usually larger than the
/// descriptor's `mem_size`. `count * size_of::<Value>()` is checked
/// against this in addition to [`MAX_ARRAY_SIZE`].
pub const MAX_ARRAY_HOST_BYTES: usize = 1 << 30;

// =======================================================================
// DateTime units (100 ns ticks since 1601-01-01 UTC)
// =======================================================================

/// Ticks per microsecond.
pub const USEC_TO_DATETIME: i64 = 10;

/// Ticks per millisecond.
pub const MSEC_TO_DATETIME: i64 = USEC_TO_DATETIME * 1000;

/// Ticks per second.
pub const SEC_TO_DATETIME: i64 = MSEC_TO_DATETIME * 1000;

/// DateTime of 1970-01-01 00:00 UTC.
pub const DATETIME_UNIX_EPOCH: i64 = 11_644_473_600 * SEC_TO_DATETIME;

// =======================================================================
// Runtime configuration
// =======================================================================

/// Runtime knobs for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest array block (in bytes) the Array Engine will allocate.
    pub max_array_bytes: usize,
    /// Largest host footprint (in bytes) of one array's element storage.
    pub max_array_host_bytes: usize,
}

impl EngineConfig {
    /// Lower the array ceiling (tests, constrained targets).
    #[must_use]
    pub fn with_max_array_bytes(mut self, max_array_bytes: usize) -> Self {
        self.max_array_bytes = max_array_bytes;
        self
    }

    #[must_use]
    pub fn with_max_array_host_bytes(mut self, max_array_host_bytes: usize) -> Self {
        self.max_array_host_bytes = max_array_host_bytes;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_array_bytes: MAX_ARRAY_SIZE,
            max_array_host_bytes: MAX_ARRAY_HOST_BYTES,
        }
    }
}
