// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error kinds reported by the lifecycle engine.
//!
//! Callers (service layer, codecs) translate these into protocol status
//! codes; this crate never produces a status code itself.

use std::fmt;

/// Errors for engine, array, range and variant operations.
///
/// # Example
///
/// ```rust
/// use uatypes::{Error, NumericRange};
///
/// match "3:1".parse::<NumericRange>() {
///     Err(Error::InvalidRange(msg)) => println!("bad range: {}", msg),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Memory exhausted, allocator refused, or the array ceiling was hit.
    AllocationFailure {
        /// Size of the refused request in bytes.
        bytes: usize,
    },
    /// Malformed or out-of-bounds range, or inconsistent array dimensions.
    InvalidRange(String),
    /// Operation does not fit the shape of the value (non-array variant,
    /// element count differing from a range, value/descriptor disagreement).
    TypeMismatch(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailure { bytes } => {
                write!(f, "Allocation failure: {} bytes", bytes)
            }
            Error::InvalidRange(msg) => write!(f, "Invalid range: {}", msg),
            Error::TypeMismatch(msg) => write!(f, "Type mismatch: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::AllocationFailure { bytes: 0 }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
