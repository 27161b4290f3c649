// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String, ByteString and XmlElement.
//!
//! All three share one representation: an optional byte buffer. A missing
//! buffer is the *null* string, a zero-length buffer is the *empty* string
//! (no allocation is accounted for it). Equality is byte-wise on the
//! content, so null and empty compare equal (both have length 0).

use crate::engine::Engine;
use crate::error::Result;
use crate::memory::vec_with_capacity;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Sequence of bytes with a null / empty / present distinction.
#[derive(Debug, Clone, Default)]
pub struct UaString {
    data: Option<Vec<u8>>,
}

/// Sequence of octets.
pub type ByteString = UaString;

/// XML element, carried as its textual encoding.
pub type XmlElement = UaString;

impl UaString {
    /// The null string (no buffer).
    pub const NULL: UaString = UaString { data: None };

    /// The null string (no buffer).
    #[must_use]
    pub const fn null() -> Self {
        Self::NULL
    }

    /// Zero-length, non-null string.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: Some(Vec::new()),
        }
    }

    /// Copy `chars` into a new string.
    pub fn from_chars(chars: &str) -> Self {
        Self::from_bytes(chars.as_bytes())
    }

    /// Copy `bytes` into a new string.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: Some(bytes.to_vec()),
        }
    }

    /// Buffer of `length` zeroed bytes.
    pub fn alloc_buffer(length: usize) -> Result<Self> {
        let mut buf = vec_with_capacity(length)?;
        buf.resize(length, 0);
        Ok(Self { data: Some(buf) })
    }

    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    /// Length 0, null or not.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Content as UTF-8, if it is valid.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    /// Accounted deep copy.
    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Self> {
        match &self.data {
            None => Ok(Self::null()),
            Some(bytes) if bytes.is_empty() => Ok(Self::empty()),
            Some(bytes) => {
                let mut buf = vec_with_capacity(bytes.len())?;
                engine.reserve(bytes.len())?;
                buf.extend_from_slice(bytes);
                Ok(Self { data: Some(buf) })
            }
        }
    }

    /// Release the buffer; the string becomes null.
    pub(crate) fn release(&mut self, engine: &Engine) {
        if let Some(bytes) = self.data.take() {
            engine.release(bytes.len());
        }
    }
}

impl PartialEq for UaString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for UaString {}

impl Hash for UaString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl From<&str> for UaString {
    fn from(s: &str) -> Self {
        Self::from_chars(s)
    }
}

impl From<String> for UaString {
    fn from(s: String) -> Self {
        Self {
            data: Some(s.into_bytes()),
        }
    }
}

impl From<Vec<u8>> for UaString {
    fn from(bytes: Vec<u8>) -> Self {
        Self { data: Some(bytes) }
    }
}

impl fmt::Display for UaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}
