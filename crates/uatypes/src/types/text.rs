// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! QualifiedName and LocalizedText.

use super::string::UaString;
use crate::engine::Engine;
use crate::error::Result;
use std::fmt;

/// Name qualified by a namespace index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace_index: u16,
    pub name: UaString,
}

impl QualifiedName {
    pub fn new(namespace_index: u16, name: &str) -> Self {
        Self {
            namespace_index,
            name: UaString::from_chars(name),
        }
    }

    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Self> {
        Ok(Self {
            namespace_index: self.namespace_index,
            name: self.name.deep_copy(engine)?,
        })
    }

    pub(crate) fn release(&mut self, engine: &Engine) {
        self.name.release(engine);
        self.namespace_index = 0;
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace_index, self.name)
    }
}

/// Human-readable text with an optional locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocalizedText {
    pub locale: UaString,
    pub text: UaString,
}

impl LocalizedText {
    pub fn new(locale: &str, text: &str) -> Self {
        Self {
            locale: UaString::from_chars(locale),
            text: UaString::from_chars(text),
        }
    }

    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Self> {
        let mut locale = self.locale.deep_copy(engine)?;
        match self.text.deep_copy(engine) {
            Ok(text) => Ok(Self { locale, text }),
            Err(e) => {
                locale.release(engine);
                Err(e)
            }
        }
    }

    pub(crate) fn release(&mut self, engine: &Engine) {
        self.locale.release(engine);
        self.text.release(engine);
    }
}
