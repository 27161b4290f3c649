// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DiagnosticInfo: optional-field bundle with a chain of inner infos.
//!
//! The chain is owned head-to-tail by the outermost instance. Copy and
//! release walk it iteratively. Each inner node is accounted as one
//! DiagnosticInfo shell.

use super::status_code::StatusCode;
use super::string::UaString;
use crate::data_type::BuiltinKind;
use crate::engine::Engine;
use crate::error::Result;

/// Presence bits, in wire order.
pub mod presence {
    pub const SYMBOLIC_ID: u8 = 0x01;
    pub const NAMESPACE_URI: u8 = 0x02;
    pub const LOCALIZED_TEXT: u8 = 0x04;
    pub const LOCALE: u8 = 0x08;
    pub const ADDITIONAL_INFO: u8 = 0x10;
    pub const INNER_STATUS_CODE: u8 = 0x20;
    pub const INNER_DIAGNOSTIC_INFO: u8 = 0x40;
}

/// Optional diagnostic fields plus an owned chain of inner infos.
///
/// Clone, comparison and drop walk the chain in a loop, so chain length
/// is bounded by memory only.
#[derive(Debug, Default)]
pub struct DiagnosticInfo {
    pub symbolic_id: Option<i32>,
    pub namespace_uri: Option<i32>,
    pub localized_text: Option<i32>,
    pub locale: Option<i32>,
    pub additional_info: Option<UaString>,
    pub inner_status_code: Option<StatusCode>,
    pub inner_diagnostic_info: Option<Box<DiagnosticInfo>>,
}

impl DiagnosticInfo {
    /// Presence bits of the set fields.
    pub fn presence_mask(&self) -> u8 {
        let mut mask = 0;
        if self.symbolic_id.is_some() {
            mask |= presence::SYMBOLIC_ID;
        }
        if self.namespace_uri.is_some() {
            mask |= presence::NAMESPACE_URI;
        }
        if self.localized_text.is_some() {
            mask |= presence::LOCALIZED_TEXT;
        }
        if self.locale.is_some() {
            mask |= presence::LOCALE;
        }
        if self.additional_info.is_some() {
            mask |= presence::ADDITIONAL_INFO;
        }
        if self.inner_status_code.is_some() {
            mask |= presence::INNER_STATUS_CODE;
        }
        if self.inner_diagnostic_info.is_some() {
            mask |= presence::INNER_DIAGNOSTIC_INFO;
        }
        mask
    }

    pub fn with_symbolic_id(mut self, id: i32) -> Self {
        self.symbolic_id = Some(id);
        self
    }

    pub fn with_namespace_uri(mut self, index: i32) -> Self {
        self.namespace_uri = Some(index);
        self
    }

    pub fn with_localized_text(mut self, index: i32) -> Self {
        self.localized_text = Some(index);
        self
    }

    pub fn with_locale(mut self, index: i32) -> Self {
        self.locale = Some(index);
        self
    }

    pub fn with_additional_info(mut self, info: impl Into<UaString>) -> Self {
        self.additional_info = Some(info.into());
        self
    }

    pub fn with_inner_status_code(mut self, code: StatusCode) -> Self {
        self.inner_status_code = Some(code);
        self
    }

    /// Put `inner` directly below this node, ahead of the current chain.
    pub fn with_inner(mut self, mut inner: DiagnosticInfo) -> Self {
        if let Some(rest) = self.inner_diagnostic_info.take() {
            inner.push_inner(*rest);
        }
        self.inner_diagnostic_info = Some(Box::new(inner));
        self
    }

    /// Attach `inner` at the end of the chain.
    pub fn push_inner(&mut self, inner: DiagnosticInfo) {
        let mut tail = &mut self.inner_diagnostic_info;
        while let Some(node) = tail {
            tail = &mut node.inner_diagnostic_info;
        }
        *tail = Some(Box::new(inner));
    }

    /// This node followed by its inner infos.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticInfo> {
        std::iter::successors(Some(self), |d| d.inner_diagnostic_info.as_deref())
    }

    /// Number of nodes in the chain, this one included.
    pub fn depth(&self) -> usize {
        self.iter().count()
    }

    /// Field copy of this node without its inner chain, no accounting.
    fn clone_node(&self) -> Self {
        Self {
            symbolic_id: self.symbolic_id,
            namespace_uri: self.namespace_uri,
            localized_text: self.localized_text,
            locale: self.locale,
            additional_info: self.additional_info.clone(),
            inner_status_code: self.inner_status_code,
            inner_diagnostic_info: None,
        }
    }

    fn same_node(&self, other: &Self) -> bool {
        self.symbolic_id == other.symbolic_id
            && self.namespace_uri == other.namespace_uri
            && self.localized_text == other.localized_text
            && self.locale == other.locale
            && self.additional_info == other.additional_info
            && self.inner_status_code == other.inner_status_code
    }

    /// Link detached nodes head first into one chain.
    fn link(nodes: Vec<DiagnosticInfo>) -> Self {
        let mut chain: Option<Box<DiagnosticInfo>> = None;
        for mut node in nodes.into_iter().rev() {
            node.inner_diagnostic_info = chain;
            chain = Some(Box::new(node));
        }
        chain.map(|head| *head).unwrap_or_default()
    }

    fn shell_size() -> usize {
        BuiltinKind::DiagnosticInfo.mem_size()
    }

    /// Copy of this node without its inner chain.
    fn copy_node(&self, engine: &Engine) -> Result<Self> {
        let additional_info = match &self.additional_info {
            Some(s) => Some(s.deep_copy(engine)?),
            None => None,
        };
        Ok(Self {
            symbolic_id: self.symbolic_id,
            namespace_uri: self.namespace_uri,
            localized_text: self.localized_text,
            locale: self.locale,
            additional_info,
            inner_status_code: self.inner_status_code,
            inner_diagnostic_info: None,
        })
    }

    fn release_node(&mut self, engine: &Engine) {
        if let Some(s) = self.additional_info.as_mut() {
            s.release(engine);
        }
    }

    /// Deep copy of the whole chain, all-or-nothing.
    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Self> {
        let mut nodes: Vec<DiagnosticInfo> = Vec::new();
        for (depth, node) in self.iter().enumerate() {
            let inner = depth > 0;
            let copied = if inner {
                engine.reserve(Self::shell_size()).and_then(|()| {
                    node.copy_node(engine).map_err(|e| {
                        engine.release(Self::shell_size());
                        e
                    })
                })
            } else {
                node.copy_node(engine)
            };
            match copied {
                Ok(c) => nodes.push(c),
                Err(e) => {
                    log::debug!(
                        "[engine] diagnostic info copy failed at depth {}, rolling back",
                        depth
                    );
                    for (d, mut n) in nodes.into_iter().enumerate() {
                        n.release_node(engine);
                        if d > 0 {
                            engine.release(Self::shell_size());
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(Self::link(nodes))
    }

    /// Release the whole chain; this node becomes empty.
    pub(crate) fn release(&mut self, engine: &Engine) {
        self.release_node(engine);
        let mut next = self.inner_diagnostic_info.take();
        while let Some(mut node) = next {
            next = node.inner_diagnostic_info.take();
            node.release_node(engine);
            engine.release(Self::shell_size());
        }
        *self = Self::default();
    }
}

impl Clone for DiagnosticInfo {
    fn clone(&self) -> Self {
        Self::link(self.iter().map(Self::clone_node).collect())
    }
}

impl PartialEq for DiagnosticInfo {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.iter();
        let mut b = other.iter();
        loop {
            match (a.next(), b.next()) {
                (Some(x), Some(y)) if x.same_node(y) => {}
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

impl Drop for DiagnosticInfo {
    fn drop(&mut self) {
        let mut next = self.inner_diagnostic_info.take();
        while let Some(mut node) = next {
            next = node.inner_diagnostic_info.take();
        }
    }
}
