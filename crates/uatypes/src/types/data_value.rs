// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DataValue: a Variant with optional status and timestamps.

use super::datetime::DateTime;
use super::status_code::StatusCode;
use crate::engine::Engine;
use crate::error::Result;
use crate::variant::Variant;

/// Six independently optional parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataValue {
    pub value: Option<Variant>,
    pub status: Option<StatusCode>,
    pub source_timestamp: Option<DateTime>,
    pub source_picoseconds: Option<u16>,
    pub server_timestamp: Option<DateTime>,
    pub server_picoseconds: Option<u16>,
}

impl DataValue {
    pub fn new(value: Variant) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_source_timestamp(mut self, ts: DateTime) -> Self {
        self.source_timestamp = Some(ts);
        self
    }

    #[must_use]
    pub fn with_server_timestamp(mut self, ts: DateTime) -> Self {
        self.server_timestamp = Some(ts);
        self
    }

    pub(crate) fn deep_copy(&self, engine: &Engine) -> Result<Self> {
        let value = match &self.value {
            Some(v) => Some(v.deep_copy(engine)?),
            None => None,
        };
        Ok(Self {
            value,
            ..self.clone_flags()
        })
    }

    fn clone_flags(&self) -> Self {
        Self {
            value: None,
            status: self.status,
            source_timestamp: self.source_timestamp,
            source_picoseconds: self.source_picoseconds,
            server_timestamp: self.server_timestamp,
            server_picoseconds: self.server_picoseconds,
        }
    }

    pub(crate) fn release(&mut self, engine: &Engine) {
        if let Some(v) = self.value.as_mut() {
            v.release(engine);
        }
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::BuiltinKind;
    use crate::memory::TrackingAllocator;
    use crate::registry::DataTypeRegistry;
    use crate::value::Value;
    use std::sync::Arc;

    #[test]
    fn test_copy_keeps_presence() {
        let alloc = Arc::new(TrackingAllocator::new());
        let engine = Engine::with_allocator(Arc::new(DataTypeRegistry::builtin()), alloc.clone());
        let string = engine.registry().builtin_type(BuiltinKind::String).clone();

        let mut variant = Variant::new();
        variant
            .set_scalar_copy(&engine, &Value::from("42 rpm"), string)
            .expect("set");
        let dv = DataValue::new(variant)
            .with_status(StatusCode(0x4000_0000))
            .with_source_timestamp(DateTime(1));

        let mut copy = dv.deep_copy(&engine).expect("copy");
        assert_eq!(copy, dv);
        assert!(copy.server_timestamp.is_none());

        let before = alloc.stats();
        copy.release(&engine);
        assert_eq!(copy, DataValue::default());
        assert_eq!(alloc.stats().since(&before).releases, 2);
    }
}
