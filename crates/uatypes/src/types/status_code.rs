// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! StatusCode builtin value.

use std::fmt;

/// Numeric result code attached to a value or an operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const GOOD: StatusCode = StatusCode(0);

    const SEVERITY_MASK: u32 = 0xC000_0000;
    const SEVERITY_UNCERTAIN: u32 = 0x4000_0000;
    const SEVERITY_BAD: u32 = 0x8000_0000;

    pub fn is_good(self) -> bool {
        self.0 & Self::SEVERITY_MASK == 0
    }

    pub fn is_uncertain(self) -> bool {
        self.0 & Self::SEVERITY_MASK == Self::SEVERITY_UNCERTAIN
    }

    pub fn is_bad(self) -> bool {
        self.0 & Self::SEVERITY_BAD != 0
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        assert!(StatusCode::GOOD.is_good());
        assert!(StatusCode(0x8003_0000).is_bad());
        assert!(StatusCode(0x4000_0000).is_uncertain());
        assert!(!StatusCode(0x4000_0000).is_bad());
        assert_eq!(StatusCode(0x8003_0000).to_string(), "0x80030000");
    }
}
