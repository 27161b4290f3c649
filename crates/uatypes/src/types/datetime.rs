// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DateTime: 100 ns intervals since 1601-01-01 00:00 UTC.

use crate::config::{DATETIME_UNIX_EPOCH, SEC_TO_DATETIME};
use chrono::{Datelike, Timelike};
use std::fmt;
use std::sync::OnceLock;
use std::time::Instant;

/// An instant in time, as a signed 64-bit tick count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(pub i64);

/// Broken-down calendar representation of a [`DateTime`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateTimeStruct {
    pub nano_sec: u16,
    pub micro_sec: u16,
    pub milli_sec: u16,
    pub sec: u16,
    pub min: u16,
    pub hour: u16,
    pub day: u16,
    pub month: u16,
    pub year: u16,
}

static MONOTONIC_BASE: OnceLock<Instant> = OnceLock::new();

impl DateTime {
    /// Current wall-clock time.
    pub fn now() -> Self {
        let now = chrono::Utc::now();
        let ticks = now
            .timestamp()
            .saturating_mul(SEC_TO_DATETIME)
            .saturating_add(i64::from(now.timestamp_subsec_nanos() / 100));
        Self(ticks.saturating_add(DATETIME_UNIX_EPOCH))
    }

    /// Clock that is invariant to system time changes. Only for differences.
    pub fn now_monotonic() -> Self {
        let base = MONOTONIC_BASE.get_or_init(Instant::now);
        let elapsed = base.elapsed();
        let ticks = elapsed.as_nanos() / 100;
        Self(i64::try_from(ticks).unwrap_or(i64::MAX))
    }

    /// Tick count.
    pub fn ticks(self) -> i64 {
        self.0
    }

    /// Calendar breakdown (UTC). Out-of-range instants give a zeroed struct.
    pub fn to_struct(self) -> DateTimeStruct {
        let t = self.0;
        let Some(since_epoch) = t.checked_sub(DATETIME_UNIX_EPOCH) else {
            return DateTimeStruct::default();
        };
        let secs = since_epoch.div_euclid(SEC_TO_DATETIME);

        let Some(utc) = chrono::DateTime::from_timestamp(secs, 0) else {
            return DateTimeStruct::default();
        };
        let Ok(year) = u16::try_from(utc.year()) else {
            return DateTimeStruct::default();
        };

        let sub = t.rem_euclid(SEC_TO_DATETIME);
        DateTimeStruct {
            nano_sec: ((sub % 10) * 100) as u16,
            micro_sec: ((sub % 10_000) / 10) as u16,
            milli_sec: ((sub % 10_000_000) / 10_000) as u16,
            sec: utc.second() as u16,
            min: utc.minute() as u16,
            hour: utc.hour() as u16,
            day: utc.day() as u16,
            month: utc.month() as u16,
            year,
        }
    }
}

impl From<i64> for DateTime {
    fn from(ticks: i64) -> Self {
        Self(ticks)
    }
}

impl fmt::Display for DateTime {
    /// `MM/DD/YYYY HH:MM:SS.mmm.uuu.nnn`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ts = self.to_struct();
        write!(
            f,
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}.{:03}.{:03}.{:03}",
            ts.month,
            ts.day,
            ts.year,
            ts.hour,
            ts.min,
            ts.sec,
            ts.milli_sec,
            ts.micro_sec,
            ts.nano_sec
        )
    }
}
