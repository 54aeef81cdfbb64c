// ABOUTME: Clock abstraction providing "now" and local calendar-day boundaries
// ABOUTME: System clock follows the host timezone; fixed clock makes day logic deterministic in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

//! Local day boundaries are resolved at call time through a [`Clock`], never
//! cached on the observation, so a timezone change moves day boundaries the
//! next time anything is aggregated.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Source of the current instant and of local day-boundary semantics
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Local calendar day containing `instant` (start-of-day truncation)
    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate;

    /// Local calendar day containing "now"
    fn today(&self) -> NaiveDate {
        self.local_day(self.now())
    }
}

/// Wall clock in the host's current local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }
}

/// Frozen clock pinned to an instant and a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Create a clock frozen at `now` in the given offset
    #[must_use]
    pub const fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    /// Create a clock frozen at `now` in UTC
    #[must_use]
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    /// Same instant observed from a different timezone
    #[must_use]
    pub const fn with_offset(self, offset: FixedOffset) -> Self {
        Self {
            now: self.now,
            offset,
        }
    }

    /// Clock moved forward (or backward, for negative durations)
    #[must_use]
    pub fn advanced_by(self, duration: Duration) -> Self {
        Self {
            now: self.now + duration,
            offset: self.offset,
        }
    }

    /// Offset this clock resolves local days in
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}
