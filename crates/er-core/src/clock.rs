//! Wall-clock source for queue timestamps.
//!
//! Schedulers never call `Utc::now()` directly; they ask a [`Clock`].  The
//! service runs on [`SystemClock`]; tests drive a [`ManualClock`] forward by
//! hand so wait-time arithmetic is exact.

use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

/// Timestamp type used throughout the workspace.
pub type Timestamp = DateTime<Utc>;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Reads the host's real-time clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Interior mutability lets a test hold `&ManualClock` inside a scheduler
/// and still advance it between operations.
#[derive(Clone, Debug)]
pub struct ManualClock {
    current: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self { current: Cell::new(start) }
    }

    /// Start at the Unix epoch plus `secs` seconds.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self::new(DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default())
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.current.set(self.current.get() + Duration::minutes(minutes));
    }

    pub fn advance_secs(&self, secs: i64) {
        self.current.set(self.current.get() + Duration::seconds(secs));
    }

    pub fn set(&self, at: Timestamp) {
        self.current.set(at);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Timestamp {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Whole minutes elapsed from `since` to `now`, floored at zero.
pub fn whole_minutes_between(since: Timestamp, now: Timestamp) -> u64 {
    (now - since).num_minutes().max(0) as u64
}
