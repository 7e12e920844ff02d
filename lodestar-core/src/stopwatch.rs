//! Multiplexed elapsed-interval stopwatch
//!
//! A fixed table of interval counters sharing one wrapping tick counter.
//! Each user registers once at init with its interval length and then polls
//! [`Stopwatches::check`], which reports how many whole intervals elapsed
//! since the last non-zero report.
//!
//! When an interval fires, the stored reference tick snaps to the latest
//! exact interval boundary not exceeding the current counter value. This
//! re-synchronizes phase instead of letting late polls drift the schedule.

use crate::error::Error;
use crate::traits::TickCounter;

/// Maximum number of concurrently registered stopwatch users
pub const MAX_STOPWATCH_USERS: usize = 4;

/// Handle to one registered stopwatch
///
/// Only obtainable from [`Stopwatches::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StopwatchId(u8);

#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Interval length in ticks; zero marks an unused table entry
    ticks_wrap: u32,
    /// Tick value at the last non-zero check, snapped to an interval boundary
    last_returned: u32,
}

const UNUSED: Entry = Entry {
    ticks_wrap: 0,
    last_returned: 0,
};

/// Table of registered stopwatches sharing one tick counter
#[derive(Debug)]
pub struct Stopwatches<C: TickCounter> {
    counter: C,
    entries: [Entry; MAX_STOPWATCH_USERS],
    used: u8,
}

impl<C: TickCounter> Stopwatches<C> {
    /// Create an empty stopwatch table over `counter`
    pub fn new(counter: C) -> Self {
        Self {
            counter,
            entries: [UNUSED; MAX_STOPWATCH_USERS],
            used: 0,
        }
    }

    /// Register a new stopwatch firing every `ticks_wrap` ticks
    ///
    /// Returns [`Error::InvalidParam`] for a zero interval (zero is the
    /// unused-entry sentinel) and [`Error::InvalidState`] once
    /// [`MAX_STOPWATCH_USERS`] stopwatches exist.
    pub fn create(&mut self, ticks_wrap: u32) -> Result<StopwatchId, Error> {
        if ticks_wrap == 0 {
            return Err(Error::InvalidParam);
        }
        if usize::from(self.used) == MAX_STOPWATCH_USERS {
            return Err(Error::InvalidState);
        }

        let id = self.used;
        self.entries[usize::from(id)] = Entry {
            ticks_wrap,
            last_returned: 0,
        };
        self.used += 1;

        Ok(StopwatchId(id))
    }

    /// Number of whole intervals elapsed since the last non-zero check
    ///
    /// Returns 0 while the interval has not yet completed; otherwise returns
    /// the interval count and snaps the reference tick to the latest
    /// interval boundary.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a created stopwatch. Ids are only
    /// handed out by [`Stopwatches::create`], so this is a programming
    /// error, not a runtime condition.
    pub fn check(&mut self, id: StopwatchId) -> u32 {
        let entry = &mut self.entries[usize::from(id.0)];
        assert!(entry.ticks_wrap != 0, "stopwatch id not created");

        let current = self.counter.ticks();
        let diff = current.wrapping_sub(entry.last_returned) & self.counter.counter_mask();

        if diff >= entry.ticks_wrap {
            entry.last_returned = (current / entry.ticks_wrap) * entry.ticks_wrap;
            diff / entry.ticks_wrap
        } else {
            0
        }
    }

    /// Shared access to the underlying tick counter
    pub fn counter(&self) -> &C {
        &self.counter
    }
}
