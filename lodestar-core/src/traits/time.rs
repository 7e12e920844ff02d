//! Monotonic tick counter trait

/// Trait for the wrapping monotonic tick counter driving the stopwatch
///
/// Implementations typically read a low-power RTC that wraps at a fixed
/// width. The default mask matches a 24-bit counter.
pub trait TickCounter {
    /// Read the current counter value
    ///
    /// The value wraps at `counter_mask()`; callers must use
    /// [`TickCounter::ticks_since`] for differences.
    fn ticks(&self) -> u32;

    /// Bit mask of the counter width (all-ones at the wrap boundary)
    fn counter_mask(&self) -> u32 {
        0x00FF_FFFF
    }

    /// Wraparound-safe difference between the current counter and `earlier`
    fn ticks_since(&self, earlier: u32) -> u32 {
        self.ticks().wrapping_sub(earlier) & self.counter_mask()
    }
}
