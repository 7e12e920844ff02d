//! Advertiser loop trait
//!
//! The advertiser loop owns the radio schedule. It consumes the
//! [`TimingResult`](crate::timing::TimingResult) produced by the resolver;
//! the core never transmits anything itself.

/// Trait for the external advertiser loop
pub trait Advertiser {
    /// Currently configured advertising interval in milliseconds
    fn adv_interval(&self) -> u16;

    /// Set the advertising interval in milliseconds
    ///
    /// Implementations clamp to their supported range and rebuild the
    /// timing plan.
    fn set_adv_interval(&mut self, interval_ms: u16);

    /// Keep the beacon connectable after disconnect
    fn set_remain_connectable(&mut self, on: bool);
}
