//! Telemetry (TLM) frame builder
//!
//! Maintains the plain TLM frame: a fixed 14-byte layout carrying battery
//! voltage, temperature, the advertisement counter, and uptime in 0.1 s
//! units. Multi-byte fields are big-endian per the Eddystone wire format.
//!
//! The uptime and advertisement-count fields refresh on every
//! [`TlmBuilder::frame`] call; battery voltage and temperature refresh only
//! when their stopwatch fires. Frame type and version are stamped once at
//! construction.

use crate::error::Error;
use crate::stopwatch::{StopwatchId, Stopwatches};
use crate::traits::registry::FrameType;
use crate::traits::{BatterySensor, TemperatureSensor, TickCounter};

/// TLM frame version advertised by plain (unencrypted) telemetry
pub const TLM_VERSION: u8 = 0x00;

/// Total TLM frame length in bytes
pub const TLM_FRAME_LEN: usize = 14;

/// Plain telemetry frame, stored in wire layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TlmFrame {
    bytes: [u8; TLM_FRAME_LEN],
}

impl TlmFrame {
    fn zeroed() -> Self {
        let mut bytes = [0u8; TLM_FRAME_LEN];
        bytes[0] = FrameType::Tlm.tag();
        bytes[1] = TLM_VERSION;
        Self { bytes }
    }

    /// Raw wire bytes
    pub fn as_bytes(&self) -> &[u8; TLM_FRAME_LEN] {
        &self.bytes
    }

    /// Battery voltage field in millivolts
    pub fn vbatt_mv(&self) -> u16 {
        u16::from_be_bytes([self.bytes[2], self.bytes[3]])
    }

    /// Temperature field as 8.8 fixed point
    pub fn temp_raw(&self) -> i16 {
        i16::from_be_bytes([self.bytes[4], self.bytes[5]])
    }

    /// Advertisement counter field
    pub fn adv_cnt(&self) -> u32 {
        u32::from_be_bytes([self.bytes[6], self.bytes[7], self.bytes[8], self.bytes[9]])
    }

    /// Uptime field in 0.1 s units
    pub fn sec_cnt(&self) -> u32 {
        u32::from_be_bytes([self.bytes[10], self.bytes[11], self.bytes[12], self.bytes[13]])
    }

    fn set_vbatt(&mut self, millivolts: u16) {
        self.bytes[2..4].copy_from_slice(&millivolts.to_be_bytes());
    }

    /// Store a 0.25 C reading as 8.8 fixed point
    ///
    /// The integer part is the reading shifted right by two; the fractional
    /// byte keeps 0.25 C resolution in its top two bits.
    fn set_temp(&mut self, quarter_celsius: i16) {
        let t = i32::from(quarter_celsius);
        self.bytes[4] = (t >> 2) as u8;
        self.bytes[5] = (t << 6) as u8;
    }

    fn set_adv_cnt(&mut self, count: u32) {
        self.bytes[6..10].copy_from_slice(&count.to_be_bytes());
    }

    fn set_sec_cnt(&mut self, deciseconds: u32) {
        self.bytes[10..14].copy_from_slice(&deciseconds.to_be_bytes());
    }
}

/// Builder keeping the telemetry frame current between advertisements
#[derive(Debug)]
pub struct TlmBuilder {
    frame: TlmFrame,
    adv_cnt: u32,
    uptime_100ms: u32,
    uptime_sw: StopwatchId,
    refresh_sw: StopwatchId,
}

impl TlmBuilder {
    /// Create the builder, take the initial sensor sample, and register the
    /// two cadence stopwatches
    ///
    /// `ticks_100ms` is the tick count of the 0.1 s uptime cadence;
    /// `refresh_ticks` the battery/temperature refresh cadence. Fails with
    /// [`Error::InvalidState`] if the stopwatch table is full.
    pub fn new<C, B, T>(
        stopwatches: &mut Stopwatches<C>,
        battery: &mut B,
        thermometer: &mut T,
        ticks_100ms: u32,
        refresh_ticks: u32,
    ) -> Result<Self, Error>
    where
        C: TickCounter,
        B: BatterySensor,
        T: TemperatureSensor,
    {
        let uptime_sw = stopwatches.create(ticks_100ms)?;
        let refresh_sw = stopwatches.create(refresh_ticks)?;

        let mut frame = TlmFrame::zeroed();
        frame.set_vbatt(battery.read_millivolts());
        frame.set_temp(thermometer.read_quarter_celsius());

        Ok(Self {
            frame,
            adv_cnt: 0,
            uptime_100ms: 0,
            uptime_sw,
            refresh_sw,
        })
    }

    /// Count one advertisement
    ///
    /// Called once per transmitted frame regardless of frame type.
    pub fn adv_cnt_inc(&mut self) {
        self.adv_cnt = self.adv_cnt.wrapping_add(1);
    }

    /// Refresh and copy the telemetry frame
    ///
    /// Uptime and advertisement count always refresh; battery voltage and
    /// temperature only when the refresh stopwatch has fired.
    pub fn frame<C, B, T>(
        &mut self,
        stopwatches: &mut Stopwatches<C>,
        battery: &mut B,
        thermometer: &mut T,
    ) -> TlmFrame
    where
        C: TickCounter,
        B: BatterySensor,
        T: TemperatureSensor,
    {
        self.uptime_100ms = self
            .uptime_100ms
            .wrapping_add(stopwatches.check(self.uptime_sw));
        self.frame.set_sec_cnt(self.uptime_100ms);
        self.frame.set_adv_cnt(self.adv_cnt);

        if stopwatches.check(self.refresh_sw) > 0 {
            self.frame.set_vbatt(battery.read_millivolts());
            self.frame.set_temp(thermometer.read_quarter_celsius());
        }

        self.frame
    }
}
