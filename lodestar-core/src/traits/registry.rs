//! Slot registry trait and frame types
//!
//! The slot registry owns the configured advertising slots and their frame
//! payloads. The timing resolver reads it indirectly (through
//! [`TimingInput`](crate::timing::TimingInput), built by the caller); the
//! GATT access controller reads and mutates it through this trait.

use heapless::Vec;

/// Number of advertising slots the beacon exposes
pub const MAX_ADV_SLOTS: usize = 5;

/// Maximum stored frame length for one slot
pub const MAX_SLOT_FRAME_LEN: usize = 34;

/// Length of the ephemeral identifier within an EID frame
pub const EID_ID_LENGTH: usize = 8;

/// Eddystone frame type tags as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameType {
    Uid,
    Url,
    Tlm,
    Eid,
}

impl FrameType {
    /// Wire tag for this frame type
    pub fn tag(&self) -> u8 {
        match self {
            FrameType::Uid => 0x00,
            FrameType::Url => 0x10,
            FrameType::Tlm => 0x20,
            FrameType::Eid => 0x30,
        }
    }

    /// Parse a wire tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(FrameType::Uid),
            0x10 => Some(FrameType::Url),
            0x20 => Some(FrameType::Tlm),
            0x30 => Some(FrameType::Eid),
            _ => None,
        }
    }
}

/// Current advertisement payload of one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotData {
    pub frame_type: FrameType,
    pub bytes: Vec<u8, MAX_SLOT_FRAME_LEN>,
}

/// Trait for the external slot registry
pub trait SlotRegistry {
    /// Whether `slot_no` holds a configured frame
    fn is_configured(&self, slot_no: u8) -> bool;

    /// Frame type of `slot_no`, if configured
    fn frame_type(&self, slot_no: u8) -> Option<FrameType>;

    /// Current frame payload of `slot_no`
    ///
    /// Returns `None` for an unconfigured slot.
    fn slot_data(&self, slot_no: u8) -> Option<SlotData>;

    /// Ephemeral identifier of an EID slot
    fn eid_identity(&self, slot_no: u8) -> [u8; EID_ID_LENGTH];

    /// Encrypted EID identity key of an EID slot
    fn encrypted_eid_id_key(&self, slot_no: u8) -> [u8; 16];

    /// First configured EID slot, if any
    ///
    /// Used both as the eTLM key source and as the "any EID configured"
    /// predicate.
    fn first_eid_slot(&self) -> Option<u8>;

    /// Radio TX power of `slot_no` in dBm
    fn radio_tx_power(&self, slot_no: u8) -> i8;

    /// Advertised TX power of `slot_no` in dBm
    ///
    /// The custom value if one was written, otherwise the radio TX power.
    fn adv_tx_power(&self, slot_no: u8) -> i8;

    /// Set the radio TX power of `slot_no`
    fn set_radio_tx_power(&mut self, slot_no: u8, dbm: i8);

    /// Set a custom advertised TX power of `slot_no`
    fn set_adv_tx_power(&mut self, slot_no: u8, dbm: i8);

    /// Apply a validated slot-data write
    ///
    /// `data` is the raw characteristic payload; an empty payload (or the
    /// single byte 0) clears the slot.
    fn write_slot(&mut self, slot_no: u8, data: &[u8]);

    /// Re-encrypt the eTLM payload using the key of `eid_slot_no`
    fn refresh_etlm(&mut self, eid_slot_no: u8);
}
