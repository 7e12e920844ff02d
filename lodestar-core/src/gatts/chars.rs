//! Eddystone Configuration Service characteristic set
//!
//! 16-bit characteristic UUIDs (within the ESCS base UUID) and the
//! per-characteristic payload length rules for slot-data writes.

use crate::traits::registry::FrameType;

pub const UUID_BROADCAST_CAP: u16 = 0x7501;
pub const UUID_ACTIVE_SLOT: u16 = 0x7502;
pub const UUID_ADV_INTERVAL: u16 = 0x7503;
pub const UUID_RADIO_TX_PWR: u16 = 0x7504;
pub const UUID_ADV_TX_PWR: u16 = 0x7505;
pub const UUID_LOCK_STATE: u16 = 0x7506;
pub const UUID_UNLOCK: u16 = 0x7507;
pub const UUID_PUBLIC_ECDH_KEY: u16 = 0x7508;
pub const UUID_EID_ID_KEY: u16 = 0x7509;
pub const UUID_ADV_SLOT_DATA: u16 = 0x750A;
pub const UUID_FACTORY_RESET: u16 = 0x750B;
pub const UUID_REMAIN_CONNECTABLE: u16 = 0x750C;

/// Slot-data write length: frame type + 10-byte namespace + 6-byte instance
pub const UID_WRITE_LEN: usize = 17;
/// Minimum slot-data write length for a URL frame
pub const URL_MIN_WRITE_LEN: usize = 4;
/// Maximum slot-data write length for a URL frame
pub const URL_MAX_WRITE_LEN: usize = 19;
/// Slot-data write length for a TLM frame (frame type only)
pub const TLM_WRITE_LEN: usize = 1;
/// EID slot write carrying a 32-byte public ECDH key plus exponent
pub const EID_ECDH_WRITE_LEN: usize = 34;
/// EID slot write carrying a 16-byte encrypted identity key plus exponent
pub const EID_IDK_WRITE_LEN: usize = 18;
/// Lock-state write carrying the lock byte plus a new 16-byte lock code
pub const LOCK_STATE_NEW_CODE_WRITE_LEN: usize = 17;
/// Synthesized EID read: frame type, scaler, 4-byte clock, 8-byte EID
pub const EID_READ_LEN: usize = 14;
/// Writes above one transfer unit are acknowledged by the transport layer
pub const LONG_WRITE_THRESHOLD: usize = 20;
/// Magic byte arming a factory reset
pub const FACTORY_RESET_MAGIC: u8 = 0x0B;

/// ESCS characteristics mediated by the access controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Characteristic {
    BroadcastCapabilities,
    ActiveSlot,
    AdvInterval,
    RadioTxPower,
    AdvTxPower,
    LockState,
    Unlock,
    PublicEcdhKey,
    EidIdKey,
    AdvSlotData,
    FactoryReset,
    RemainConnectable,
}

impl Characteristic {
    /// Map a 16-bit characteristic UUID delivered by the BLE stack
    pub fn from_uuid(uuid: u16) -> Option<Self> {
        match uuid {
            UUID_BROADCAST_CAP => Some(Characteristic::BroadcastCapabilities),
            UUID_ACTIVE_SLOT => Some(Characteristic::ActiveSlot),
            UUID_ADV_INTERVAL => Some(Characteristic::AdvInterval),
            UUID_RADIO_TX_PWR => Some(Characteristic::RadioTxPower),
            UUID_ADV_TX_PWR => Some(Characteristic::AdvTxPower),
            UUID_LOCK_STATE => Some(Characteristic::LockState),
            UUID_UNLOCK => Some(Characteristic::Unlock),
            UUID_PUBLIC_ECDH_KEY => Some(Characteristic::PublicEcdhKey),
            UUID_EID_ID_KEY => Some(Characteristic::EidIdKey),
            UUID_ADV_SLOT_DATA => Some(Characteristic::AdvSlotData),
            UUID_FACTORY_RESET => Some(Characteristic::FactoryReset),
            UUID_REMAIN_CONNECTABLE => Some(Characteristic::RemainConnectable),
            _ => None,
        }
    }

    /// 16-bit UUID of this characteristic
    pub fn uuid(&self) -> u16 {
        match self {
            Characteristic::BroadcastCapabilities => UUID_BROADCAST_CAP,
            Characteristic::ActiveSlot => UUID_ACTIVE_SLOT,
            Characteristic::AdvInterval => UUID_ADV_INTERVAL,
            Characteristic::RadioTxPower => UUID_RADIO_TX_PWR,
            Characteristic::AdvTxPower => UUID_ADV_TX_PWR,
            Characteristic::LockState => UUID_LOCK_STATE,
            Characteristic::Unlock => UUID_UNLOCK,
            Characteristic::PublicEcdhKey => UUID_PUBLIC_ECDH_KEY,
            Characteristic::EidIdKey => UUID_EID_ID_KEY,
            Characteristic::AdvSlotData => UUID_ADV_SLOT_DATA,
            Characteristic::FactoryReset => UUID_FACTORY_RESET,
            Characteristic::RemainConnectable => UUID_REMAIN_CONNECTABLE,
        }
    }
}

/// Validate a slot-data write payload against its frame type's length rule
///
/// Empty payloads (or the single byte 0) clear the slot and are always
/// valid.
pub fn slot_write_length_is_valid(data: &[u8]) -> bool {
    if data.is_empty() || (data.len() == 1 && data[0] == 0) {
        return true;
    }

    match FrameType::from_tag(data[0]) {
        Some(FrameType::Uid) => data.len() == UID_WRITE_LEN,
        Some(FrameType::Url) => (URL_MIN_WRITE_LEN..=URL_MAX_WRITE_LEN).contains(&data.len()),
        Some(FrameType::Tlm) => data.len() == TLM_WRITE_LEN,
        Some(FrameType::Eid) => {
            data.len() == EID_ECDH_WRITE_LEN || data.len() == EID_IDK_WRITE_LEN
        }
        None => false,
    }
}
