//! Read-side characteristic handling

use super::chars::{Characteristic, EID_READ_LEN};
use super::{AccessController, GattEnv, GattStatus, ReadReply};
use crate::error::Error;
use crate::traits::registry::FrameType;
use crate::traits::security::LOCK_KEY_SIZE;

impl AccessController {
    /// Reads allowed while the beacon is locked
    ///
    /// Only the remain-connectable capability and the lock state leak
    /// through the lock.
    pub(super) fn handle_locked_read(&self, ch: Characteristic) -> Result<ReadReply, Error> {
        match ch {
            Characteristic::RemainConnectable => {
                ReadReply::value(&[u8::from(self.remain_connectable_supported)])
            }
            Characteristic::LockState => ReadReply::value(&[self.lock_state.byte()]),
            _ => Ok(ReadReply::Rejected(GattStatus::ReadNotPermitted)),
        }
    }

    /// Reading the unlock characteristic while locked arms the challenge
    ///
    /// A fresh random challenge is generated, snapshotted by the security
    /// module, and served to the central; the following unlock write is
    /// verified against it.
    pub(super) fn handle_unlock_read<E: GattEnv>(&self, env: &mut E) -> Result<ReadReply, Error> {
        let mut challenge = [0u8; LOCK_KEY_SIZE];
        env.random_challenge(&mut challenge)?;
        env.unlock_prepare(&challenge);

        ReadReply::value(&challenge)
    }

    /// Full characteristic set, readable while unlocked
    pub(super) fn handle_unlocked_read<E: GattEnv>(
        &self,
        env: &mut E,
        ch: Characteristic,
    ) -> Result<ReadReply, Error> {
        match ch {
            // Values owned by the GATT database, served as stored.
            Characteristic::BroadcastCapabilities | Characteristic::PublicEcdhKey => {
                Ok(ReadReply::Stored)
            }

            Characteristic::ActiveSlot => ReadReply::value(&[self.active_slot]),

            Characteristic::LockState => ReadReply::value(&[self.lock_state.byte()]),

            Characteristic::AdvInterval => {
                ReadReply::value(&env.adv_interval().to_be_bytes())
            }

            Characteristic::RadioTxPower => {
                ReadReply::value(&[env.radio_tx_power(self.active_slot) as u8])
            }

            Characteristic::AdvTxPower => {
                ReadReply::value(&[env.adv_tx_power(self.active_slot) as u8])
            }

            Characteristic::RemainConnectable => {
                ReadReply::value(&[u8::from(self.remain_connectable_supported)])
            }

            Characteristic::EidIdKey => {
                if env.is_configured(self.active_slot)
                    && env.frame_type(self.active_slot) == Some(FrameType::Eid)
                {
                    ReadReply::value(&env.encrypted_eid_id_key(self.active_slot))
                } else {
                    Ok(ReadReply::Rejected(GattStatus::ReadNotPermitted))
                }
            }

            Characteristic::AdvSlotData => self.read_adv_slot(env),

            // Unlock is rejected before dispatch; the rest have no
            // read-side meaning.
            _ => Err(Error::InvalidParam),
        }
    }

    /// Serve the active slot's advertisement data
    ///
    /// EID slots serve a synthesized view (frame type, scaler, clock,
    /// ephemeral id) instead of raw frame bytes. Reading the TLM slot while
    /// any EID slot is configured refreshes the eTLM payload first, using
    /// the first EID slot's key.
    fn read_adv_slot<E: GattEnv>(&self, env: &mut E) -> Result<ReadReply, Error> {
        if env.frame_type(self.active_slot) == Some(FrameType::Eid) {
            let mut buf = [0u8; EID_READ_LEN];
            buf[0] = FrameType::Eid.tag();
            buf[1] = env.eid_scaler(self.active_slot);
            buf[2..6].copy_from_slice(&env.eid_clock(self.active_slot).to_be_bytes());
            buf[6..].copy_from_slice(&env.eid_identity(self.active_slot));

            return ReadReply::value(&buf);
        }

        if let Some(eid_slot) = env.first_eid_slot() {
            if env.frame_type(self.active_slot) == Some(FrameType::Tlm) {
                env.refresh_etlm(eid_slot);
            }
        }

        match env.slot_data(self.active_slot) {
            Some(data) => ReadReply::value(&data.bytes),
            // An unconfigured slot reads back empty.
            None => ReadReply::value(&[]),
        }
    }
}
