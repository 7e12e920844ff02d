//! Write-side characteristic handling

use super::chars::{
    slot_write_length_is_valid, Characteristic, FACTORY_RESET_MAGIC,
    LOCK_STATE_NEW_CODE_WRITE_LEN, LONG_WRITE_THRESHOLD,
};
use super::{
    AccessController, GattEnv, GattStatus, LockState, WriteReply, LOCK_BYTE_DISABLE_AUTO_RELOCK,
    LOCK_BYTE_LOCK,
};
use crate::error::Error;
use crate::traits::registry::MAX_ADV_SLOTS;
use crate::traits::security::LOCK_KEY_SIZE;

impl AccessController {
    /// Unlock attempt: the only write allowed while locked
    ///
    /// Tokens of exactly the key size are handed to the security module,
    /// which verifies asynchronously and promotes the lock state on
    /// success. Any other length is echoed back unverified; the beacon
    /// simply stays locked.
    pub(super) fn handle_unlock_write<E: GattEnv>(
        &mut self,
        env: &mut E,
        data: &[u8],
    ) -> Result<WriteReply, Error> {
        if let Ok(token) = <&[u8; LOCK_KEY_SIZE]>::try_from(data) {
            env.unlock_verify(token);
        }

        WriteReply::accept(data)
    }

    /// Full characteristic set, writable while unlocked
    pub(super) fn handle_unlocked_write<E: GattEnv>(
        &mut self,
        env: &mut E,
        ch: Characteristic,
        data: &[u8],
    ) -> Result<WriteReply, Error> {
        match ch {
            Characteristic::ActiveSlot => {
                let Some(&slot) = data.first() else {
                    return Ok(WriteReply::Reject(GattStatus::InvalidAttributeLength));
                };
                if usize::from(slot) >= MAX_ADV_SLOTS {
                    // Out-of-range slot indices reuse the length-error
                    // status; inherited wire behavior, central-side tooling
                    // depends on it.
                    return Ok(WriteReply::Reject(GattStatus::InvalidAttributeLength));
                }
                self.active_slot = slot;
                WriteReply::accept(data)
            }

            Characteristic::AdvInterval => {
                let Some(bytes) = data.get(..2) else {
                    return Ok(WriteReply::Reject(GattStatus::InvalidAttributeLength));
                };
                env.set_adv_interval(u16::from_be_bytes([bytes[0], bytes[1]]));
                WriteReply::accept(data)
            }

            Characteristic::RadioTxPower => {
                let Some(&dbm) = data.first() else {
                    return Ok(WriteReply::Reject(GattStatus::InvalidAttributeLength));
                };
                env.set_radio_tx_power(self.active_slot, dbm as i8);
                WriteReply::accept(data)
            }

            Characteristic::AdvTxPower => {
                let Some(&dbm) = data.first() else {
                    return Ok(WriteReply::Reject(GattStatus::InvalidAttributeLength));
                };
                env.set_adv_tx_power(self.active_slot, dbm as i8);
                WriteReply::accept(data)
            }

            Characteristic::LockState => self.handle_lock_state_write(env, data),

            Characteristic::AdvSlotData => self.handle_slot_data_write(env, data),

            Characteristic::FactoryReset => {
                if data.first() == Some(&FACTORY_RESET_MAGIC) {
                    env.factory_reset()?;
                }
                WriteReply::accept(data)
            }

            Characteristic::RemainConnectable => {
                let Some(&on) = data.first() else {
                    return Ok(WriteReply::Reject(GattStatus::InvalidAttributeLength));
                };
                if self.remain_connectable_supported {
                    env.set_remain_connectable(on != 0);
                }
                WriteReply::accept(data)
            }

            // Remaining characteristics carry no write-side action here;
            // the write lands in the GATT database unchanged.
            _ => WriteReply::accept(data),
        }
    }

    /// Lock-state writes: lock, lock with new code, or disable auto-relock
    ///
    /// Ambiguous payloads coerce to a plain lock byte; locking is the
    /// fail-safe interpretation.
    fn handle_lock_state_write<E: GattEnv>(
        &mut self,
        env: &mut E,
        data: &[u8],
    ) -> Result<WriteReply, Error> {
        let stored_byte = match data {
            [LOCK_BYTE_LOCK] | [LOCK_BYTE_DISABLE_AUTO_RELOCK] => data[0],
            [LOCK_BYTE_LOCK, key @ ..] if data.len() == LOCK_STATE_NEW_CODE_WRITE_LEN => {
                // Lock byte plus new code: update the code, store only the
                // lock byte.
                let key: &[u8; LOCK_KEY_SIZE] = key.try_into().map_err(|_| Error::InvalidParam)?;
                env.lock_code_update(key)?;
                LOCK_BYTE_LOCK
            }
            _ => LOCK_BYTE_LOCK,
        };

        if stored_byte == LOCK_BYTE_LOCK {
            self.lock_state = LockState::Locked;
        }

        WriteReply::accept(&[stored_byte])
    }

    /// Slot-data writes: validated per frame type, applied to the registry
    ///
    /// Writes longer than one transfer unit are acknowledged by the
    /// transport, so no decision is returned for them, valid or not.
    fn handle_slot_data_write<E: GattEnv>(
        &mut self,
        env: &mut E,
        data: &[u8],
    ) -> Result<WriteReply, Error> {
        let long_write = data.len() > LONG_WRITE_THRESHOLD;

        if !slot_write_length_is_valid(data) {
            return Ok(if long_write {
                WriteReply::NoReply
            } else {
                WriteReply::Reject(GattStatus::InvalidAttributeLength)
            });
        }

        env.write_slot(self.active_slot, data);
        // Re-assert the interval so the advertiser rebuilds its timing plan
        // around the changed slot set.
        env.set_adv_interval(env.adv_interval());

        Ok(if long_write {
            WriteReply::NoReply
        } else {
            WriteReply::accept(data)?
        })
    }
}
