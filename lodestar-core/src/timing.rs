//! Advertising timing resolver
//!
//! Computes the per-frame delay table for one round-robin advertisement
//! cycle over the configured slots. When telemetry and at least one EID
//! slot are configured, an encrypted telemetry frame (eTLM) is interleaved
//! directly after each EID frame and the TLM slot itself is dropped from
//! the cycle; the eTLM borrows its airtime from the associated EID frame.
//!
//! The result is rebuilt from scratch whenever the slot configuration or
//! the advertising interval changes; it is never mutated in place.

use heapless::Vec;

use crate::error::Error;
use crate::traits::registry::MAX_ADV_SLOTS;

/// Delay between an EID frame and its eTLM twin, in milliseconds
pub const ETLM_SPACING_MS: u16 = 50;

/// Floor for the delay following an eTLM frame, in milliseconds
pub const FRAME_SPACING_MS_MIN: u16 = 25;

/// Upper bound on timing entries: every EID slot may emit an eTLM twin
pub const MAX_TIMING_ENTRIES: usize = MAX_ADV_SLOTS * 2;

/// Input to one resolve pass, constructed fresh by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingInput {
    /// Advertising interval for one full cycle, in milliseconds
    pub adv_interval_ms: u16,
    /// Configured slot numbers, in configuration order
    pub slots: Vec<u8, MAX_ADV_SLOTS>,
    /// Subset of `slots` holding EID frames
    pub eid_slots: Vec<u8, MAX_ADV_SLOTS>,
    /// Whether a TLM slot is configured
    pub tlm_configured: bool,
    /// Slot number of the TLM slot (meaningful when `tlm_configured`)
    pub tlm_slot: u8,
}

impl TimingInput {
    /// Whether the cycle must interleave eTLM frames
    pub fn etlm_required(&self) -> bool {
        self.tlm_configured && !self.eid_slots.is_empty()
    }
}

/// One scheduled frame: which slot, whether it is the synthetic eTLM twin,
/// and the delay to wait after transmitting it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvTiming {
    /// Source slot number; for an eTLM entry this is the EID slot whose key
    /// encrypts the telemetry
    pub slot_no: u8,
    /// Synthetic eTLM frame occupying the cycle position of its EID slot
    pub is_etlm: bool,
    /// Delay until the next frame, in milliseconds
    pub delay_ms: u16,
}

/// Ordered delay table for one advertisement cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingResult {
    pub entries: Vec<AdvTiming, MAX_TIMING_ENTRIES>,
}

/// Delay to use after each non-eTLM advertisement
///
/// The TLM slot is not counted when eTLM frames are interleaved; its
/// airtime rides on the EID frames.
fn adv_delay(adv_interval: u16, num_slots: usize, etlm_required: bool) -> u16 {
    adv_interval / (num_slots - usize::from(etlm_required)) as u16
}

/// Resolve the delay table for one advertisement cycle
///
/// Fails with [`Error::InvalidParam`] if no slots are configured. When eTLM
/// frames are required the caller must supply at least two slots (the TLM
/// slot plus one other); a lone TLM slot is a degenerate configuration the
/// registry never produces.
pub fn resolve(input: &TimingInput) -> Result<TimingResult, Error> {
    if input.slots.is_empty() {
        return Err(Error::InvalidParam);
    }

    let etlm_required = input.etlm_required();
    let base_delay = adv_delay(input.adv_interval_ms, input.slots.len(), etlm_required);
    let last_non_etlm_index = input.slots.len() - usize::from(etlm_required) - 1;

    let mut entries: Vec<AdvTiming, MAX_TIMING_ENTRIES> = Vec::new();

    for (i, &slot_no) in input.slots.iter().enumerate() {
        if etlm_required && slot_no == input.tlm_slot {
            continue;
        }

        // The last non-eTLM slot gets no delay here; the final zeroing pass
        // owns it. If an eTLM follows this frame the value is overwritten
        // below either way.
        let delay_ms = if i < last_non_etlm_index { base_delay } else { 0 };

        let frame_index = entries.len();
        entries
            .push(AdvTiming {
                slot_no,
                is_etlm: false,
                delay_ms,
            })
            .map_err(|_| Error::InvalidParam)?;

        if etlm_required && input.eid_slots.contains(&slot_no) {
            // The EID frame now waits only the EID-to-eTLM spacing; the
            // eTLM twin inherits the remainder of the base delay.
            entries[frame_index].delay_ms = ETLM_SPACING_MS;

            let etlm_delay = if base_delay > ETLM_SPACING_MS {
                base_delay - ETLM_SPACING_MS
            } else {
                FRAME_SPACING_MS_MIN
            };

            entries
                .push(AdvTiming {
                    slot_no,
                    is_etlm: true,
                    delay_ms: etlm_delay,
                })
                .map_err(|_| Error::InvalidParam)?;
        }
    }

    // The cycle restarts immediately after the final frame.
    if let Some(last) = entries.last_mut() {
        last.delay_ms = 0;
    }

    Ok(TimingResult { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(
        adv_interval_ms: u16,
        slots: &[u8],
        eid_slots: &[u8],
        tlm_slot: Option<u8>,
    ) -> TimingInput {
        TimingInput {
            adv_interval_ms,
            slots: Vec::from_slice(slots).unwrap(),
            eid_slots: Vec::from_slice(eid_slots).unwrap(),
            tlm_configured: tlm_slot.is_some(),
            tlm_slot: tlm_slot.unwrap_or(0),
        }
    }

    #[test]
    fn test_empty_slot_list_rejected() {
        assert_eq!(resolve(&input(1000, &[], &[], None)), Err(Error::InvalidParam));
    }

    #[test]
    fn test_single_slot() {
        let result = resolve(&input(1000, &[0], &[], None)).unwrap();
        assert_eq!(result.entries.len(), 1);
        assert_eq!(
            result.entries[0],
            AdvTiming {
                slot_no: 0,
                is_etlm: false,
                delay_ms: 0
            }
        );
    }

    #[test]
    fn test_plain_round_robin() {
        let result = resolve(&input(900, &[0, 1, 2], &[], None)).unwrap();
        assert_eq!(result.entries.len(), 3);
        assert_eq!(result.entries[0].delay_ms, 300);
        assert_eq!(result.entries[1].delay_ms, 300);
        assert_eq!(result.entries[2].delay_ms, 0);
        assert!(result.entries.iter().all(|e| !e.is_etlm));
    }

    #[test]
    fn test_tlm_without_eid_is_ordinary_slot() {
        // TLM configured but no EID slots: no eTLM, TLM advertises in its
        // own cycle position.
        let result = resolve(&input(900, &[0, 2], &[], Some(2))).unwrap();
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.entries[0].slot_no, 0);
        assert_eq!(result.entries[1].slot_no, 2);
        assert!(result.entries.iter().all(|e| !e.is_etlm));
    }

    #[test]
    fn test_etlm_interleaving() {
        // UID(0), EID(1), TLM(2): the TLM slot vanishes from the cycle, the
        // EID frame waits ETLM_SPACING_MS, and the eTLM twin (last entry)
        // is forced to zero delay.
        let result = resolve(&input(1000, &[0, 1, 2], &[1], Some(2))).unwrap();
        assert_eq!(result.entries.len(), 3);
        assert_eq!(
            result.entries[0],
            AdvTiming {
                slot_no: 0,
                is_etlm: false,
                delay_ms: 500
            }
        );
        assert_eq!(
            result.entries[1],
            AdvTiming {
                slot_no: 1,
                is_etlm: false,
                delay_ms: ETLM_SPACING_MS
            }
        );
        assert_eq!(
            result.entries[2],
            AdvTiming {
                slot_no: 1,
                is_etlm: true,
                delay_ms: 0
            }
        );
    }

    #[test]
    fn test_etlm_mid_cycle_inherits_remainder() {
        // EID(0), UID(1), TLM(2): the eTLM twin is not last, so it keeps
        // base_delay - ETLM_SPACING_MS.
        let result = resolve(&input(1000, &[0, 1, 2], &[0], Some(2))).unwrap();
        assert_eq!(result.entries.len(), 3);
        assert_eq!(result.entries[0].slot_no, 0);
        assert_eq!(result.entries[0].delay_ms, ETLM_SPACING_MS);
        assert_eq!(
            result.entries[1],
            AdvTiming {
                slot_no: 0,
                is_etlm: true,
                delay_ms: 500 - ETLM_SPACING_MS
            }
        );
        assert_eq!(
            result.entries[2],
            AdvTiming {
                slot_no: 1,
                is_etlm: false,
                delay_ms: 0
            }
        );
    }

    #[test]
    fn test_etlm_spacing_floor() {
        // Base delay at or below the spacing: the eTLM delay falls back to
        // the configured floor (unless zeroed as the last entry).
        let result = resolve(&input(90, &[0, 1, 2], &[0], Some(2))).unwrap();
        assert!(result.entries[1].is_etlm);
        assert_eq!(result.entries[1].delay_ms, FRAME_SPACING_MS_MIN);
    }

    #[test]
    fn test_multiple_eid_slots() {
        let result = resolve(&input(1500, &[0, 1, 2, 3], &[0, 2], Some(3))).unwrap();
        // 3 non-TLM slots + 2 eTLM twins.
        assert_eq!(result.entries.len(), 5);
        let etlm_count = result.entries.iter().filter(|e| e.is_etlm).count();
        assert_eq!(etlm_count, 2);

        // Each eTLM entry directly follows its EID frame.
        for pair in result.entries.windows(2) {
            if pair[1].is_etlm {
                assert!(!pair[0].is_etlm);
                assert_eq!(pair[0].slot_no, pair[1].slot_no);
                assert_eq!(pair[0].delay_ms, ETLM_SPACING_MS);
            }
        }
    }

    #[test]
    fn test_last_entry_always_zero() {
        let cases = [
            input(1000, &[0], &[], None),
            input(1000, &[0, 1, 2], &[], None),
            input(1000, &[0, 1, 2], &[1], Some(2)),
            input(1000, &[0, 1, 2], &[0], Some(2)),
        ];
        for case in &cases {
            let result = resolve(case).unwrap();
            assert_eq!(result.entries.last().unwrap().delay_ms, 0);
        }
    }

    proptest! {
        #[test]
        fn prop_no_etlm_sum_and_length(
            adv_interval in 100u16..10_000,
            num_slots in 1usize..=MAX_ADV_SLOTS,
        ) {
            let slots: std::vec::Vec<u8> = (0..num_slots as u8).collect();
            let result = resolve(&input(adv_interval, &slots, &[], None)).unwrap();

            prop_assert_eq!(result.entries.len(), num_slots);

            // Every entry waits base_delay except the zeroed last one.
            let base = adv_interval / num_slots as u16;
            let sum: u32 = result.entries.iter().map(|e| u32::from(e.delay_ms)).sum();
            prop_assert_eq!(sum, u32::from(base) * (num_slots as u32 - 1));
        }

        #[test]
        fn prop_etlm_length_and_pairing(
            adv_interval in 200u16..10_000,
            num_eid in 1usize..MAX_ADV_SLOTS - 1,
        ) {
            // Slots 0..n-1 are EID, slot n is TLM, plus one UID slot before it.
            let mut slots: std::vec::Vec<u8> = (0..num_eid as u8).collect();
            let uid_slot = num_eid as u8;
            let tlm_slot = num_eid as u8 + 1;
            slots.push(uid_slot);
            slots.push(tlm_slot);
            let eid_slots: std::vec::Vec<u8> = (0..num_eid as u8).collect();

            let result = resolve(&input(adv_interval, &slots, &eid_slots, Some(tlm_slot))).unwrap();

            // num_slots + num_eid - 1: the TLM slot consumes no entry.
            prop_assert_eq!(result.entries.len(), slots.len() + num_eid - 1);

            for (i, entry) in result.entries.iter().enumerate() {
                if entry.is_etlm {
                    prop_assert!(i > 0);
                    prop_assert_eq!(result.entries[i - 1].slot_no, entry.slot_no);
                    prop_assert!(!result.entries[i - 1].is_etlm);
                }
            }
        }

        #[test]
        fn prop_resolve_is_idempotent(
            adv_interval in 100u16..10_000,
            num_slots in 2usize..=MAX_ADV_SLOTS,
        ) {
            let slots: std::vec::Vec<u8> = (0..num_slots as u8).collect();
            let case = input(adv_interval, &slots, &[0], Some(num_slots as u8 - 1));
            let first = resolve(&case).unwrap();
            let second = resolve(&case).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
