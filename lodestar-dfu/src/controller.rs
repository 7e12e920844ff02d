//! Boot decision state machine
//!
//! One pass per boot: continue any interrupted update, evaluate the
//! enter-bootloader request, then either hand control to the application
//! or bring up the transports and block on the event source until a reset
//! is delivered. The enter check is an injected predicate; a stock one is
//! provided as [`default_enter_check`].

use crate::error::DfuError;
use crate::settings::DfuSettings;
use crate::transport::TransportRegistry;

/// Event delivered to the bootloader wait loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DfuEvent {
    /// A transport has work queued; the event source already dispatched it
    Transport,
    /// Reset requested; the wait loop ends and the caller reboots
    Reset,
}

/// Source of bootloader events
///
/// On hardware this wraps the wait-for-interrupt / scheduler-drain cycle;
/// tests inject a scripted sequence ending in [`DfuEvent::Reset`].
pub trait EventSource {
    fn next_event(&mut self) -> DfuEvent;
}

/// Why the bootloader stayed resident
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnterReason {
    /// An interrupted update had to be continued (or its continuation
    /// failed)
    UpdateContinuation,
    /// The enter check fired: button held or buttonless request persisted
    HostRequest,
    /// No valid application image to jump to
    InvalidApplication,
}

/// Terminal outcome of one boot pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootOutcome {
    /// Hand control to the application image
    JumpToApplication,
    /// A reset event ended the bootloader wait loop
    Reset(EnterReason),
}

/// Stock enter check: physical button or the persisted buttonless flag
///
/// The flag read consumes the request, so a buttonless entry fires on
/// exactly one boot.
pub fn default_enter_check<S: DfuSettings>(button_pressed: bool, settings: &mut S) -> bool {
    if button_pressed {
        return true;
    }
    settings.take_buttonless_entry()
}

/// Run one boot pass
///
/// Transport-init failure on the enter path is terminal for this boot
/// cycle and propagates without retry. When the bootloader stays resident
/// this blocks on `events` until it delivers [`DfuEvent::Reset`].
pub fn run<S, E, F>(
    settings: &mut S,
    transports: &mut TransportRegistry<'_>,
    events: &mut E,
    enter_check: F,
) -> Result<BootOutcome, DfuError>
where
    S: DfuSettings,
    E: EventSource,
    F: FnOnce(&mut S) -> bool,
{
    let mut reason = match settings.continue_update() {
        Ok(true) => Some(EnterReason::UpdateContinuation),
        Ok(false) => None,
        // A failed continuation keeps the bootloader resident so the
        // update can be repaired.
        Err(_) => Some(EnterReason::UpdateContinuation),
    };

    // Evaluated even when continuation already decided, so a one-shot
    // buttonless request is always consumed on the boot it targeted.
    if enter_check(settings) && reason.is_none() {
        reason = Some(EnterReason::HostRequest);
    }

    if reason.is_none() && !settings.app_is_valid() {
        reason = Some(EnterReason::InvalidApplication);
    }

    let Some(reason) = reason else {
        return Ok(BootOutcome::JumpToApplication);
    };

    transports.init_all()?;

    loop {
        match events.next_event() {
            DfuEvent::Transport => {}
            DfuEvent::Reset => return Ok(BootOutcome::Reset(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::DfuTransport;
    use std::vec::Vec;

    struct MockSettings {
        pending_update: Result<bool, DfuError>,
        buttonless: bool,
        app_valid: bool,
        buttonless_reads: u32,
    }

    impl MockSettings {
        fn idle(app_valid: bool) -> Self {
            Self {
                pending_update: Ok(false),
                buttonless: false,
                app_valid,
                buttonless_reads: 0,
            }
        }
    }

    impl DfuSettings for MockSettings {
        fn continue_update(&mut self) -> Result<bool, DfuError> {
            self.pending_update
        }

        fn take_buttonless_entry(&mut self) -> bool {
            self.buttonless_reads += 1;
            core::mem::take(&mut self.buttonless)
        }

        fn app_is_valid(&self) -> bool {
            self.app_valid
        }
    }

    struct MockTransport {
        inits: u32,
        fail: bool,
    }

    impl DfuTransport for MockTransport {
        fn init(&mut self) -> Result<(), DfuError> {
            self.inits += 1;
            if self.fail {
                Err(DfuError::Transport)
            } else {
                Ok(())
            }
        }

        fn close(&mut self) -> Result<(), DfuError> {
            Ok(())
        }
    }

    struct Script {
        events: Vec<DfuEvent>,
    }

    impl Script {
        fn new(events: &[DfuEvent]) -> Self {
            let mut events: Vec<DfuEvent> = events.to_vec();
            events.reverse();
            Self { events }
        }
    }

    impl EventSource for Script {
        fn next_event(&mut self) -> DfuEvent {
            self.events.pop().expect("event script exhausted")
        }
    }

    #[test]
    fn test_valid_app_and_no_request_jumps() {
        let mut settings = MockSettings::idle(true);
        let mut transport = MockTransport { inits: 0, fail: false };
        let mut registry = TransportRegistry::new();
        registry.register(&mut transport).unwrap();
        let mut events = Script::new(&[]);

        let outcome = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(false, s)
        })
        .unwrap();

        assert_eq!(outcome, BootOutcome::JumpToApplication);
        drop(registry);
        // Transports never come up on the jump path.
        assert_eq!(transport.inits, 0);
    }

    #[test]
    fn test_button_press_enters_bootloader() {
        let mut settings = MockSettings::idle(true);
        let mut transport = MockTransport { inits: 0, fail: false };
        let mut registry = TransportRegistry::new();
        registry.register(&mut transport).unwrap();
        let mut events = Script::new(&[DfuEvent::Transport, DfuEvent::Reset]);

        let outcome = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(true, s)
        })
        .unwrap();

        assert_eq!(outcome, BootOutcome::Reset(EnterReason::HostRequest));
        drop(registry);
        assert_eq!(transport.inits, 1);
    }

    #[test]
    fn test_buttonless_request_fires_once() {
        let mut settings = MockSettings::idle(true);
        settings.buttonless = true;
        let mut registry = TransportRegistry::new();
        let mut events = Script::new(&[DfuEvent::Reset]);

        let outcome = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(false, s)
        })
        .unwrap();
        assert_eq!(outcome, BootOutcome::Reset(EnterReason::HostRequest));

        // The flag was consumed; the next boot jumps straight through.
        let mut events = Script::new(&[]);
        let outcome = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(false, s)
        })
        .unwrap();
        assert_eq!(outcome, BootOutcome::JumpToApplication);
        assert_eq!(settings.buttonless_reads, 2);
    }

    #[test]
    fn test_pending_update_continues_into_bootloader() {
        let mut settings = MockSettings::idle(true);
        settings.pending_update = Ok(true);
        let mut registry = TransportRegistry::new();
        let mut events = Script::new(&[DfuEvent::Reset]);

        let outcome = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(false, s)
        })
        .unwrap();
        assert_eq!(outcome, BootOutcome::Reset(EnterReason::UpdateContinuation));
    }

    #[test]
    fn test_failed_continuation_forces_entry() {
        let mut settings = MockSettings::idle(true);
        settings.pending_update = Err(DfuError::Settings);
        let mut registry = TransportRegistry::new();
        let mut events = Script::new(&[DfuEvent::Reset]);

        let outcome = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(false, s)
        })
        .unwrap();
        assert_eq!(outcome, BootOutcome::Reset(EnterReason::UpdateContinuation));
    }

    #[test]
    fn test_invalid_app_forces_entry() {
        let mut settings = MockSettings::idle(false);
        let mut registry = TransportRegistry::new();
        let mut events = Script::new(&[DfuEvent::Transport, DfuEvent::Transport, DfuEvent::Reset]);

        let outcome = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(false, s)
        })
        .unwrap();
        assert_eq!(outcome, BootOutcome::Reset(EnterReason::InvalidApplication));
    }

    #[test]
    fn test_enter_check_runs_even_when_continuation_decided() {
        let mut settings = MockSettings::idle(true);
        settings.pending_update = Ok(true);
        settings.buttonless = true;
        let mut registry = TransportRegistry::new();
        let mut events = Script::new(&[DfuEvent::Reset]);

        let outcome = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(false, s)
        })
        .unwrap();

        // Continuation wins the reason, but the one-shot flag is consumed.
        assert_eq!(outcome, BootOutcome::Reset(EnterReason::UpdateContinuation));
        assert!(!settings.buttonless);
        assert_eq!(settings.buttonless_reads, 1);
    }

    #[test]
    fn test_transport_init_failure_is_terminal() {
        let mut settings = MockSettings::idle(false);
        let mut transport = MockTransport { inits: 0, fail: true };
        let mut registry = TransportRegistry::new();
        registry.register(&mut transport).unwrap();
        let mut events = Script::new(&[]);

        let result = run(&mut settings, &mut registry, &mut events, |s| {
            default_enter_check(false, s)
        });
        assert_eq!(result, Err(DfuError::Transport));
    }
}
