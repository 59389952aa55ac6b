//! # Alarm sequencer
//! Decides once per tick, in display mode, what the buzzer, the indicator and the blind do.
//!
//! The decision is a priority chain, the first matching condition wins:
//! 1. alarm enabled and alarm time equals the clock (hours, minutes, seconds): raise the bell
//! 2. snooze released: silence the bell and the outputs
//! 3. bell raised: outputs on, and open the blind if it is closed, scheduling it to close 12 hours later
//! 4. blind open and the scheduled hour reached: close the blind
//! 5. otherwise: outputs off
//!
//! The first condition only fires once per matching window. The window is used up when it begins, whether the
//! alarm is enabled or not, and stays latched until the clock no longer matches the alarm. So a snooze within
//! the matching second holds, and enabling the alarm within a second that already matched does not ring it.
//! The bell only rings again on the next fresh match.
//!
//! Moving the blind blocks the tick for several seconds. Afterwards a fixed number of seconds is added to the
//! clock. This is an approximation and not a measurement of the elapsed time, the clock drifts by whatever
//! the blind movement takes beyond the configured compensation.
use crate::clock_time::ClockTime;
use crate::config::{BLIND_CLOSE_AFTER_HOURS, BLIND_COMPENSATION_SECONDS};
use crate::peripherals::{AlarmOutputs, BlindActuator};
use crate::state::AlarmSettings;

/// Direction of a blind movement
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlindMotion {
    /// Raise the blind
    Open,
    /// Lower the blind
    Close,
}

/// What the sequencer did in one tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmAction {
    /// The clock reached the alarm time, the bell is raised
    BellRaised,
    /// The snooze button silenced the bell
    Snoozed,
    /// The bell rings, the blind was already open
    Ringing,
    /// The bell rings and the blind was opened in this tick
    BlindOpened,
    /// The scheduled hour was reached and the blind was closed
    BlindClosed,
    /// Nothing going on, outputs off
    Idle,
}

/// The state of the blind
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlindState {
    /// The blind is open
    open: bool,
    /// Hour at which the open blind closes again
    close_at_hour: Option<u8>,
}

impl BlindState {
    /// A closed blind
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open: false,
            close_at_hour: None,
        }
    }

    /// The blind is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The hour at which the blind closes again, if it is open
    #[must_use]
    pub const fn close_at_hour(&self) -> Option<u8> {
        self.close_at_hour
    }

    /// The blind is open and the clock reached the closing hour
    const fn is_due(&self, hour: u8) -> bool {
        match self.close_at_hour {
            Some(close_at_hour) => self.open && close_at_hour == hour,
            None => false,
        }
    }
}

/// Bell and blind state, owned by the system state and only changed by [`AlarmSequencer::evaluate`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmSequencer {
    /// The bell is active
    bell: bool,
    /// The blind
    blinds: BlindState,
    /// The current matching window of clock and alarm time is used up
    match_latched: bool,
}

impl AlarmSequencer {
    /// Bell off, blind closed
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bell: false,
            blinds: BlindState::new(),
            match_latched: false,
        }
    }

    /// The bell is active
    #[must_use]
    pub const fn bell(&self) -> bool {
        self.bell
    }

    /// The state of the blind
    #[must_use]
    pub const fn blinds(&self) -> &BlindState {
        &self.blinds
    }

    /// Run the priority chain for this tick. `clock` is advanced by the compensation after a blind movement.
    pub fn evaluate<B>(
        &mut self,
        settings: &AlarmSettings,
        clock: &mut ClockTime,
        snooze_released: bool,
        board: &mut B,
    ) -> AlarmAction
    where
        B: AlarmOutputs + BlindActuator + ?Sized,
    {
        let same_time = settings.time().same_hms(clock);
        if !same_time {
            self.match_latched = false;
        }
        let fresh_match = same_time && !self.match_latched;
        if fresh_match {
            self.match_latched = true;
        }

        if fresh_match && settings.get_enabled() {
            self.bell = true;
            #[cfg(feature = "defmt")]
            defmt::info!("Alarm time {} reached, raising the bell", clock.hours());
            AlarmAction::BellRaised
        } else if snooze_released {
            self.bell = false;
            board.set_alarm_outputs(false);
            #[cfg(feature = "defmt")]
            defmt::info!("Alarm snoozed");
            AlarmAction::Snoozed
        } else if self.bell {
            board.set_alarm_outputs(true);
            if self.blinds.open {
                return AlarmAction::Ringing;
            }
            let close_at_hour = (clock.hours() + BLIND_CLOSE_AFTER_HOURS) % 24;
            #[cfg(feature = "defmt")]
            defmt::info!("Opening the blind, closing again at {}h", close_at_hour);
            board.run_blind_sequence(BlindMotion::Open);
            self.blinds.open = true;
            self.blinds.close_at_hour = Some(close_at_hour);
            compensate_blind_movement(clock);
            AlarmAction::BlindOpened
        } else if self.blinds.is_due(clock.hours()) {
            #[cfg(feature = "defmt")]
            defmt::info!("Closing the blind");
            board.run_blind_sequence(BlindMotion::Close);
            self.blinds.open = false;
            self.blinds.close_at_hour = None;
            compensate_blind_movement(clock);
            AlarmAction::BlindClosed
        } else {
            board.set_alarm_outputs(false);
            AlarmAction::Idle
        }
    }
}

/// Catch the clock up with the time the blocking blind movement took
fn compensate_blind_movement(clock: &mut ClockTime) {
    clock.advance_seconds(BLIND_COMPENSATION_SECONDS);
    #[cfg(feature = "defmt")]
    defmt::debug!("Clock compensated by {}s for the blind movement", BLIND_COMPENSATION_SECONDS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBoard;

    fn hms(hours: u8, minutes: u8, seconds: u8) -> ClockTime {
        ClockTime::from_hms(hours, minutes, seconds).unwrap()
    }

    fn enabled_alarm(hours: u8, minutes: u8) -> AlarmSettings {
        let mut settings = AlarmSettings::new_empty();
        settings.set_time(hms(hours, minutes, 0));
        settings.set_enabled(true);
        settings
    }

    #[test]
    fn exact_match_raises_the_bell() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let mut clock = hms(7, 30, 0);

        let action = sequencer.evaluate(&enabled_alarm(7, 30), &mut clock, false, &mut board);

        assert_eq!(action, AlarmAction::BellRaised);
        assert!(sequencer.bell());
        assert_eq!(board.outputs, None, "outputs follow on the next tick");
    }

    #[test]
    fn disabled_alarm_never_rings() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let mut settings = enabled_alarm(7, 30);
        settings.set_enabled(false);
        let mut clock = hms(7, 30, 0);

        let action = sequencer.evaluate(&settings, &mut clock, false, &mut board);

        assert_eq!(action, AlarmAction::Idle);
        assert!(!sequencer.bell());
        assert_eq!(board.outputs, Some(false));
    }

    #[test]
    fn enabling_within_a_matching_second_waits_for_the_next_match() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let mut settings = enabled_alarm(7, 30);
        settings.set_enabled(false);
        let mut clock = hms(7, 30, 0);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);

        settings.set_enabled(true);
        clock.tick();
        let action = sequencer.evaluate(&settings, &mut clock, false, &mut board);
        assert_eq!(action, AlarmAction::Idle);
        assert!(!sequencer.bell());

        clock = hms(7, 29, 59);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);
        clock = hms(7, 30, 0);
        let action = sequencer.evaluate(&settings, &mut clock, false, &mut board);
        assert_eq!(action, AlarmAction::BellRaised);
    }

    #[test]
    fn match_beats_snooze() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let mut clock = hms(7, 30, 0);

        let action = sequencer.evaluate(&enabled_alarm(7, 30), &mut clock, true, &mut board);

        assert_eq!(action, AlarmAction::BellRaised);
        assert!(sequencer.bell());
    }

    #[test]
    fn ringing_opens_the_blind_once_and_schedules_closing() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let settings = enabled_alarm(7, 30);
        let mut clock = hms(7, 30, 0);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);

        clock.tick();
        let action = sequencer.evaluate(&settings, &mut clock, false, &mut board);

        assert_eq!(action, AlarmAction::BlindOpened);
        assert_eq!(board.outputs, Some(true));
        assert_eq!(board.blind_moves, vec![BlindMotion::Open]);
        assert!(sequencer.blinds().is_open());
        assert_eq!(sequencer.blinds().close_at_hour(), Some(19));
        assert_eq!(clock.seconds(), BLIND_COMPENSATION_SECONDS);

        clock.tick();
        let action = sequencer.evaluate(&settings, &mut clock, false, &mut board);
        assert_eq!(action, AlarmAction::Ringing);
        assert_eq!(board.blind_moves.len(), 1);
    }

    #[test]
    fn close_hour_wraps_past_midnight() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let settings = enabled_alarm(20, 0);
        let mut clock = hms(20, 0, 0);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);
        clock.tick();
        sequencer.evaluate(&settings, &mut clock, false, &mut board);

        assert_eq!(sequencer.blinds().close_at_hour(), Some(8));
    }

    #[test]
    fn snooze_silences_and_holds_within_the_matching_second() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let settings = enabled_alarm(7, 30);
        let mut clock = hms(7, 30, 0);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);

        clock.tick();
        let action = sequencer.evaluate(&settings, &mut clock, true, &mut board);
        assert_eq!(action, AlarmAction::Snoozed);
        assert!(!sequencer.bell());
        assert_eq!(board.outputs, Some(false));

        clock.tick();
        let action = sequencer.evaluate(&settings, &mut clock, false, &mut board);
        assert_eq!(action, AlarmAction::Idle);
        assert!(!sequencer.bell(), "still 07:30:00, but the match was used up");
    }

    #[test]
    fn bell_returns_on_the_next_fresh_match() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let settings = enabled_alarm(7, 30);
        let mut clock = hms(7, 30, 0);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);
        clock.tick();
        sequencer.evaluate(&settings, &mut clock, true, &mut board);

        clock = hms(7, 29, 59);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);
        clock = hms(7, 30, 0);
        let action = sequencer.evaluate(&settings, &mut clock, false, &mut board);

        assert_eq!(action, AlarmAction::BellRaised);
        assert!(sequencer.bell());
    }

    #[test]
    fn blind_closes_once_at_the_scheduled_hour() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let settings = enabled_alarm(7, 0);
        let mut clock = hms(7, 0, 0);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);
        clock.tick();
        sequencer.evaluate(&settings, &mut clock, false, &mut board);
        clock.tick();
        sequencer.evaluate(&settings, &mut clock, true, &mut board);

        clock = hms(18, 59, 59);
        assert_eq!(
            sequencer.evaluate(&settings, &mut clock, false, &mut board),
            AlarmAction::Idle
        );
        assert!(sequencer.blinds().is_open());

        clock = hms(19, 0, 0);
        assert_eq!(
            sequencer.evaluate(&settings, &mut clock, false, &mut board),
            AlarmAction::BlindClosed
        );
        assert!(!sequencer.blinds().is_open());
        assert_eq!(sequencer.blinds().close_at_hour(), None);
        assert_eq!(clock, hms(19, 0, BLIND_COMPENSATION_SECONDS));

        clock.tick();
        assert_eq!(
            sequencer.evaluate(&settings, &mut clock, false, &mut board),
            AlarmAction::Idle
        );
        assert_eq!(board.blind_moves, vec![BlindMotion::Open, BlindMotion::Close]);
    }

    #[test]
    fn ringing_bell_keeps_the_blind_open_past_the_closing_hour() {
        let mut sequencer = AlarmSequencer::new();
        let mut board = FakeBoard::new();
        let settings = enabled_alarm(7, 0);
        let mut clock = hms(7, 0, 0);
        sequencer.evaluate(&settings, &mut clock, false, &mut board);
        clock.tick();
        sequencer.evaluate(&settings, &mut clock, false, &mut board);

        clock = hms(19, 0, 0);
        assert_eq!(
            sequencer.evaluate(&settings, &mut clock, false, &mut board),
            AlarmAction::Ringing
        );
        assert!(sequencer.blinds().is_open());
    }
}
