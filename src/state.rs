//! # State of the system
//! This module describes the state of the system and the tick that advances it.
//!
//! All device state lives in one [`SystemState`], owned by the control task and only changed by
//! [`SystemState::tick`]. A tick samples the buttons, dispatches on the operation mode, refreshes the display
//! and finally commits the button samples.
use crate::alarm::{AlarmAction, AlarmSequencer};
use crate::buttons::{Button, ButtonStates};
use crate::clock_time::ClockTime;
use crate::peripherals::{AlarmOutputs, BlindActuator, ButtonInputs, DisplayStatus, TimeDisplay};
use crate::time_set::apply_increment;

/// The operation mode of the system
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// The regular operation mode.
    ///
    /// The clock runs and is displayed, the alarm is evaluated.
    #[default]
    Display,
    /// Setting the clock. The clock stands still while it is adjusted.
    SetTime,
    /// Setting the alarm time. The clock stands still and the alarm time is displayed.
    SetAlarm,
}

/// The settings for the alarm
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmSettings {
    /// The alarm time, only hours, minutes and seconds are compared
    time: ClockTime,
    /// The alarm is enabled or disabled
    enabled: bool,
}

impl AlarmSettings {
    /// Create a new `AlarmSettings`: midnight, disabled.
    #[must_use]
    pub const fn new_empty() -> Self {
        Self {
            time: ClockTime::MIDNIGHT,
            enabled: false,
        }
    }

    /// Set the alarm time
    pub const fn set_time(&mut self, time: ClockTime) {
        self.time = time;
    }

    /// Set the enabled state
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Get the alarm time
    #[must_use]
    pub const fn time(&self) -> &ClockTime {
        &self.time
    }

    /// Get the alarm time for adjusting it
    pub const fn time_mut(&mut self) -> &mut ClockTime {
        &mut self.time
    }

    /// Get the enabled state
    #[must_use]
    pub const fn get_enabled(&self) -> bool {
        self.enabled
    }
}

/// All the states of the system are kept in this struct.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemState {
    /// The operation mode of the system
    pub operation_mode: OperationMode,
    /// The running clock
    pub clock: ClockTime,
    /// The settings for the alarm
    pub alarm_settings: AlarmSettings,
    /// Bell and blind
    pub alarm_sequencer: AlarmSequencer,
    /// Samples of the buttons
    pub buttons: ButtonStates,
}

impl SystemState {
    /// Create a new `SystemState`: display mode, clock at midnight, alarm disabled, blind closed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operation_mode: OperationMode::Display,
            clock: ClockTime::MIDNIGHT,
            alarm_settings: AlarmSettings::new_empty(),
            alarm_sequencer: AlarmSequencer::new(),
            buttons: ButtonStates::new(),
        }
    }

    /// The time currently on the display: the alarm time while setting it, the clock otherwise
    #[must_use]
    pub const fn displayed_time(&self) -> &ClockTime {
        match self.operation_mode {
            OperationMode::SetAlarm => self.alarm_settings.time(),
            OperationMode::Display | OperationMode::SetTime => &self.clock,
        }
    }

    /// Mode, alarm and bell, as shown on the status line
    #[must_use]
    pub const fn status(&self) -> DisplayStatus {
        DisplayStatus {
            mode: self.operation_mode,
            alarm_enabled: self.alarm_settings.get_enabled(),
            bell: self.alarm_sequencer.bell(),
        }
    }

    /// Run one tick. Must be called every 100ms, the clock counts one decisecond per tick.
    ///
    /// The branch is chosen by the mode at the start of the tick. A tick that leaves display mode still
    /// advances the clock and evaluates the alarm.
    pub fn tick<B>(&mut self, board: &mut B) -> Option<AlarmAction>
    where
        B: ButtonInputs + AlarmOutputs + BlindActuator + TimeDisplay + ?Sized,
    {
        self.buttons.sample_all(board);

        let action = match self.operation_mode {
            OperationMode::Display => Some(self.handle_display_mode(board)),
            OperationMode::SetTime => {
                self.handle_set_time_mode();
                None
            }
            OperationMode::SetAlarm => {
                self.handle_set_alarm_mode();
                None
            }
        };

        board.show_status(self.status());
        let shown = self.displayed_time();
        board.show_time(shown.hours(), shown.minutes(), shown.seconds());

        self.buttons.commit();
        action
    }

    /// Display mode: mode transitions, then the clock runs and the alarm is evaluated
    fn handle_display_mode<B>(&mut self, board: &mut B) -> AlarmAction
    where
        B: AlarmOutputs + BlindActuator + ?Sized,
    {
        if self.buttons.falling_edge(Button::SetTime) {
            self.set_mode(OperationMode::SetTime);
        } else if self.buttons.falling_edge(Button::SetAlarm) {
            self.set_mode(OperationMode::SetAlarm);
        }

        self.clock.tick();
        self.alarm_sequencer.evaluate(
            &self.alarm_settings,
            &mut self.clock,
            self.buttons.falling_edge(Button::Snooze),
            board,
        )
    }

    /// Set time mode: the clock stands still and follows the increment buttons
    fn handle_set_time_mode(&mut self) {
        if self.buttons.falling_edge(Button::SetTime) {
            self.set_mode(OperationMode::Display);
        }
        apply_increment(
            self.buttons.get(Button::IncrementHours),
            self.buttons.get(Button::IncrementMinutes),
            &mut self.clock,
        );
    }

    /// Set alarm mode: the alarm is forced on and its time follows the increment buttons
    fn handle_set_alarm_mode(&mut self) {
        self.alarm_settings.set_enabled(true);
        if self.buttons.falling_edge(Button::SetAlarm) {
            self.set_mode(OperationMode::Display);
        }
        apply_increment(
            self.buttons.get(Button::IncrementHours),
            self.buttons.get(Button::IncrementMinutes),
            self.alarm_settings.time_mut(),
        );
    }

    /// Switch the operation mode
    fn set_mode(&mut self, mode: OperationMode) {
        #[cfg(feature = "defmt")]
        defmt::info!("Operation mode {} -> {}", self.operation_mode, mode);
        self.operation_mode = mode;
    }
}
