//! # Test board
//! A board for the unit tests: buttons are set by the test, everything written to the outputs is recorded.
use crate::alarm::BlindMotion;
use crate::buttons::Button;
use crate::peripherals::{AlarmOutputs, BlindActuator, ButtonInputs, DisplayStatus, TimeDisplay};

/// Records what the clock core does to the hardware
#[derive(Debug, Default)]
pub struct FakeBoard {
    /// Levels of the buttons, indexed by [`Button::index`]
    pressed: [bool; 5],
    /// Buttons whose reads fail
    failing: [bool; 5],
    /// Number of button reads
    pub reads: usize,
    /// Last state of buzzer and indicator, `None` before the first write
    pub outputs: Option<bool>,
    /// Every blind movement, in order
    pub blind_moves: Vec<BlindMotion>,
    /// Every time shown, in order
    pub shown: Vec<(u8, u8, u8)>,
    /// Last status shown
    pub status: Option<DisplayStatus>,
}

impl FakeBoard {
    /// All buttons released, nothing written yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold a button down
    pub fn press(&mut self, button: Button) {
        self.pressed[button.index()] = true;
    }

    /// Let go of a button
    pub fn release(&mut self, button: Button) {
        self.pressed[button.index()] = false;
    }

    /// Make reads of a button fail, or work again
    pub fn set_failing(&mut self, button: Button, failing: bool) {
        self.failing[button.index()] = failing;
    }
}

impl ButtonInputs for FakeBoard {
    fn read_button(&mut self, button: Button) -> Option<bool> {
        self.reads += 1;
        if self.failing[button.index()] {
            None
        } else {
            Some(self.pressed[button.index()])
        }
    }
}

impl AlarmOutputs for FakeBoard {
    fn set_alarm_outputs(&mut self, active: bool) {
        self.outputs = Some(active);
    }
}

impl BlindActuator for FakeBoard {
    fn run_blind_sequence(&mut self, motion: BlindMotion) {
        self.blind_moves.push(motion);
    }
}

impl TimeDisplay for FakeBoard {
    fn show_time(&mut self, hours: u8, minutes: u8, seconds: u8) {
        self.shown.push((hours, minutes, seconds));
    }

    fn show_status(&mut self, status: DisplayStatus) {
        self.status = Some(status);
    }
}
