//! # Buttons
//! Edge detection for the five buttons of the clock.
//!
//! Every tick all buttons are sampled once, before any decision is taken. The decisions of that tick all
//! look at the same samples. At the end of the tick the samples are committed and become the previous state
//! of the next tick. A press registers once, on release (falling edge), no matter how long the button is held.
use crate::peripherals::ButtonInputs;

/// The buttons of the system
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Enter and leave the set time mode
    SetTime,
    /// Enter and leave the set alarm mode
    SetAlarm,
    /// Advance the hours of the time being set
    IncrementHours,
    /// Advance the minutes of the time being set
    IncrementMinutes,
    /// Silence the ringing alarm
    Snooze,
}

impl Button {
    /// All buttons, in sampling order
    pub const ALL: [Self; 5] = [
        Self::SetTime,
        Self::SetAlarm,
        Self::IncrementHours,
        Self::IncrementMinutes,
        Self::Snooze,
    ];

    /// Position of the button in [`Button::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Previous and current sample of one button.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Sample of the last tick
    previous: bool,
    /// Sample of this tick
    current: bool,
}

impl ButtonState {
    /// A released button
    #[must_use]
    pub const fn new() -> Self {
        Self {
            previous: false,
            current: false,
        }
    }

    /// Take the sample of this tick. A failed read (`None`) keeps the last sample, which reads as no press.
    pub const fn sample(&mut self, level: Option<bool>) {
        if let Some(level) = level {
            self.current = level;
        }
    }

    /// The button was pressed last tick and is released now
    #[must_use]
    pub const fn is_falling_edge(&self) -> bool {
        self.previous && !self.current
    }

    /// The button is held down in this tick
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.current
    }

    /// Roll the current sample over into the previous one, at the end of the tick
    pub const fn commit(&mut self) {
        self.previous = self.current;
    }
}

/// The states of all five buttons.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonStates {
    /// Indexed by [`Button::index`]
    states: [ButtonState; 5],
}

impl ButtonStates {
    /// All buttons released
    #[must_use]
    pub const fn new() -> Self {
        Self {
            states: [ButtonState::new(); 5],
        }
    }

    /// Sample every button once
    pub fn sample_all<I: ButtonInputs + ?Sized>(&mut self, inputs: &mut I) {
        for button in Button::ALL {
            let level = inputs.read_button(button);
            self.states[button.index()].sample(level);
        }
    }

    /// Get the state of one button
    #[must_use]
    pub const fn get(&self, button: Button) -> &ButtonState {
        &self.states[button.index()]
    }

    /// The button was released in this tick
    #[must_use]
    pub const fn falling_edge(&self, button: Button) -> bool {
        self.get(button).is_falling_edge()
    }

    /// End of tick: the current samples become the previous ones
    pub fn commit(&mut self) {
        for state in &mut self.states {
            state.commit();
        }
    }
}
