//! # Peripherals
//! The seams between the clock core and the hardware, and the embedded-hal adapters the firmware plugs
//! its pins into.
//!
//! Pin errors never stop the clock. They are logged and the tick continues: a failed button read keeps the
//! last sample, a failed output write is retried on the next tick.
use crate::alarm::BlindMotion;
use crate::buttons::Button;
use crate::config::{BLIND_CLOSE_RUN_MS, BLIND_MOTOR_DUTY_PERCENT, BLIND_OPEN_RUN_MS, BLIND_SETTLE_MS};
use crate::state::OperationMode;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

/// Reads the five buttons
pub trait ButtonInputs {
    /// Read the level of one button, `Some(true)` when pressed. `None` if the pin could not be read.
    fn read_button(&mut self, button: Button) -> Option<bool>;
}

/// Buzzer and indicator LED, always switched together
pub trait AlarmOutputs {
    /// Switch buzzer and indicator on or off
    fn set_alarm_outputs(&mut self, active: bool);
}

/// The motorized blind
pub trait BlindActuator {
    /// Move the blind. Blocks until the motor has stopped and settled.
    fn run_blind_sequence(&mut self, motion: BlindMotion);
}

/// What the status line of the display shows
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayStatus {
    /// The operation mode
    pub mode: OperationMode,
    /// The alarm is enabled
    pub alarm_enabled: bool,
    /// The bell is active
    pub bell: bool,
}

/// The display
pub trait TimeDisplay {
    /// Show a time as `HH:MM:SS`
    fn show_time(&mut self, hours: u8, minutes: u8, seconds: u8);

    /// Show mode, alarm and bell. Displays without a status line ignore this.
    fn show_status(&mut self, _status: DisplayStatus) {}
}

/// Buttons on input pins, active high with pull-downs.
pub struct PinButtons<P> {
    /// Indexed by [`Button::index`]
    pins: [P; 5],
}

impl<P: InputPin> PinButtons<P> {
    /// Create the buttons from their pins
    pub const fn new(set_time: P, set_alarm: P, increment_hours: P, increment_minutes: P, snooze: P) -> Self {
        Self {
            pins: [set_time, set_alarm, increment_hours, increment_minutes, snooze],
        }
    }
}

impl<P: InputPin> ButtonInputs for PinButtons<P> {
    fn read_button(&mut self, button: Button) -> Option<bool> {
        match self.pins[button.index()].is_high() {
            Ok(level) => Some(level),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Reading button {} failed: {}", button, defmt::Debug2Format(&_e));
                None
            }
        }
    }
}

/// Buzzer and indicator LED on output pins.
pub struct PinOutputs<B, L> {
    /// The buzzer
    buzzer: B,
    /// The indicator LED
    indicator: L,
    /// The last state written successfully, `None` if unknown
    active: Option<bool>,
}

impl<B: OutputPin, L: OutputPin> PinOutputs<B, L> {
    /// Create the outputs. The pins are written on the first call to [`AlarmOutputs::set_alarm_outputs`].
    pub const fn new(buzzer: B, indicator: L) -> Self {
        Self {
            buzzer,
            indicator,
            active: None,
        }
    }

    /// Flash the indicator LED `count` times, each time on and off for `interval_ms`. Used as a self test on
    /// startup. Leaves the indicator off.
    pub fn flash_indicator<D: DelayNs>(&mut self, delay: &mut D, count: u8, interval_ms: u32) {
        for _ in 0..count {
            if let Err(_e) = self.indicator.set_high() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Indicator flash failed: {}", defmt::Debug2Format(&_e));
            }
            delay.delay_ms(interval_ms);
            if let Err(_e) = self.indicator.set_low() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Indicator flash failed: {}", defmt::Debug2Format(&_e));
            }
            delay.delay_ms(interval_ms);
        }
        self.active = None;
    }
}

impl<B: OutputPin, L: OutputPin> AlarmOutputs for PinOutputs<B, L> {
    fn set_alarm_outputs(&mut self, active: bool) {
        if self.active == Some(active) {
            return;
        }
        let buzzer = self.buzzer.set_state(active.into());
        let indicator = self.indicator.set_state(active.into());
        match (buzzer, indicator) {
            (Ok(()), Ok(())) => self.active = Some(active),
            (_buzzer, _indicator) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Switching the alarm outputs failed, buzzer: {}, indicator: {}",
                    defmt::Debug2Format(&_buzzer),
                    defmt::Debug2Format(&_indicator)
                );
                self.active = None;
            }
        }
    }
}

/// Run times of the blind motor
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlindTiming {
    /// How long the motor runs to open the blind
    pub open_run_ms: u32,
    /// How long the motor runs to close the blind
    pub close_run_ms: u32,
    /// Pause after stopping the motor
    pub settle_ms: u32,
    /// PWM duty while the motor runs
    pub duty_percent: u8,
}

/// Timing from the device configuration
impl Default for BlindTiming {
    fn default() -> Self {
        Self {
            open_run_ms: BLIND_OPEN_RUN_MS,
            close_run_ms: BLIND_CLOSE_RUN_MS,
            settle_ms: BLIND_SETTLE_MS,
            duty_percent: BLIND_MOTOR_DUTY_PERCENT,
        }
    }
}

/// A blind driven by a DC motor on a PWM channel, with a direction pin: high opens, low closes.
pub struct MotorBlind<M, D, W> {
    /// PWM channel of the motor driver
    motor: M,
    /// Direction input of the motor driver
    direction: D,
    /// Blocking delay for the run and settle times
    delay: W,
    /// Run times
    timing: BlindTiming,
}

impl<M: SetDutyCycle, D: OutputPin, W: DelayNs> MotorBlind<M, D, W> {
    /// Create the blind
    pub const fn new(motor: M, direction: D, delay: W, timing: BlindTiming) -> Self {
        Self {
            motor,
            direction,
            delay,
            timing,
        }
    }

    /// Stop the motor
    fn stop(&mut self) {
        if let Err(_e) = self.motor.set_duty_cycle_fully_off() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Stopping the blind motor failed: {}", defmt::Debug2Format(&_e));
        }
    }
}

impl<M: SetDutyCycle, D: OutputPin, W: DelayNs> BlindActuator for MotorBlind<M, D, W> {
    fn run_blind_sequence(&mut self, motion: BlindMotion) {
        let run_ms = match motion {
            BlindMotion::Open => self.timing.open_run_ms,
            BlindMotion::Close => self.timing.close_run_ms,
        };
        if let Err(_e) = self.direction.set_state((motion == BlindMotion::Open).into()) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Setting the blind direction failed: {}", defmt::Debug2Format(&_e));
        }
        if let Err(_e) = self.motor.set_duty_cycle_percent(self.timing.duty_percent) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Starting the blind motor failed: {}", defmt::Debug2Format(&_e));
        }
        self.delay.delay_ms(run_ms);
        self.stop();
        self.delay.delay_ms(self.timing.settle_ms);
    }
}

/// All peripherals of the clock in one place, so the tick can take a single board.
pub struct Board<I, O, A, D> {
    /// The buttons
    pub inputs: I,
    /// Buzzer and indicator
    pub outputs: O,
    /// The blind
    pub blinds: A,
    /// The display
    pub display: D,
}

impl<I: ButtonInputs, O, A, D> ButtonInputs for Board<I, O, A, D> {
    fn read_button(&mut self, button: Button) -> Option<bool> {
        self.inputs.read_button(button)
    }
}

impl<I, O: AlarmOutputs, A, D> AlarmOutputs for Board<I, O, A, D> {
    fn set_alarm_outputs(&mut self, active: bool) {
        self.outputs.set_alarm_outputs(active);
    }
}

impl<I, O, A: BlindActuator, D> BlindActuator for Board<I, O, A, D> {
    fn run_blind_sequence(&mut self, motion: BlindMotion) {
        self.blinds.run_blind_sequence(motion);
    }
}

impl<I, O, A, D: TimeDisplay> TimeDisplay for Board<I, O, A, D> {
    fn show_time(&mut self, hours: u8, minutes: u8, seconds: u8) {
        self.display.show_time(hours, minutes, seconds);
    }

    fn show_status(&mut self, status: DisplayStatus) {
        self.display.show_status(status);
    }
}
