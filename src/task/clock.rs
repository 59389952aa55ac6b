//! # Clock task
//! The single control task. It owns the system state and every pin of the clock, and runs one tick of the
//! state machine every 100ms.
//!
//! A blind movement blocks the tick for seconds. The tick after such an overrun starts a fresh cadence
//! instead of catching up with the missed ticks, the clock is corrected by the fixed compensation only.
use crate::task::display::SignalDisplay;
use crate::task::resources::{AlarmOutputResources, BlindResources, ButtonResources, WatchdogResources};
use blinds_alarmclock::alarm::AlarmAction;
use blinds_alarmclock::config::{STARTUP_FLASH_COUNT, STARTUP_FLASH_INTERVAL_MS, TICK_PERIOD_MS};
use blinds_alarmclock::peripherals::{BlindTiming, Board, MotorBlind, PinButtons, PinOutputs};
use blinds_alarmclock::state::SystemState;
use defmt::{debug, error, info, warn};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Delay, Duration, Instant, Ticker};

/// Hardware watchdog timeout, fed once per tick
const WATCHDOG_TIMEOUT: Duration = Duration::from_millis(8000);

/// PWM counter top of the blind motor, 20kHz at the 125MHz system clock
const MOTOR_PWM_TOP: u16 = 6_249;

/// Builds the board from the pins, flashes the indicator, starts the watchdog and then ticks forever.
#[embassy_executor::task]
pub async fn clock_handler(
    buttons: ButtonResources,
    alarm_outputs: AlarmOutputResources,
    blinds: BlindResources,
    watchdog: WatchdogResources,
) {
    info!("Clock task started");

    // buttons pull the pins high, the pull-downs keep them low otherwise
    let inputs = PinButtons::new(
        Input::new(buttons.set_time, Pull::Down),
        Input::new(buttons.set_alarm, Pull::Down),
        Input::new(buttons.increment_hours, Pull::Down),
        Input::new(buttons.increment_minutes, Pull::Down),
        Input::new(buttons.snooze, Pull::Down),
    );
    let mut outputs = PinOutputs::new(
        Output::new(alarm_outputs.buzzer, Level::Low),
        Output::new(alarm_outputs.indicator, Level::Low),
    );

    let mut pwm_config = PwmConfig::default();
    pwm_config.top = MOTOR_PWM_TOP;
    pwm_config.compare_a = 0;
    let (motor, _) = Pwm::new_output_a(blinds.pwm_slice, blinds.motor_pin, pwm_config).split();
    let Some(motor) = motor else {
        error!("PWM channel of the blind motor not available");
        return;
    };
    let blind = MotorBlind::new(
        motor,
        Output::new(blinds.direction_pin, Level::Low),
        Delay,
        BlindTiming::default(),
    );

    info!("Flashing the indicator {} times", STARTUP_FLASH_COUNT);
    outputs.flash_indicator(&mut Delay, STARTUP_FLASH_COUNT, STARTUP_FLASH_INTERVAL_MS);

    let mut board = Board {
        inputs,
        outputs,
        blinds: blind,
        display: SignalDisplay::new(),
    };
    let mut state = SystemState::new();

    let mut wd = Watchdog::new(watchdog.watchdog);
    wd.start(WATCHDOG_TIMEOUT);
    info!(
        "Watchdog started, {}ms timeout, ticking every {}ms",
        WATCHDOG_TIMEOUT.as_millis(),
        TICK_PERIOD_MS
    );

    let period = Duration::from_millis(TICK_PERIOD_MS);
    let mut ticker = Ticker::every(period);
    loop {
        let started = Instant::now();
        match state.tick(&mut board) {
            Some(AlarmAction::Idle) | None => {}
            Some(action) => debug!("{} at {}", action, state.clock),
        }
        wd.feed();

        let elapsed = started.elapsed();
        if elapsed >= period {
            warn!("Tick took {}ms, restarting the tick cadence", elapsed.as_millis());
            ticker.reset();
        }
        ticker.next().await;
    }
}
