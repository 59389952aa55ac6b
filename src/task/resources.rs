//! # Resources
//! The peripherals of the RP2040, grouped by the task that uses them.
use assign_resources::assign_resources;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::I2C0;
use embassy_rp::{Peri, bind_interrupts, peripherals};

// group the peripherals into resources, to be used in the tasks
// the resources are assigned to the tasks in main.rs
assign_resources! {
    buttons: ButtonResources {
        set_time: PIN_10,
        set_alarm: PIN_11,
        increment_hours: PIN_14,
        increment_minutes: PIN_15,
        snooze: PIN_16,
    },
    alarm_outputs: AlarmOutputResources {
        buzzer: PIN_6,
        indicator: PIN_7,
    },
    blinds: BlindResources {
        pwm_slice: PWM_SLICE1,
        motor_pin: PIN_2, // channel A of slice 1
        direction_pin: PIN_3,
    },
    display: DisplayResources {
        scl: PIN_13,
        sda: PIN_12,
        i2c0: I2C0,
    },
    watchdog: WatchdogResources {
        watchdog: WATCHDOG,
    },
}

// bind the interrupts, on a global scope
bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
