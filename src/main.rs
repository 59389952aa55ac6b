// we are in an environment with constrained resources, so we do not use the standard library and we define a different entry point.
#![no_std]
#![no_main]

use crate::task::clock::clock_handler;
use crate::task::display::display_handler;
use crate::task::resources::{
    AlarmOutputResources, AssignedResources, BlindResources, ButtonResources, DisplayResources,
    WatchdogResources,
};
use defmt::{info, unwrap}; // global logger
use embassy_executor::Spawner; // executor
use {defmt_rtt as _, panic_probe as _}; // panic handler

// import the task module (submodule of src), it provides split_resources!
#[macro_use]
mod task;

// Entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Program start");

    // Initialize the peripherals for the RP2040
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    // the display first, so it is waiting when the first frame is signaled
    unwrap!(spawner.spawn(display_handler(r.display)));
    unwrap!(spawner.spawn(clock_handler(
        r.buttons,
        r.alarm_outputs,
        r.blinds,
        r.watchdog
    )));
}
