//! # Blinds alarm clock
//! The core of a button operated alarm clock: it keeps the wall clock time, lets the user set the time and
//! the alarm with buttons, rings a buzzer when the alarm fires and opens a motorized blind, closing it again
//! twelve hours later.
//!
//! Everything in here is hardware independent. The firmware in `main.rs` plugs embassy-rp pins into the
//! embedded-hal adapters of [`peripherals`] and calls [`state::SystemState::tick`] every 100ms.
#![cfg_attr(not(test), no_std)]

pub mod alarm;
pub mod buttons;
pub mod clock_time;
pub mod config;
pub mod peripherals;
pub mod state;
pub mod time_set;
pub mod utility;

#[cfg(test)]
mod testing;
