//! Helpers shared by the clock core and the firmware.
pub mod string_utils;
