//! # StringUtils
//! This module contains utility functions around string handling that are used in the project.

use crate::peripherals::DisplayStatus;
use crate::state::OperationMode;
use core::fmt::Write;
use heapless::String;

/// String helpers for the display
pub struct StringUtils;

impl StringUtils {
    /// This function formats a time of day as zero padded `HH:MM:SS`
    /// one example being `"07:05:09"`
    #[must_use]
    pub fn format_time(hours: u8, minutes: u8, seconds: u8) -> String<8> {
        let mut s: String<8> = String::new();
        // two digits each for valid times, larger values would not fit and get cut off
        let _ = write!(s, "{hours:02}:{minutes:02}:{seconds:02}");
        s
    }

    /// This function renders the status line below the time: the mode, `AL` if the alarm is enabled and `*`
    /// while the bell is active
    /// one example being `"TIME AL *"`
    #[must_use]
    pub fn status_line(status: &DisplayStatus) -> String<16> {
        let mut s: String<16> = String::new();
        let mode = match status.mode {
            OperationMode::Display => "TIME",
            OperationMode::SetTime => "SET TIME",
            OperationMode::SetAlarm => "SET ALARM",
        };
        // the longest line "SET ALARM AL *" fits into 16 characters
        let _ = s.push_str(mode);
        if status.alarm_enabled {
            let _ = s.push_str(" AL");
        }
        if status.bell {
            let _ = s.push_str(" *");
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_zero_padded() {
        assert_eq!(StringUtils::format_time(7, 5, 9).as_str(), "07:05:09");
        assert_eq!(StringUtils::format_time(23, 59, 59).as_str(), "23:59:59");
        assert_eq!(StringUtils::format_time(0, 0, 0).as_str(), "00:00:00");
    }

    #[test]
    fn status_line_shows_mode_alarm_and_bell() {
        let mut status = DisplayStatus {
            mode: OperationMode::Display,
            alarm_enabled: false,
            bell: false,
        };
        assert_eq!(StringUtils::status_line(&status).as_str(), "TIME");

        status.alarm_enabled = true;
        status.bell = true;
        assert_eq!(StringUtils::status_line(&status).as_str(), "TIME AL *");

        status.mode = OperationMode::SetAlarm;
        status.bell = false;
        assert_eq!(StringUtils::status_line(&status).as_str(), "SET ALARM AL");

        status.mode = OperationMode::SetTime;
        status.alarm_enabled = false;
        assert_eq!(StringUtils::status_line(&status).as_str(), "SET TIME");
    }
}
