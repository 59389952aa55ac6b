//! # Clock time
//! A time of day counted in deciseconds, seconds, minutes and hours. Every field stays within its range:
//! when a field reaches its modulus it goes back to 0 and carries into the next one.
//!
//! The arithmetic here never touches the display. Rendering always derives its text from the current value.
use core::fmt;

/// Deciseconds per second, the modulus of the smallest field
const DECISECONDS_PER_SECOND: u8 = 10;
/// Seconds per minute
const SECONDS_PER_MINUTE: u8 = 60;
/// Minutes per hour
const MINUTES_PER_HOUR: u8 = 60;
/// Hours per day
const HOURS_PER_DAY: u8 = 24;

/// A time of day with decisecond resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    /// 0..=9
    deciseconds: u8,
    /// 0..=59
    seconds: u8,
    /// 0..=59
    minutes: u8,
    /// 0..=23
    hours: u8,
}

impl ClockTime {
    /// Midnight, 00:00:00.0
    pub const MIDNIGHT: Self = Self {
        deciseconds: 0,
        seconds: 0,
        minutes: 0,
        hours: 0,
    };

    /// Create a time from hours, minutes and seconds. Returns `None` if any field is out of range.
    #[must_use]
    pub const fn from_hms(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours >= HOURS_PER_DAY || minutes >= MINUTES_PER_HOUR || seconds >= SECONDS_PER_MINUTE {
            return None;
        }
        Some(Self {
            deciseconds: 0,
            seconds,
            minutes,
            hours,
        })
    }

    /// Get the hours
    #[must_use]
    pub const fn hours(&self) -> u8 {
        self.hours
    }

    /// Get the minutes
    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Get the seconds
    #[must_use]
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Get the deciseconds
    #[must_use]
    pub const fn deciseconds(&self) -> u8 {
        self.deciseconds
    }

    /// Hours, minutes and seconds are equal. Deciseconds are ignored.
    #[must_use]
    pub const fn same_hms(&self, other: &Self) -> bool {
        self.hours == other.hours && self.minutes == other.minutes && self.seconds == other.seconds
    }

    /// Let one decisecond elapse, carrying into seconds, minutes and hours as needed.
    /// 23:59:59.9 wraps to 00:00:00.0.
    pub const fn tick(&mut self) {
        self.deciseconds += 1;
        if self.deciseconds < DECISECONDS_PER_SECOND {
            return;
        }
        self.deciseconds = 0;
        self.carry_second();
    }

    /// Add whole seconds with full carry. Deciseconds are left alone.
    pub const fn advance_seconds(&mut self, seconds: u8) {
        let mut remaining = seconds;
        while remaining > 0 {
            self.carry_second();
            remaining -= 1;
        }
    }

    /// Advance the hours by one, wrapping 23 to 0. Minutes are not touched.
    pub const fn increment_hour(&mut self) {
        self.hours = (self.hours + 1) % HOURS_PER_DAY;
    }

    /// Advance the minutes by one, wrapping 59 to 0 without carrying into the hours.
    pub const fn increment_minute(&mut self) {
        self.minutes = (self.minutes + 1) % MINUTES_PER_HOUR;
    }

    /// One second elapses
    const fn carry_second(&mut self) {
        self.seconds += 1;
        if self.seconds < SECONDS_PER_MINUTE {
            return;
        }
        self.seconds = 0;
        self.minutes += 1;
        if self.minutes < MINUTES_PER_HOUR {
            return;
        }
        self.minutes = 0;
        self.hours = (self.hours + 1) % HOURS_PER_DAY;
    }
}

/// Zero padded `HH:MM:SS`
impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
