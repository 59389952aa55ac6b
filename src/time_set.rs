//! # Time setting
//! Applies the hour and minute buttons to the time being set. Used for the clock in set time mode and for the
//! alarm in set alarm mode.
use crate::buttons::ButtonState;
use crate::clock_time::ClockTime;

/// Advance the hours on a falling edge of `hours_button` and the minutes on a falling edge of
/// `minutes_button`. Both are checked on every call, so releasing both buttons together changes both fields.
/// Returns true if the time changed.
pub const fn apply_increment(
    hours_button: &ButtonState,
    minutes_button: &ButtonState,
    time: &mut ClockTime,
) -> bool {
    let mut changed = false;
    if hours_button.is_falling_edge() {
        time.increment_hour();
        changed = true;
    }
    if minutes_button.is_falling_edge() {
        time.increment_minute();
        changed = true;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A button that gets released in this tick
    fn released() -> ButtonState {
        let mut state = ButtonState::new();
        state.sample(Some(true));
        state.commit();
        state.sample(Some(false));
        state
    }

    /// A button that is held down
    fn held() -> ButtonState {
        let mut state = ButtonState::new();
        state.sample(Some(true));
        state.commit();
        state.sample(Some(true));
        state
    }

    fn hms(hours: u8, minutes: u8, seconds: u8) -> ClockTime {
        ClockTime::from_hms(hours, minutes, seconds).unwrap()
    }

    #[test]
    fn hours_edge_advances_hours() {
        let mut time = hms(6, 45, 10);
        assert!(apply_increment(&released(), &ButtonState::new(), &mut time));
        assert_eq!(time, hms(7, 45, 10));
    }

    #[test]
    fn minutes_edge_advances_minutes() {
        let mut time = hms(6, 45, 10);
        assert!(apply_increment(&ButtonState::new(), &released(), &mut time));
        assert_eq!(time, hms(6, 46, 10));
    }

    #[test]
    fn both_edges_in_one_tick() {
        let mut time = hms(23, 59, 0);
        assert!(apply_increment(&released(), &released(), &mut time));
        assert_eq!(time, hms(0, 0, 0));
    }

    #[test]
    fn held_buttons_change_nothing() {
        let mut time = hms(12, 0, 0);
        assert!(!apply_increment(&held(), &held(), &mut time));
        assert_eq!(time, hms(12, 0, 0));
    }

    #[test]
    fn one_press_over_many_ticks_is_one_hour() {
        let mut hours_button = ButtonState::new();
        let idle = ButtonState::new();
        let mut time = hms(22, 10, 0);

        let samples = [true, true, true, true, false, false, false];
        for level in samples {
            hours_button.sample(Some(level));
            apply_increment(&hours_button, &idle, &mut time);
            hours_button.commit();
        }
        assert_eq!(time, hms(23, 10, 0));
    }
}
