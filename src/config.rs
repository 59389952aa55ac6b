//! # Device configuration
//! The tunable values are generated by `build.rs` from `config/device_config.json`. If the file is missing,
//! the build falls back to defaults and says so with a cargo warning.
//!
//! ```json
//! {
//!     "blind_open_run_ms": 2000,
//!     "blind_close_run_ms": 2000,
//!     "blind_settle_ms": 1000,
//!     "blind_motor_duty_percent": 80,
//!     "blind_close_after_hours": 12,
//!     "blind_compensation_seconds": 3,
//!     "startup_flash_count": 5,
//!     "startup_flash_interval_ms": 500
//! }
//! ```

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));

/// Period of one tick of the control loop. The clock counts deciseconds, so this must stay at 100ms.
pub const TICK_PERIOD_MS: u64 = 100;
