//! This build script copies the `memory.x` file from the crate root into
//! a directory where the linker can always find it at build time, and
//! generates the device configuration constants from
//! `config/device_config.json`.
//!
//! Requesting that Cargo re-run the build script whenever `memory.x` or the
//! configuration changes ensures a rebuild of the application with the new
//! settings.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::print_stdout)]

use serde::Deserialize;
use std::{
    env, fs,
    fs::File,
    io,
    io::Write,
    path::{Path, PathBuf},
};

fn main() {
    if env::var("TARGET").is_ok_and(|target| target.starts_with("thumb")) {
        memory_x();
    }
    device_config().unwrap();
}

/// Tunables of the device, read from `config/device_config.json`.
/// Every key is optional and falls back to the value in `Default`.
#[derive(Deserialize)]
#[serde(default)]
struct DeviceConfig {
    /// How long the blind motor runs to open the blind
    blind_open_run_ms: u32,
    /// How long the blind motor runs to close the blind
    blind_close_run_ms: u32,
    /// Pause after stopping the motor before the clock resumes
    blind_settle_ms: u32,
    /// PWM duty of the blind motor while running
    blind_motor_duty_percent: u8,
    /// Hours after the alarm at which the blind closes again
    blind_close_after_hours: u8,
    /// Seconds added to the clock after a blind movement
    blind_compensation_seconds: u8,
    /// Indicator flashes at startup
    startup_flash_count: u8,
    /// Length of one startup flash (on and off)
    startup_flash_interval_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            blind_open_run_ms: 2000,
            blind_close_run_ms: 2000,
            blind_settle_ms: 1000,
            blind_motor_duty_percent: 80,
            blind_close_after_hours: 12,
            blind_compensation_seconds: 3,
            startup_flash_count: 5,
            startup_flash_interval_ms: 500,
        }
    }
}

/// Generate `device_config.rs` from `config/device_config.json`
fn device_config() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR environment variable not set");
    let dest_path = Path::new(&out_dir).join("device_config.rs");
    let mut f = File::create(dest_path).expect("Could not create device_config.rs file");

    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR environment variable not set");
    let config_path = Path::new(&manifest_dir).join("config/device_config.json");
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config: DeviceConfig = if config_path.exists() {
        let contents =
            fs::read_to_string(&config_path).expect("Could not read device_config.json file");
        serde_json::from_str(&contents).expect("Could not parse device_config.json file")
    } else {
        println!("cargo:warning=device_config.json not found, using default device configuration");
        DeviceConfig::default()
    };

    assert!(
        config.blind_motor_duty_percent <= 100,
        "blind_motor_duty_percent must be within 0..=100"
    );
    assert!(
        config.blind_close_after_hours < 24,
        "blind_close_after_hours must be within 0..24"
    );
    assert!(
        config.blind_compensation_seconds < 60,
        "blind_compensation_seconds must be within 0..60"
    );
    // the control task feeds the 8s hardware watchdog once per tick, a blind movement must end before it bites
    assert!(
        config.blind_open_run_ms.max(config.blind_close_run_ms) + config.blind_settle_ms < 7000,
        "blind run time plus settle time must stay below 7000ms"
    );

    writeln!(f, "/// How long the blind motor runs to open the blind, in milliseconds")?;
    writeln!(f, "pub const BLIND_OPEN_RUN_MS: u32 = {};", config.blind_open_run_ms)?;
    writeln!(f, "/// How long the blind motor runs to close the blind, in milliseconds")?;
    writeln!(f, "pub const BLIND_CLOSE_RUN_MS: u32 = {};", config.blind_close_run_ms)?;
    writeln!(f, "/// Pause after the motor stopped, in milliseconds")?;
    writeln!(f, "pub const BLIND_SETTLE_MS: u32 = {};", config.blind_settle_ms)?;
    writeln!(f, "/// PWM duty of the running blind motor, in percent")?;
    writeln!(f, "pub const BLIND_MOTOR_DUTY_PERCENT: u8 = {};", config.blind_motor_duty_percent)?;
    writeln!(f, "/// Hours between opening the blind and closing it again")?;
    writeln!(f, "pub const BLIND_CLOSE_AFTER_HOURS: u8 = {};", config.blind_close_after_hours)?;
    writeln!(f, "/// Seconds added to the clock after every blind movement")?;
    writeln!(f, "pub const BLIND_COMPENSATION_SECONDS: u8 = {};", config.blind_compensation_seconds)?;
    writeln!(f, "/// Number of indicator flashes at startup")?;
    writeln!(f, "pub const STARTUP_FLASH_COUNT: u8 = {};", config.startup_flash_count)?;
    writeln!(f, "/// Length of one startup flash, in milliseconds")?;
    writeln!(f, "pub const STARTUP_FLASH_INTERVAL_MS: u32 = {};", config.startup_flash_interval_ms)?;
    Ok(())
}

/// Handle the `memory.x` linker script
fn memory_x() {
    // Put `memory.x` in our output directory and ensure it's
    // on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // By default, Cargo will re-run a build script whenever
    // any file in the project changes. By specifying `memory.x`
    // here, we ensure the build script is only re-run when
    // `memory.x` is changed.
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
