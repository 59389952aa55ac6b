//! # Display task
//! This module contains the task that displays the time and the status on the OLED display.
//!
//! The control task hands frames over through a signal and only signals when the frame changed. The display
//! task never touches the system state, it only draws the latest frame.
use crate::task::resources::{DisplayResources, Irqs};
use blinds_alarmclock::peripherals::{DisplayStatus, TimeDisplay};
use blinds_alarmclock::utility::string_utils::StringUtils;
use defmt::{Debug2Format, error, info, warn};
use embassy_rp::i2c::{Config, I2c};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embedded_graphics::{
    mono_font::{
        MonoTextStyleBuilder,
        ascii::{FONT_6X13, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use ssd1306_async::{I2CDisplayInterface, Ssd1306, prelude::*};

/// Position of the time, centered for eight characters of 10 pixels
const TIME_POSITION: Point = Point::new(24, 16);
/// Position of the status line
const STATUS_POSITION: Point = Point::new(0, 48);

/// What the display shows
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct DisplayFrame {
    /// Hours of the displayed time
    hours: u8,
    /// Minutes of the displayed time
    minutes: u8,
    /// Seconds of the displayed time
    seconds: u8,
    /// Mode, alarm and bell, `None` until the first status arrives
    status: Option<DisplayStatus>,
}

/// Signal for handing the next frame to the display task
static DISPLAY_SIGNAL: Signal<CriticalSectionRawMutex, DisplayFrame> = Signal::new();

/// Signals the display task with a new frame
fn signal_display_frame(frame: DisplayFrame) {
    DISPLAY_SIGNAL.signal(frame);
}

/// Waits for the next frame to draw
async fn wait_for_display_frame() -> DisplayFrame {
    DISPLAY_SIGNAL.wait().await
}

/// The display as seen by the control task. Collects status and time of a tick and signals the frame to the
/// display task if it differs from the last one sent.
pub struct SignalDisplay {
    /// The frame being assembled
    frame: DisplayFrame,
    /// The frame last sent to the display task
    last_sent: Option<DisplayFrame>,
}

impl SignalDisplay {
    /// Nothing sent yet
    pub const fn new() -> Self {
        Self {
            frame: DisplayFrame {
                hours: 0,
                minutes: 0,
                seconds: 0,
                status: None,
            },
            last_sent: None,
        }
    }
}

impl TimeDisplay for SignalDisplay {
    fn show_time(&mut self, hours: u8, minutes: u8, seconds: u8) {
        self.frame.hours = hours;
        self.frame.minutes = minutes;
        self.frame.seconds = seconds;
        if self.last_sent != Some(self.frame) {
            signal_display_frame(self.frame);
            self.last_sent = Some(self.frame);
        }
    }

    fn show_status(&mut self, status: DisplayStatus) {
        self.frame.status = Some(status);
    }
}

#[embassy_executor::task]
pub async fn display_handler(r: DisplayResources) {
    info!("Display task started");

    let mut config = Config::default();
    config.frequency = 400_000;
    let i2c = I2c::new_async(r.i2c0, r.scl, r.sda, Irqs, config);

    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {}", Debug2Format(&e));
        return;
    }

    let time_style = MonoTextStyleBuilder::new()
        .font(&FONT_10X20)
        .text_color(BinaryColor::On)
        .build();
    let status_style = MonoTextStyleBuilder::new()
        .font(&FONT_6X13)
        .text_color(BinaryColor::On)
        .build();

    loop {
        // Wait for a frame that differs from the one on the display
        let frame = wait_for_display_frame().await;

        // prepare the display, note that nothing is sent to the display before flush()
        display.clear();

        let time = StringUtils::format_time(frame.hours, frame.minutes, frame.seconds);
        if let Err(e) =
            Text::with_baseline(&time, TIME_POSITION, time_style, Baseline::Top).draw(&mut display)
        {
            warn!("Drawing the time failed: {}", Debug2Format(&e));
        }

        if let Some(status) = frame.status {
            let line = StringUtils::status_line(&status);
            if let Err(e) = Text::with_baseline(&line, STATUS_POSITION, status_style, Baseline::Top)
                .draw(&mut display)
            {
                warn!("Drawing the status line failed: {}", Debug2Format(&e));
            }
        }

        // finally: send the display buffer to the display
        if let Err(e) = display.flush().await {
            warn!("Flushing the display failed: {}", Debug2Format(&e));
        }
    }
}
