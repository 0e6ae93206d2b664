//! Application-wide constants and compile-time configuration.
//!
//! All pin assignments, timing parameters, and protocol constants live
//! here so they can be tuned in one place.

use crate::engine::KnobMode;

// Sampling / classification

/// Length of one sample/classify/report tick (ms).
pub const TICK_INTERVAL_MS: u32 = 10;

/// How often the firmware loop polls the tick clock (ms).
pub const POLL_INTERVAL_MS: u64 = 1;

/// Number of analog readings kept for the moving average.
pub const SAMPLE_COUNT: usize = 8;

/// A raw knob reading further than this from the rolling mean counts as a turn.
pub const KNOB_DIFF_THRESHOLD: u16 = 10;

/// Bit of the raw ADC read that flags an invalid conversion.
pub const SAMPLE_INVALID_MASK: u16 = 0x8000;

/// Largest valid 12-bit knob reading.
pub const KNOB_MAX: u16 = 4095;

/// How the knob is reported to the host.
pub const KNOB_MODE: KnobMode = KnobMode::Absolute;

/// Number of `A` press/release pairs sent at startup.
pub const ANNOUNCE_PRESSES: u8 = 2;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "hidknob";
pub const USB_PRODUCT: &str = "Button + Volume Knob";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

// GPIO pin assignments (nRF52840-DK)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in the binaries.  Adjust for your custom PCB.
//
//   On-board button   → P0.11 (DK Button 1, active-low)
//   External button   → P0.28 (pull-up, active-low)
//   Volume knob       → P0.03 / AIN1
//   Matrix rows       → P0.02, P0.29
//   Matrix columns    → P0.30, P0.31 (pull-down)
//   Status LED        → P0.13 (DK LED 1, active-low)
//   Player UART TX/RX → P0.06 / P0.08

// Audio player

/// Highest volume the audio player accepts.
pub const PLAYER_MAX_VOLUME: u8 = 31;

/// How long the matrix program waits for a player response (ms).
pub const PLAYER_RESPONSE_TIMEOUT_MS: u64 = 50;

// Matrix

/// Settle time after driving a matrix row (µs).
pub const MATRIX_SETTLE_US: u32 = 1_000;

/// LED blink half-period and idle pause between scans (ms).
pub const BLINK_MS: u64 = 100;
