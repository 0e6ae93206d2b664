//! Host-testable logic for the hidknob firmware.
//!
//! Everything here is pure logic written against traits (HID transport,
//! `embedded-hal` pins, `embedded-io-async` streams), so it runs on the host
//! with no hardware attached.
//!
//! Usage: `cargo test --lib` / `cargo test --test integration`
//!
//! Note: The embedded binaries (`main.rs`, `bin/matrix_player.rs`) are
//! `#![no_std]` / `#![no_main]` and require the `embedded` feature.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod engine;
pub mod error;
pub mod hid;
pub mod input;
pub mod matrix;
pub mod player;

pub use engine::{HidTransport, KnobMode, ReportEngine};
pub use error::Error;
pub use hid::{HidReport, ReportChannel};
pub use input::{LogicalEvent, RawInputs};
