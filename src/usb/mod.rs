//! USB side of the firmware: a four-interface composite HID device on the
//! nRF52840 full-speed controller, served by `embassy-usb`.
//!
//! Interfaces follow report id order:
//!
//! 0. Keyboard (boot protocol)
//! 1. Consumer Control (play/pause, volume step)
//! 2. Consumer Control volume value
//! 3. Mouse (always idle)
//!
//! The report engine hands reports to [`transport::UsbTransport`]; the
//! writer task puts them on the right endpoint and reports completion
//! back so the engine can chain to the next channel.

pub mod hid_device;
pub mod transport;
