//! Consumer Control volume-value report - absolute knob position.
//!
//! Layout (7 bytes, little-endian):
//! ```text
//! Byte 0-1: Usage code (Volume, 0x00E0)
//! Byte 2-3: Absolute value (0..4095)
//! Byte 4-6: Padding (0x00)
//! ```

use super::consumer::ConsumerUsage;

/// Volume-value report size in bytes.
pub const VOLUME_REPORT_SIZE: usize = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VolumeValueReport {
    /// `Volume` (0x00E0) while asserted, 0 in the neutral report.
    pub usage: u16,
    /// Averaged knob position.
    pub value: u16,
}

impl VolumeValueReport {
    /// Neutral report: usage and value both zero.
    pub const fn empty() -> Self {
        Self { usage: 0, value: 0 }
    }

    pub const fn new(value: u16) -> Self {
        Self {
            usage: ConsumerUsage::Volume.code(),
            value,
        }
    }

    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < VOLUME_REPORT_SIZE {
            return 0;
        }
        buf[0..2].copy_from_slice(&self.usage.to_le_bytes());
        buf[2..4].copy_from_slice(&self.value.to_le_bytes());
        buf[4..VOLUME_REPORT_SIZE].fill(0);
        VOLUME_REPORT_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.usage == 0 && self.value == 0
    }
}

/// USB HID Report Descriptor for the volume-value report.
pub const VOLUME_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Usage code (16 bits, array) -
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    //
    //   - Absolute value (16 bits) -
    0x09, 0xE0, //   Usage (Volume)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x0F, //   Logical Maximum (4095)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Padding (24 bits) -
    0x75, 0x08, //   Report Size (8)
    0x95, 0x03, //   Report Count (3)
    0x81, 0x01, //   Input (Constant)
    //
    0xC0, // End Collection
];
