//! Consumer Control report (usage page 0x0C): play/pause and volume step.
//!
//! One 16-bit usage per report, little-endian, as laid out by
//! `usbd_hid::descriptor::MediaKeyboardReport`. A usage of zero releases.

pub const CONSUMER_REPORT_SIZE: usize = 2;

/// Usages the device emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ConsumerUsage {
    #[default]
    None = 0x0000,
    PlayPause = 0x00CD,
    /// Absolute volume; only carried by the volume-value report.
    Volume = 0x00E0,
    VolumeUp = 0x00E9,
    VolumeDown = 0x00EA,
}

impl ConsumerUsage {
    pub const fn code(self) -> u16 {
        self as u16
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    pub usage: ConsumerUsage,
}

impl ConsumerReport {
    /// Release report.
    pub const fn empty() -> Self {
        Self::new(ConsumerUsage::None)
    }

    pub const fn new(usage: ConsumerUsage) -> Self {
        Self { usage }
    }

    /// Write the report into `buf`, returning the length or 0 when `buf`
    /// is too short.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match buf.get_mut(..CONSUMER_REPORT_SIZE) {
            Some(out) => {
                out.copy_from_slice(&self.usage.code().to_le_bytes());
                CONSUMER_REPORT_SIZE
            }
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.usage == ConsumerUsage::None
    }
}
