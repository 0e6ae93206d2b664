//! HID report types and the channel numbering used for chained dispatch.

pub mod consumer;
pub mod keyboard;
pub mod mouse;
pub mod volume;


pub use consumer::{ConsumerReport, ConsumerUsage};
pub use keyboard::KeyboardReport;
pub use mouse::MouseReport;
pub use volume::VolumeValueReport;

/// Largest serialized report (keyboard).
pub const MAX_REPORT_SIZE: usize = keyboard::KEYBOARD_REPORT_SIZE;

/// One independently latched HID report channel.
///
/// The discriminant is the report id; chained dispatch walks the ids in
/// ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ReportChannel {
    Keyboard = 0,
    Consumer = 1,
    VolumeValue = 2,
    Mouse = 3,
}

/// Number of report channels.
pub const CHANNEL_COUNT: u8 = 4;

impl ReportChannel {
    /// All channels in dispatch order.
    pub const ALL: [ReportChannel; CHANNEL_COUNT as usize] = [
        ReportChannel::Keyboard,
        ReportChannel::Consumer,
        ReportChannel::VolumeValue,
        ReportChannel::Mouse,
    ];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub const fn id(self) -> u8 {
        self as u8
    }

    /// The all-zero report of this channel's shape.
    pub fn neutral_report(self) -> HidReport {
        match self {
            ReportChannel::Keyboard => HidReport::Keyboard(KeyboardReport::empty()),
            ReportChannel::Consumer => HidReport::Consumer(ConsumerReport::empty()),
            ReportChannel::VolumeValue => HidReport::VolumeValue(VolumeValueReport::empty()),
            ReportChannel::Mouse => HidReport::Mouse(MouseReport::empty()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Consumer(ConsumerReport),
    VolumeValue(VolumeValueReport),
    Mouse(MouseReport),
}

impl HidReport {
    pub fn channel(&self) -> ReportChannel {
        match self {
            HidReport::Keyboard(_) => ReportChannel::Keyboard,
            HidReport::Consumer(_) => ReportChannel::Consumer,
            HidReport::VolumeValue(_) => ReportChannel::VolumeValue,
            HidReport::Mouse(_) => ReportChannel::Mouse,
        }
    }

    /// Serialize into `buf`, returning the number of bytes written
    /// (0 when `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Keyboard(k) => k.serialize(buf),
            HidReport::Consumer(c) => c.serialize(buf),
            HidReport::VolumeValue(v) => v.serialize(buf),
            HidReport::Mouse(m) => m.serialize(buf),
        }
    }

    /// Returns `true` for a release / neutral report.
    pub fn is_neutral(&self) -> bool {
        match self {
            HidReport::Keyboard(k) => k.is_empty(),
            HidReport::Consumer(c) => c.is_empty(),
            HidReport::VolumeValue(v) => v.is_empty(),
            HidReport::Mouse(m) => m.is_idle(),
        }
    }
}
