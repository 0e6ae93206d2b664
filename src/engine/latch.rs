//! Per-channel "currently asserted" latches and the key-down report each
//! logical event maps to.

use crate::hid::keyboard::{KEY_A, KEY_E};
use crate::hid::{
    ConsumerReport, ConsumerUsage, HidReport, KeyboardReport, ReportChannel, VolumeValueReport,
};
use crate::input::{LogicalEvent, Sampler};

/// How a knob turn is reported to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KnobMode {
    /// Absolute averaged position on the volume-value channel.
    Absolute,
    /// Volume increment/decrement on the consumer channel.
    Step,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelLatches {
    pub keyboard: bool,
    pub consumer: bool,
    pub volume_value: bool,
    pub mouse: bool,
}

impl ChannelLatches {
    pub fn is_asserted(&self, channel: ReportChannel) -> bool {
        match channel {
            ReportChannel::Keyboard => self.keyboard,
            ReportChannel::Consumer => self.consumer,
            ReportChannel::VolumeValue => self.volume_value,
            ReportChannel::Mouse => self.mouse,
        }
    }

    pub(crate) fn latch_mut(&mut self, channel: ReportChannel) -> &mut bool {
        match channel {
            ReportChannel::Keyboard => &mut self.keyboard,
            ReportChannel::Consumer => &mut self.consumer,
            ReportChannel::VolumeValue => &mut self.volume_value,
            ReportChannel::Mouse => &mut self.mouse,
        }
    }

    pub fn any(&self) -> bool {
        self.keyboard || self.consumer || self.volume_value || self.mouse
    }
}

/// Key-down report for `channel` under `event`, or `None` when the event
/// does not belong to that channel.
pub fn key_down_report(
    channel: ReportChannel,
    event: LogicalEvent,
    mode: KnobMode,
    sampler: &Sampler,
) -> Option<HidReport> {
    match (channel, event) {
        (ReportChannel::Keyboard, LogicalEvent::OnBoardButton) => {
            Some(HidReport::Keyboard(KeyboardReport::single(KEY_A)))
        }
        (ReportChannel::Keyboard, LogicalEvent::SampleError) => {
            Some(HidReport::Keyboard(KeyboardReport::single(KEY_E)))
        }
        (ReportChannel::Consumer, LogicalEvent::ExternalButton) => Some(HidReport::Consumer(
            ConsumerReport::new(ConsumerUsage::PlayPause),
        )),
        (ReportChannel::Consumer, LogicalEvent::KnobChanged) if mode == KnobMode::Step => {
            let usage = if sampler.last_raw() > sampler.volume() {
                ConsumerUsage::VolumeUp
            } else {
                ConsumerUsage::VolumeDown
            };
            Some(HidReport::Consumer(ConsumerReport::new(usage)))
        }
        (ReportChannel::VolumeValue, LogicalEvent::KnobChanged) if mode == KnobMode::Absolute => {
            Some(HidReport::VolumeValue(VolumeValueReport::new(
                sampler.volume(),
            )))
        }
        _ => None,
    }
}
