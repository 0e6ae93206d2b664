//! Reduce one tick of raw inputs to a single `LogicalEvent`.
//!
//! Checks run in a fixed order and a later match replaces an earlier one:
//! on-board button, external button press edge, knob turn. An invalid knob
//! sample replaces everything.
//!
//! An external press that loses to a knob turn or a bad sample stays
//! pending while the button is held and is reported on the first tick it
//! wins.

use super::{LogicalEvent, RawInputs, SampleOutcome};
use crate::config::KNOB_DIFF_THRESHOLD;

/// Debounce state carried between ticks.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    /// The current external press has already been reported.
    external_reported: bool,
}

impl Classifier {
    pub const fn new() -> Self {
        Self {
            external_reported: false,
        }
    }

    /// Classify one tick. `sample` is this tick's outcome from the
    /// [`Sampler`](super::Sampler).
    pub fn classify(&mut self, inputs: &RawInputs, sample: SampleOutcome) -> LogicalEvent {
        let mut event = LogicalEvent::None;

        if inputs.onboard_pressed {
            event = LogicalEvent::OnBoardButton;
        }

        // Active-low; one report per press.
        let external_pressed = !inputs.external_pin_high;
        if !external_pressed {
            self.external_reported = false;
        } else if !self.external_reported {
            event = LogicalEvent::ExternalButton;
        }

        match sample {
            SampleOutcome::Valid { raw, mean } => {
                if raw.abs_diff(mean) > KNOB_DIFF_THRESHOLD {
                    event = LogicalEvent::KnobChanged;
                }
            }
            SampleOutcome::Invalid => event = LogicalEvent::SampleError,
        }

        if event == LogicalEvent::ExternalButton {
            self.external_reported = true;
        }
        event
    }
}
