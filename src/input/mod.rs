//! Input sampling and per-tick event classification.
//!
//! ## Components
//!
//! - **Sampler**: knob moving average over the last `SAMPLE_COUNT` readings
//! - **Classifier**: reduces one tick of raw inputs to a single `LogicalEvent`

pub mod classifier;
pub mod sampler;

pub use classifier::Classifier;
pub use sampler::{SampleHistory, SampleOutcome, Sampler};

/// Raw readings taken once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInputs {
    /// On-board button (already debounced by the board).
    pub onboard_pressed: bool,
    /// External button pin level; the button pulls it low when pressed.
    pub external_pin_high: bool,
    /// Raw knob conversion; bit 15 set marks it invalid.
    pub knob_raw: u16,
}

/// The one event live for the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicalEvent {
    #[default]
    None,
    OnBoardButton,
    ExternalButton,
    KnobChanged,
    SampleError,
}
