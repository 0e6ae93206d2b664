//! Knob sampling with a moving-average filter.

use crate::config::{SAMPLE_COUNT, SAMPLE_INVALID_MASK};

/// Circular buffer of the last `SAMPLE_COUNT` valid readings.
///
/// Slots start at zero, so the mean ramps up over the first readings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleHistory {
    samples: [u16; SAMPLE_COUNT],
    index: usize,
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleHistory {
    pub const fn new() -> Self {
        Self {
            samples: [0; SAMPLE_COUNT],
            index: 0,
        }
    }

    /// Overwrite the oldest slot.
    pub fn push(&mut self, value: u16) {
        self.samples[self.index] = value;
        self.index = (self.index + 1) % SAMPLE_COUNT;
    }

    /// Unweighted mean over every slot.
    pub fn mean(&self) -> u16 {
        let sum: u32 = self.samples.iter().map(|&s| u32::from(s)).sum();
        (sum / SAMPLE_COUNT as u32) as u16
    }

    pub fn samples(&self) -> &[u16; SAMPLE_COUNT] {
        &self.samples
    }

    /// Slot the next reading will overwrite.
    pub fn next_index(&self) -> usize {
        self.index
    }
}

/// Result of sampling the knob for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleOutcome {
    Valid { raw: u16, mean: u16 },
    Invalid,
}

/// Knob reading filter: keeps the history and the averaged volume that
/// the volume-value report carries.
#[derive(Clone, Debug, Default)]
pub struct Sampler {
    history: SampleHistory,
    volume: u16,
    last_raw: u16,
}

impl Sampler {
    pub const fn new() -> Self {
        Self {
            history: SampleHistory::new(),
            volume: 0,
            last_raw: 0,
        }
    }

    /// Feed one raw conversion. Invalid readings leave the history untouched.
    pub fn sample(&mut self, raw: u16) -> SampleOutcome {
        if raw & SAMPLE_INVALID_MASK != 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("Sampler: invalid reading {=u16:#x}", raw);
            return SampleOutcome::Invalid;
        }

        self.history.push(raw);
        self.last_raw = raw;
        self.volume = self.history.mean();
        SampleOutcome::Valid {
            raw,
            mean: self.volume,
        }
    }

    /// Absolute volume value: the latest moving average.
    pub fn volume(&self) -> u16 {
        self.volume
    }

    /// Newest valid raw reading.
    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_counts_zero_seeded_slots() {
        let mut history = SampleHistory::new();
        history.push(800);
        assert_eq!(history.mean(), 100);
        history.push(800);
        assert_eq!(history.mean(), 200);
    }

    #[test]
    fn mean_covers_exactly_last_eight() {
        let mut history = SampleHistory::new();
        for v in 1..=10u16 {
            history.push(v * 100);
        }
        // Slots hold 300..=1000.
        assert_eq!(history.mean(), 650);
    }

    #[test]
    fn overwrite_is_fifo_by_index() {
        let mut history = SampleHistory::new();
        for v in 0..SAMPLE_COUNT as u16 {
            history.push(v + 1);
        }
        assert_eq!(history.next_index(), 0);
        history.push(99);
        assert_eq!(history.samples()[0], 99);
        assert_eq!(history.samples()[1], 2);
        assert_eq!(history.next_index(), 1);
    }

    #[test]
    fn full_scale_does_not_overflow() {
        let mut history = SampleHistory::new();
        for _ in 0..SAMPLE_COUNT {
            history.push(crate::config::KNOB_MAX);
        }
        assert_eq!(history.mean(), crate::config::KNOB_MAX);
    }

    #[test]
    fn invalid_reading_skips_history() {
        let mut sampler = Sampler::new();
        sampler.sample(1600);
        let before = sampler.history().clone();

        assert_eq!(sampler.sample(0x8000 | 1600), SampleOutcome::Invalid);
        assert_eq!(sampler.history(), &before);
        assert_eq!(sampler.volume(), 200);
    }

    #[test]
    fn valid_reading_updates_volume() {
        let mut sampler = Sampler::new();
        assert_eq!(
            sampler.sample(2400),
            SampleOutcome::Valid { raw: 2400, mean: 300 }
        );
        assert_eq!(sampler.volume(), 300);
        assert_eq!(sampler.last_raw(), 2400);
    }
}
