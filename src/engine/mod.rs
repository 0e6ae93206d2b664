//! Report state machine and chained dispatch.
//!
//! One `ReportEngine` is owned by the firmware loop. Every 10 ms tick it
//! samples the inputs, classifies them into one `LogicalEvent` and walks
//! the report channels in id order, sending the first pending press or
//! release. When the transport confirms a report, `on_report_complete`
//! resumes the walk at the next channel id, so one tick's event reaches
//! every channel even though only one report is in flight at a time.
//!
//! ## Phases
//!
//! - **Announce**: `ANNOUNCE_PRESSES` `A` press/release pairs at startup
//! - **Run**: normal sample/classify/report cycle

pub mod clock;
pub mod latch;
pub mod transport;


pub use clock::TickClock;
pub use latch::{key_down_report, ChannelLatches, KnobMode};
pub use transport::HidTransport;

use crate::config::{ANNOUNCE_PRESSES, TICK_INTERVAL_MS};
use crate::hid::keyboard::KEY_A;
use crate::hid::{HidReport, KeyboardReport, ReportChannel, CHANNEL_COUNT};
use crate::input::{Classifier, LogicalEvent, RawInputs, Sampler};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Startup `A` presses; `remaining` pairs left, `key_down` once the
    /// press of the current pair went out.
    Announce { remaining: u8, key_down: bool },
    /// Normal sample/classify/report cycle.
    Run,
}

/// Sampling, classification and per-channel report state, owned by the
/// firmware loop and driven through [`tick`](Self::tick) and
/// [`on_report_complete`](Self::on_report_complete).
pub struct ReportEngine {
    clock: TickClock,
    phase: Phase,
    sampler: Sampler,
    classifier: Classifier,
    latches: ChannelLatches,
    event: LogicalEvent,
    knob_mode: KnobMode,
}

impl ReportEngine {
    /// Engine that starts with the announce phase.
    pub fn new(knob_mode: KnobMode, now_ms: u32) -> Self {
        let phase = if ANNOUNCE_PRESSES > 0 {
            Phase::Announce {
                remaining: ANNOUNCE_PRESSES,
                key_down: false,
            }
        } else {
            Phase::Run
        };
        Self::with_phase(knob_mode, now_ms, phase)
    }

    /// Engine that skips the announce phase.
    pub fn running(knob_mode: KnobMode, now_ms: u32) -> Self {
        Self::with_phase(knob_mode, now_ms, Phase::Run)
    }

    fn with_phase(knob_mode: KnobMode, now_ms: u32, phase: Phase) -> Self {
        Self {
            clock: TickClock::new(now_ms, TICK_INTERVAL_MS),
            phase,
            sampler: Sampler::new(),
            classifier: Classifier::new(),
            latches: ChannelLatches::default(),
            event: LogicalEvent::None,
            knob_mode,
        }
    }

    /// Returns `true` when a tick is due; the caller then samples the
    /// inputs and calls [`tick`](Self::tick).
    pub fn poll_due(&mut self, now_ms: u32) -> bool {
        self.clock.due(now_ms)
    }

    /// Run one tick with this tick's readings.
    ///
    /// While suspended nothing is sent and the latches keep their state; a
    /// pending event asks the transport for a remote wakeup instead.
    pub fn tick<T: HidTransport>(&mut self, inputs: &RawInputs, transport: &mut T) {
        match self.phase {
            Phase::Announce {
                remaining,
                key_down,
            } => self.announce_tick(remaining, key_down, transport),
            Phase::Run => self.run_tick(inputs, transport),
        }
    }

    /// Transport finished sending the report with id `id`.
    pub fn on_report_complete<T: HidTransport>(&mut self, id: u8, transport: &mut T) {
        if self.phase != Phase::Run {
            return;
        }
        let next = match id.checked_add(1) {
            Some(next) if next < CHANNEL_COUNT => next,
            _ => return,
        };
        if transport.is_suspended() {
            return;
        }
        self.dispatch_from(next, transport);
    }

    /// Event classified on the last run tick.
    pub fn event(&self) -> LogicalEvent {
        self.event
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn latches(&self) -> &ChannelLatches {
        &self.latches
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    fn announce_tick<T: HidTransport>(&mut self, remaining: u8, key_down: bool, transport: &mut T) {
        if transport.is_suspended() {
            transport.remote_wakeup();
            return;
        }

        let report = if key_down {
            KeyboardReport::empty()
        } else {
            KeyboardReport::single(KEY_A)
        };
        Self::try_send(&HidReport::Keyboard(report), transport);

        self.phase = match (key_down, remaining) {
            (false, _) => Phase::Announce {
                remaining,
                key_down: true,
            },
            (true, 0..=1) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Engine: announce done, running");
                Phase::Run
            }
            (true, _) => Phase::Announce {
                remaining: remaining - 1,
                key_down: false,
            },
        };
    }

    fn run_tick<T: HidTransport>(&mut self, inputs: &RawInputs, transport: &mut T) {
        let sample = self.sampler.sample(inputs.knob_raw);
        self.event = self.classifier.classify(inputs, sample);

        if transport.is_suspended() {
            if self.event != LogicalEvent::None {
                #[cfg(feature = "defmt")]
                defmt::info!("Engine: {} while suspended, waking host", self.event);
                transport.remote_wakeup();
            }
            return;
        }

        self.dispatch_from(0, transport);
    }

    /// Send the first pending transition at or after channel `first`.
    fn dispatch_from<T: HidTransport>(&mut self, first: u8, transport: &mut T) {
        for &channel in ReportChannel::ALL.iter().skip(first as usize) {
            if let Some(report) = self.transition(channel) {
                Self::try_send(&report, transport);
                return;
            }
        }
    }

    /// Flip the channel latch if the current event asks for it and return
    /// the report that announces the flip.
    fn transition(&mut self, channel: ReportChannel) -> Option<HidReport> {
        let wanted = key_down_report(channel, self.event, self.knob_mode, &self.sampler);
        let latch = self.latches.latch_mut(channel);
        match (wanted, *latch) {
            (Some(report), false) => {
                *latch = true;
                Some(report)
            }
            (None, true) => {
                *latch = false;
                Some(channel.neutral_report())
            }
            _ => None,
        }
    }

    // Not-ready drops the report; the next tick re-evaluates from scratch.
    fn try_send<T: HidTransport>(report: &HidReport, transport: &mut T) {
        if !transport.is_ready() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Engine: transport busy, dropping {}", report.channel());
            return;
        }
        if let Err(_e) = transport.send(report) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Engine: send on {} failed: {}", report.channel(), _e);
        }
    }
}
