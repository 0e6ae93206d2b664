//! Integration tests for hidknob host-testable logic.
//!
//! Drives the public engine API the way the firmware loop does: poll the
//! clock every millisecond, tick when due, and deliver one completion per
//! sent report.

use hidknob::config::TICK_INTERVAL_MS;
use hidknob::hid::{ConsumerReport, ConsumerUsage, KeyboardReport, VolumeValueReport};
use hidknob::{Error, HidReport, HidTransport, KnobMode, RawInputs, ReportEngine};

#[derive(Default)]
struct Host {
    suspended: bool,
    in_flight: Option<HidReport>,
    log: Vec<HidReport>,
    wakeups: usize,
}

impl HidTransport for Host {
    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn is_ready(&self) -> bool {
        !self.suspended && self.in_flight.is_none()
    }

    fn remote_wakeup(&mut self) {
        self.wakeups += 1;
        self.suspended = false;
    }

    fn send(&mut self, report: &HidReport) -> Result<(), Error> {
        if self.in_flight.is_some() {
            return Err(Error::TransportBusy);
        }
        self.in_flight = Some(*report);
        Ok(())
    }
}

/// Run the loop for `ms` milliseconds with fixed inputs.
fn run(engine: &mut ReportEngine, host: &mut Host, now: &mut u32, ms: u32, inputs: RawInputs) {
    for _ in 0..ms {
        *now += 1;
        if engine.poll_due(*now) {
            engine.tick(&inputs, host);
        }
        while let Some(report) = host.in_flight.take() {
            host.log.push(report);
            engine.on_report_complete(report.channel().id(), host);
        }
    }
}

const IDLE: RawInputs = RawInputs {
    onboard_pressed: false,
    external_pin_high: true,
    knob_raw: 2000,
};

/// Let the knob average settle on `IDLE.knob_raw` so it stops reporting.
fn settle(engine: &mut ReportEngine, host: &mut Host, now: &mut u32) {
    run(engine, host, now, 20 * TICK_INTERVAL_MS, IDLE);
    host.log.clear();
}

#[test]
fn startup_announces_then_reports_button() {
    let mut engine = ReportEngine::new(KnobMode::Absolute, 0);
    let mut host = Host::default();
    let mut now = 0;

    run(&mut engine, &mut host, &mut now, 4 * TICK_INTERVAL_MS, IDLE);
    let a = HidReport::Keyboard(KeyboardReport::single(0x04));
    let up = HidReport::Keyboard(KeyboardReport::empty());
    assert_eq!(host.log, vec![a, up, a, up]);

    settle(&mut engine, &mut host, &mut now);
    let pressed = RawInputs {
        onboard_pressed: true,
        ..IDLE
    };
    run(&mut engine, &mut host, &mut now, 5 * TICK_INTERVAL_MS, pressed);
    run(&mut engine, &mut host, &mut now, TICK_INTERVAL_MS, IDLE);
    assert_eq!(host.log, vec![a, up]);
}

#[test]
fn knob_turn_then_rest_sends_value_then_neutral() {
    let mut engine = ReportEngine::running(KnobMode::Absolute, 0);
    let mut host = Host::default();
    let mut now = 0;
    settle(&mut engine, &mut host, &mut now);

    let turned = RawInputs {
        knob_raw: 2800,
        ..IDLE
    };
    run(&mut engine, &mut host, &mut now, 30 * TICK_INTERVAL_MS, turned);

    assert_eq!(host.log.len(), 2);
    assert_eq!(
        host.log[0],
        HidReport::VolumeValue(VolumeValueReport::new(2100))
    );
    assert_eq!(host.log[1], HidReport::VolumeValue(VolumeValueReport::empty()));
}

#[test]
fn simultaneous_events_reach_every_channel() {
    let mut engine = ReportEngine::running(KnobMode::Absolute, 0);
    let mut host = Host::default();
    let mut now = 0;
    settle(&mut engine, &mut host, &mut now);

    // Hold the on-board button, then add the external button on top.
    let onboard = RawInputs {
        onboard_pressed: true,
        ..IDLE
    };
    let both = RawInputs {
        external_pin_high: false,
        ..onboard
    };
    run(&mut engine, &mut host, &mut now, TICK_INTERVAL_MS, onboard);
    run(&mut engine, &mut host, &mut now, TICK_INTERVAL_MS, both);

    assert_eq!(
        host.log,
        vec![
            HidReport::Keyboard(KeyboardReport::single(0x04)),
            HidReport::Keyboard(KeyboardReport::empty()),
            HidReport::Consumer(ConsumerReport::new(ConsumerUsage::PlayPause)),
        ]
    );
}

#[test]
fn external_press_during_startup_ramp_is_not_lost() {
    let mut engine = ReportEngine::running(KnobMode::Absolute, 0);
    let mut host = Host::default();
    let mut now = 0;

    // Held from power-on while the zero-seeded average is still climbing.
    let held = RawInputs {
        external_pin_high: false,
        ..IDLE
    };
    run(&mut engine, &mut host, &mut now, 10 * TICK_INTERVAL_MS, held);

    let play_pause = HidReport::Consumer(ConsumerReport::new(ConsumerUsage::PlayPause));
    assert_eq!(host.log.iter().filter(|&&r| r == play_pause).count(), 1);
    assert_eq!(
        host.log,
        vec![
            HidReport::VolumeValue(VolumeValueReport::new(250)),
            play_pause,
            HidReport::VolumeValue(VolumeValueReport::empty()),
            HidReport::Consumer(ConsumerReport::empty()),
        ]
    );
}

#[test]
fn suspended_host_is_woken_before_reporting() {
    let mut engine = ReportEngine::running(KnobMode::Absolute, 0);
    let mut host = Host::default();
    let mut now = 0;
    settle(&mut engine, &mut host, &mut now);

    host.suspended = true;
    let pressed = RawInputs {
        onboard_pressed: true,
        ..IDLE
    };
    run(&mut engine, &mut host, &mut now, TICK_INTERVAL_MS, pressed);
    assert_eq!(host.wakeups, 1);
    assert!(host.log.is_empty());

    // The host resumed; the still-held button is reported on the next tick.
    run(&mut engine, &mut host, &mut now, TICK_INTERVAL_MS, pressed);
    assert_eq!(
        host.log,
        vec![HidReport::Keyboard(KeyboardReport::single(0x04))]
    );
}
