//! `HidTransport` over Embassy channels.
//!
//! At most one report is in flight: `send` queues it for the writer task
//! and the writer task returns the channel id on `completions()` once the
//! endpoint write finishes.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use hidknob::{Error, HidReport, HidTransport};

static REPORTS: Channel<CriticalSectionRawMutex, HidReport, 1> = Channel::new();
static COMPLETIONS: Channel<CriticalSectionRawMutex, u8, 4> = Channel::new();
static WAKEUP: Signal<CriticalSectionRawMutex, ()> = Signal::new();
static IN_FLIGHT: AtomicBool = AtomicBool::new(false);
static CONFIGURED: AtomicBool = AtomicBool::new(false);
static SUSPENDED: AtomicBool = AtomicBool::new(false);

pub fn reports() -> &'static Channel<CriticalSectionRawMutex, HidReport, 1> {
    &REPORTS
}

/// Report ids whose endpoint write has finished.
pub fn completions() -> &'static Channel<CriticalSectionRawMutex, u8, 4> {
    &COMPLETIONS
}

/// Raised when the engine wants the host woken.
pub fn wakeup_signal() -> &'static Signal<CriticalSectionRawMutex, ()> {
    &WAKEUP
}

pub fn set_configured(configured: bool) {
    CONFIGURED.store(configured, Ordering::Release);
}

pub fn set_suspended(suspended: bool) {
    SUSPENDED.store(suspended, Ordering::Release);
}

/// Called by the writer task after each endpoint write.
pub fn report_done(id: u8) {
    IN_FLIGHT.store(false, Ordering::Release);
    if COMPLETIONS.try_send(id).is_err() {
        defmt::warn!("USB: completion queue full, dropping id {}", id);
    }
}

pub struct UsbTransport;

impl HidTransport for UsbTransport {
    fn is_suspended(&self) -> bool {
        SUSPENDED.load(Ordering::Acquire)
    }

    fn is_ready(&self) -> bool {
        CONFIGURED.load(Ordering::Acquire) && !IN_FLIGHT.load(Ordering::Acquire)
    }

    fn remote_wakeup(&mut self) {
        WAKEUP.signal(());
    }

    fn send(&mut self, report: &HidReport) -> Result<(), Error> {
        if !CONFIGURED.load(Ordering::Acquire) {
            return Err(Error::Usb);
        }
        REPORTS.try_send(*report).map_err(|_| Error::TransportBusy)?;
        IN_FLIGHT.store(true, Ordering::Release);
        Ok(())
    }
}
