//! hidknob - USB HID button / volume-knob adapter for nRF52840.
//!
//! Tasks:
//! - `usb_task`: USB device servicing, suspend/resume, remote wakeup
//! - `writer_task`: moves queued reports onto their HID endpoints
//! - `main`: owns the `ReportEngine`; samples inputs every tick and
//!   chains reports on completion

#![no_std]
#![no_main]

mod usb;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::saadc::{self, ChannelConfig, Resolution, Saadc};
use embassy_nrf::bind_interrupts;
use embassy_time::{Duration, Instant, Ticker};
use embassy_usb::UsbDevice;
use hidknob::config;
use hidknob::{RawInputs, ReportEngine};
use usb::hid_device::{self, ChannelWriters, UsbDriver};
use usb::transport::{self, UsbTransport};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
});

#[embassy_executor::task]
async fn usb_task(device: UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn writer_task(writers: ChannelWriters) -> ! {
    hid_device::hid_writer_task(writers).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("hidknob starting");

    let usb = hid_device::init(p.USBD);
    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(writer_task(usb.writers)));

    let onboard = Input::new(p.P0_11, Pull::Up);
    let external = Input::new(p.P0_28, Pull::Up);

    let mut adc_config = saadc::Config::default();
    adc_config.resolution = Resolution::_12BIT;
    let channel = ChannelConfig::single_ended(p.P0_03);
    let mut knob = Saadc::new(p.SAADC, Irqs, adc_config, [channel]);
    knob.calibrate().await;

    let mut engine = ReportEngine::new(config::KNOB_MODE, now_ms());
    let mut transport = UsbTransport;
    let mut ticker = Ticker::every(Duration::from_millis(config::POLL_INTERVAL_MS));

    loop {
        match select(ticker.next(), transport::completions().receive()).await {
            Either::First(()) => {
                if !engine.poll_due(now_ms()) {
                    continue;
                }
                let mut sample = [0i16; 1];
                knob.sample(&mut sample).await;
                let inputs = RawInputs {
                    onboard_pressed: onboard.is_low(),
                    external_pin_high: external.is_high(),
                    // A below-ground conversion is negative, which sets the
                    // validity bit.
                    knob_raw: sample[0] as u16,
                };
                engine.tick(&inputs, &mut transport);
            }
            Either::Second(id) => engine.on_report_complete(id, &mut transport),
        }
    }
}

fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}
