//! USB HID composite device - keyboard, consumer control, volume value, mouse.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one HID endpoint per report channel.

use crate::usb::transport;
use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use hidknob::config;
use hidknob::hid::volume::VOLUME_REPORT_DESCRIPTOR;
use hidknob::hid::{HidReport, MAX_REPORT_SIZE};
use static_cell::StaticCell;
use usbd_hid::descriptor::{
    KeyboardReport as KeyboardDescriptor, MediaKeyboardReport as ConsumerDescriptor,
    MouseReport as MouseDescriptor, SerializedDescriptor,
};

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// One HID IN endpoint.
pub type ReportWriter = HidWriter<'static, UsbDriver, 8>;

static HID_STATES: StaticCell<[State; 4]> = StaticCell::new();
static DESCRIPTORS: StaticCell<DescriptorBuffers> = StaticCell::new();
static BUS_HANDLER: StaticCell<UsbBusHandler> = StaticCell::new();

struct DescriptorBuffers {
    config: [u8; 256],
    bos: [u8; 256],
    msos: [u8; 256],
    control: [u8; 128],
}

struct UsbBusHandler;

impl embassy_usb::Handler for UsbBusHandler {
    fn configured(&mut self, configured: bool) {
        info!("USB: configured={}", configured);
        transport::set_configured(configured);
    }

    fn suspended(&mut self, suspended: bool) {
        info!("USB: suspended={}", suspended);
        transport::set_suspended(suspended);
    }
}

/// Build result containing the USB device runner and the HID writers,
/// one per report channel in id order.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub writers: ChannelWriters,
}

pub struct ChannelWriters {
    pub keyboard: ReportWriter,
    pub consumer: ReportWriter,
    pub volume: ReportWriter,
    pub mouse: ReportWriter,
}

fn add_writer(
    builder: &mut Builder<'static, UsbDriver>,
    state: &'static mut State<'static>,
    report_descriptor: &'static [u8],
) -> ReportWriter {
    let hid_config = HidConfig {
        report_descriptor,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    HidWriter::new(builder, state, hid_config)
}

/// Bring up the USB stack and register one HID interface per channel.
///
/// Call once; the static state above is claimed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;
    usb_config.supports_remote_wakeup = true;

    let DescriptorBuffers {
        config: config_desc,
        bos,
        msos,
        control,
    } = DESCRIPTORS.init(DescriptorBuffers {
        config: [0; 256],
        bos: [0; 256],
        msos: [0; 256],
        control: [0; 128],
    });
    let mut builder = Builder::new(driver, usb_config, config_desc, bos, msos, control);
    builder.handler(BUS_HANDLER.init(UsbBusHandler));

    // Interface order is report id order.
    let [kb_state, consumer_state, volume_state, mouse_state] =
        HID_STATES.init([State::new(), State::new(), State::new(), State::new()]);
    let keyboard = add_writer(&mut builder, kb_state, KeyboardDescriptor::desc());
    let consumer = add_writer(&mut builder, consumer_state, ConsumerDescriptor::desc());
    let volume = add_writer(&mut builder, volume_state, VOLUME_REPORT_DESCRIPTOR);
    let mouse = add_writer(&mut builder, mouse_state, MouseDescriptor::desc());

    let device = builder.build();

    info!("USB: {} HID interfaces registered", hidknob::hid::CHANNEL_COUNT);

    UsbHidDevice {
        device,
        writers: ChannelWriters {
            keyboard,
            consumer,
            volume,
            mouse,
        },
    }
}

/// Services the USB device for the life of the firmware.
///
/// While suspended, waits for either a host resume or a wakeup request
/// from the report engine.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    loop {
        device.run_until_suspend().await;
        match select(device.wait_resume(), transport::wakeup_signal().wait()).await {
            Either::First(()) => {}
            Either::Second(()) => {
                info!("USB: requesting remote wakeup");
                if let Err(e) = device.remote_wakeup().await {
                    warn!("USB remote wakeup failed: {:?}", e);
                }
            }
        }
    }
}

/// HID report writer task - takes queued reports from the engine and
/// writes them to the endpoint of their channel.
pub async fn hid_writer_task(mut writers: ChannelWriters) -> ! {
    info!("HID writer task started - waiting for reports");

    let mut buf = [0u8; MAX_REPORT_SIZE];

    loop {
        let report = transport::reports().receive().await;
        let n = report.serialize(&mut buf);

        let writer = match &report {
            HidReport::Keyboard(_) => &mut writers.keyboard,
            HidReport::Consumer(_) => &mut writers.consumer,
            HidReport::VolumeValue(_) => &mut writers.volume,
            HidReport::Mouse(_) => &mut writers.mouse,
        };
        if let Err(e) = writer.write(&buf[..n]).await {
            warn!("USB {} write failed: {:?}", report.channel(), e);
        }

        transport::report_done(report.channel().id());
    }
}
