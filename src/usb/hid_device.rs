//! USB HID device side - single combined interface.
//!
//! Initialises the Embassy USB stack on the RP2040 hardware USB
//! peripheral and exposes one HID interface carrying the combined
//! report descriptor (mouse, keyboard and consumer collections,
//! distinguished by report ID).

use crate::config;
use crate::hid::COMBINED_REPORT_DESCRIPTOR;
use crate::usb::output::ReportSink;
use defmt::{info, warn};
use embassy_rp::usb::Driver;
use embassy_rp::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_usb::class::hid::{
    Config as HidConfig, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, UsbDevice};
use heapless::Vec;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<peripherals::USB>;
});

type UsbDriver = Driver<'static, peripherals::USB>;

/// A serialized output report ready for the interrupt IN endpoint.
///
/// Byte 0 is the report ID; the length is whatever the encoder for that
/// report type produced.
pub type WireFrame = Vec<u8, { config::KEYBOARD_WIRE_LEN }>;

/// Channel between the pipeline task and the USB writer task.
pub type WireChannel = Channel<CriticalSectionRawMutex, WireFrame, 16>;

static HID_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<FeatureRequestHandler> = StaticCell::new();

/// Answers class control requests the host may issue against the
/// combined interface.
///
/// GET_REPORT on the resolution-multiplier feature report returns the
/// stored multiplier; GET_REPORT on an input report returns an empty
/// (all-zero) report of that type. SET_REPORT is acknowledged and the
/// payload discarded - the keyboard LED output report has nowhere to go
/// on this device.
struct FeatureRequestHandler {
    multiplier: u8,
}

impl RequestHandler for FeatureRequestHandler {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        match id {
            ReportId::Feature(config::REPORT_ID_MULTIPLIER) => {
                buf[0] = self.multiplier;
                Some(1)
            }
            ReportId::In(config::REPORT_ID_MOUSE) => {
                let n = config::MOUSE_WIRE_LEN - 1;
                buf[..n].fill(0);
                Some(n)
            }
            ReportId::In(config::REPORT_ID_KEYBOARD) => {
                let n = config::KEYBOARD_WIRE_LEN - 1;
                buf[..n].fill(0);
                Some(n)
            }
            ReportId::In(config::REPORT_ID_CONSUMER) => {
                buf[0] = 0;
                Some(1)
            }
            _ => None,
        }
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        if let ReportId::Feature(config::REPORT_ID_MULTIPLIER) = id {
            if let Some(&value) = data.first() {
                self.multiplier = value;
            }
        }
        OutResponse::Accepted
    }
}

/// Build result containing the USB device runner and the HID writer.
pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub writer: HidWriter<'static, UsbDriver, { config::KEYBOARD_WIRE_LEN }>,
}

/// Initialise the USB stack and create the HID device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usb: peripherals::USB) -> UsbHidDevice {
    let driver = Driver::new(usb, Irqs);

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let handler = REQUEST_HANDLER.init(FeatureRequestHandler { multiplier: 1 });

    let hid_state = HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: COMBINED_REPORT_DESCRIPTOR,
        request_handler: Some(handler),
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 64,
    };
    let writer = HidWriter::new(&mut builder, hid_state, hid_config);

    let device = builder.build();

    info!("USB HID device initialised (combined interface)");

    UsbHidDevice { device, writer }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Report forwarding task - reads serialized frames from the pipeline
/// channel and writes them to the HID interrupt endpoint.
pub async fn hid_writer_task(
    mut writer: HidWriter<'static, UsbDriver, { config::KEYBOARD_WIRE_LEN }>,
    frame_rx: Receiver<'static, CriticalSectionRawMutex, WireFrame, 16>,
) -> ! {
    info!("HID writer task started - waiting for reports");

    loop {
        let frame = frame_rx.receive().await;
        if let Err(_e) = writer.write(&frame).await {
            warn!("USB HID write failed");
        }
    }
}

/// [`ReportSink`] backed by the wire channel.
///
/// Readiness mirrors channel occupancy, so a wedged or suspended USB
/// host makes the pipeline drop reports instead of blocking.
pub struct ChannelReportSink {
    tx: Sender<'static, CriticalSectionRawMutex, WireFrame, 16>,
}

impl ChannelReportSink {
    pub fn new(channel: &'static WireChannel) -> Self {
        Self {
            tx: channel.sender(),
        }
    }
}

impl ReportSink for ChannelReportSink {
    fn is_ready(&mut self, _interface: u8) -> bool {
        !self.tx.is_full()
    }

    fn send_report(&mut self, _interface: u8, _report_id: u8, data: &[u8]) -> bool {
        match Vec::from_slice(data) {
            Ok(frame) => self.tx.try_send(frame).is_ok(),
            Err(()) => false,
        }
    }
}
